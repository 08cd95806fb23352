//! Batch results
//!
//! A `BatchReport` keeps every task outcome in completion order together with
//! the batch's end-to-end wall-clock time.

use super::DispatchMode;
use crate::util::time::calculate_speedup;
use crate::worker::ResultEnvelope;
use serde::{Deserialize, Serialize};

/// One completed task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub n: i64,
    pub worker_id: usize,
    pub is_prime: bool,
    pub elapsed_secs: f64,
}

/// Outcome of a fully collected batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// How tasks were mapped onto workers
    pub mode: DispatchMode,
    /// Completed tasks in completion order
    pub tasks: Vec<TaskRecord>,
    /// Seconds from batch start until the last result was received
    pub total_elapsed_secs: f64,
}

impl BatchReport {
    /// Build a report from successfully collected envelopes
    ///
    /// Failure envelopes never reach a report (they abort the batch); any
    /// that are passed in are skipped.
    pub fn from_envelopes(
        mode: DispatchMode,
        envelopes: Vec<ResultEnvelope>,
        total_elapsed_secs: f64,
    ) -> Self {
        let tasks = envelopes
            .into_iter()
            .filter_map(|envelope| {
                let result = envelope.outcome.ok()?;
                Some(TaskRecord {
                    n: envelope.n,
                    worker_id: envelope.worker_id,
                    is_prime: result.is_prime,
                    elapsed_secs: result.elapsed_secs,
                })
            })
            .collect();

        Self {
            mode,
            tasks,
            total_elapsed_secs,
        }
    }

    /// Number of tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True if the batch had no tasks
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks whose integer is prime
    pub fn prime_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_prime).count()
    }

    /// `(n, is_prime)` pairs in completion order
    pub fn pairs(&self) -> Vec<(i64, bool)> {
        self.tasks.iter().map(|t| (t.n, t.is_prime)).collect()
    }

    /// Sum of per-task elapsed time (may exceed the total)
    pub fn sum_elapsed_secs(&self) -> f64 {
        self.tasks.iter().map(|t| t.elapsed_secs).sum()
    }

    /// Largest per-task elapsed time, 0.0 for an empty batch
    pub fn max_elapsed_secs(&self) -> f64 {
        self.tasks.iter().map(|t| t.elapsed_secs).fold(0.0, f64::max)
    }

    /// Task with the largest elapsed time
    pub fn slowest(&self) -> Option<&TaskRecord> {
        self.tasks
            .iter()
            .max_by(|a, b| a.elapsed_secs.total_cmp(&b.elapsed_secs))
    }

    /// Summed task time divided by batch wall-clock time
    pub fn speedup(&self) -> f64 {
        calculate_speedup(self.sum_elapsed_secs(), self.total_elapsed_secs)
    }
}
