//! Batch dispatcher
//!
//! The dispatcher fans a batch of integers out to worker threads, collects
//! one `ResultEnvelope` per task from a shared unbounded channel, and hands
//! each to a `Reporter` in the order the workers finish.
//!
//! # Protocol
//!
//! 1. Start the batch clock
//! 2. Create one unbounded result channel (many producers, one consumer)
//! 3. Spawn workers without waiting on any of them
//! 4. Receive exactly `numbers.len()` envelopes, reporting each as it arrives
//! 5. Stop the batch clock after the last receive
//! 6. Join every worker, then report the total
//!
//! The dispatcher keeps no sender of its own, so if every worker exits while
//! envelopes are still missing, the receive fails with `LostResult` instead of
//! blocking forever.
//!
//! # Example
//!
//! ```
//! use primefan::dispatcher::Dispatcher;
//! use primefan::evaluator::trial_division::TrialDivision;
//! use primefan::output::text::TextReporter;
//! use std::sync::Arc;
//!
//! let dispatcher = Dispatcher::new(Arc::new(TrialDivision));
//! let mut reporter = TextReporter::new(Vec::new());
//!
//! let report = dispatcher.run_batch(&[2, 3, 4], &mut reporter)?;
//! assert_eq!(report.len(), 3);
//! assert_eq!(report.prime_count(), 2);
//! # Ok::<(), primefan::DispatchError>(())
//! ```

pub mod report;

pub use report::{BatchReport, TaskRecord};

use crate::error::DispatchError;
use crate::evaluator::PrimalityTest;
use crate::output::Reporter;
use crate::util::time::Timestamp;
use crate::worker::{
    spawn_pool_worker, spawn_task_worker, OsThreads, ResultEnvelope, ThreadSpawner, WorkerHandle,
};
use crossbeam::channel::{self, Receiver, Sender};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// How tasks are mapped onto worker threads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DispatchMode {
    /// One dedicated thread per task, all live at once
    PerTask,
    /// A fixed number of threads pulling tasks from a shared queue
    Pool { workers: usize },
}

impl Default for DispatchMode {
    fn default() -> Self {
        Self::PerTask
    }
}

impl fmt::Display for DispatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerTask => write!(f, "one worker per task"),
            Self::Pool { workers } => write!(f, "pool of {} workers", workers),
        }
    }
}

/// Fans primality tasks out to worker threads and collects their results
#[derive(Clone)]
pub struct Dispatcher {
    predicate: Arc<dyn PrimalityTest>,
    mode: DispatchMode,
    spawner: Arc<dyn ThreadSpawner>,
}

impl Dispatcher {
    /// Create a dispatcher in the default one-worker-per-task mode
    pub fn new(predicate: Arc<dyn PrimalityTest>) -> Self {
        Self {
            predicate,
            mode: DispatchMode::PerTask,
            spawner: Arc::new(OsThreads),
        }
    }

    /// Select the dispatch mode
    pub fn with_mode(mut self, mode: DispatchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the thread spawner (named OS threads by default)
    pub fn with_spawner(mut self, spawner: Arc<dyn ThreadSpawner>) -> Self {
        self.spawner = spawner;
        self
    }

    /// Run one batch
    ///
    /// Every integer in `numbers` is an independent task, duplicates included.
    /// Envelopes are passed to `reporter` in completion order; the total
    /// elapsed time is reported once every worker has been joined.
    ///
    /// # Errors
    ///
    /// - `WorkerSpawn` if a worker thread cannot be created
    /// - `TaskFailed` on the first failure envelope (the batch is aborted)
    /// - `LostResult` if workers exit without sending every envelope
    /// - `Report` if the reporter fails to write
    ///
    /// Workers already started are always joined before an error is returned.
    pub fn run_batch(
        &self,
        numbers: &[i64],
        reporter: &mut dyn Reporter,
    ) -> Result<BatchReport, DispatchError> {
        let start = Timestamp::now();
        let (results_tx, results_rx) = channel::unbounded();
        let mut workers = Vec::new();

        info!(tasks = numbers.len(), mode = %self.mode, "dispatching batch");

        let spawned = match self.mode {
            DispatchMode::PerTask => self.spawn_per_task(numbers, &results_tx, &mut workers),
            DispatchMode::Pool { workers: size } => {
                self.spawn_pool(numbers, size, &results_tx, &mut workers)
            }
        };
        // Workers now hold the only senders
        drop(results_tx);

        let collected = match spawned {
            Ok(()) => collect(&results_rx, numbers.len(), reporter),
            Err(err) => {
                warn!(error = %err, "aborting batch; waiting for started workers");
                Err(err)
            }
        };
        let total_elapsed_secs = start.elapsed_secs();

        // Dropping the receiver lets late workers of an aborted batch exit
        drop(results_rx);
        let joined = join_all(workers);

        let envelopes = collected?;
        joined?;

        let report = BatchReport::from_envelopes(self.mode, envelopes, total_elapsed_secs);
        reporter.batch_completed(&report)?;

        info!(
            tasks = report.len(),
            total_secs = report.total_elapsed_secs,
            "batch complete"
        );
        Ok(report)
    }

    fn spawn_per_task(
        &self,
        numbers: &[i64],
        results: &Sender<ResultEnvelope>,
        workers: &mut Vec<WorkerHandle>,
    ) -> Result<(), DispatchError> {
        for (id, &n) in numbers.iter().enumerate() {
            let handle = spawn_task_worker(
                self.spawner.as_ref(),
                id,
                n,
                self.predicate.clone(),
                results.clone(),
            )?;
            workers.push(handle);
        }
        Ok(())
    }

    fn spawn_pool(
        &self,
        numbers: &[i64],
        size: usize,
        results: &Sender<ResultEnvelope>,
        workers: &mut Vec<WorkerHandle>,
    ) -> Result<(), DispatchError> {
        let (jobs_tx, jobs_rx) = channel::unbounded();
        for &n in numbers {
            // Receiver is still held here; send cannot fail
            let _ = jobs_tx.send(n);
        }
        // Closed queue: pool workers exit once it is drained
        drop(jobs_tx);

        for id in 0..size.min(numbers.len()) {
            let handle = spawn_pool_worker(
                self.spawner.as_ref(),
                id,
                jobs_rx.clone(),
                self.predicate.clone(),
                results.clone(),
            )?;
            workers.push(handle);
        }
        Ok(())
    }
}

/// Receive exactly `expected` envelopes, reporting each as it arrives
fn collect(
    results: &Receiver<ResultEnvelope>,
    expected: usize,
    reporter: &mut dyn Reporter,
) -> Result<Vec<ResultEnvelope>, DispatchError> {
    let mut envelopes = Vec::with_capacity(expected);

    for _ in 0..expected {
        let envelope = results.recv().map_err(|_| DispatchError::LostResult {
            expected,
            received: envelopes.len(),
        })?;
        debug!(n = envelope.n, worker_id = envelope.worker_id, "result received");

        match &envelope.outcome {
            Ok(result) => reporter.task_completed(envelope.n, result)?,
            Err(failure) => {
                reporter.task_failed(envelope.n, failure)?;
                return Err(DispatchError::TaskFailed {
                    n: envelope.n,
                    worker_id: envelope.worker_id,
                    failure: failure.clone(),
                });
            }
        }
        envelopes.push(envelope);
    }

    Ok(envelopes)
}

/// Join every worker; the first abnormal exit is returned after all are joined
fn join_all(workers: Vec<WorkerHandle>) -> Result<(), DispatchError> {
    let mut first_error = None;
    for worker in workers {
        let id = worker.id();
        if let Err(err) = worker.join() {
            warn!(worker_id = id, "worker terminated abnormally");
            first_error.get_or_insert(err);
        }
    }
    match first_error {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
