//! Result output
//!
//! - `text`: completion-order console lines and the total time
//! - `json`: machine-readable batch report written after the batch

pub mod json;
pub mod text;

use crate::dispatcher::BatchReport;
use crate::evaluator::TaskResult;
use crate::worker::TaskFailure;
use std::io;

/// Sink for batch progress
///
/// The dispatcher calls `task_completed` / `task_failed` from its collection
/// loop as envelopes arrive, and `batch_completed` once after all workers
/// have been joined. `batch_completed` is not called for an aborted batch.
pub trait Reporter {
    /// A task finished with a result
    fn task_completed(&mut self, n: i64, result: &TaskResult) -> io::Result<()>;

    /// A task's worker reported a failure instead of a result
    fn task_failed(&mut self, n: i64, failure: &TaskFailure) -> io::Result<()>;

    /// The whole batch finished
    fn batch_completed(&mut self, report: &BatchReport) -> io::Result<()>;
}
