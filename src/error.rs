//! Dispatch error taxonomy

use crate::worker::TaskFailure;

/// Errors that abort a batch
///
/// There is no retry and no partial result: any of these ends the batch after
/// every worker that was already started has been joined.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The OS refused to start another worker thread
    #[error("failed to spawn worker {worker_id}")]
    WorkerSpawn {
        worker_id: usize,
        #[source]
        source: std::io::Error,
    },

    /// A worker reported a failure envelope for its task
    #[error("task {n} failed on worker {worker_id}")]
    TaskFailed {
        n: i64,
        worker_id: usize,
        #[source]
        failure: TaskFailure,
    },

    /// Every worker exited but fewer envelopes than tasks arrived
    #[error("lost results: expected {expected}, received {received} before all workers exited")]
    LostResult { expected: usize, received: usize },

    /// A worker thread terminated abnormally outside of task evaluation
    #[error("worker {worker_id} terminated abnormally")]
    WorkerJoin { worker_id: usize },

    /// Writing a report line failed
    #[error("failed to write report")]
    Report(#[from] std::io::Error),
}
