//! Worker thread implementation
//!
//! A worker is an OS thread that evaluates tasks and reports each outcome on
//! the batch's shared result channel as a `ResultEnvelope`.
//!
//! # Worker Kinds
//!
//! - **Task worker**: owns exactly one task, sends exactly one envelope, exits
//! - **Pool worker**: pulls tasks from a shared job queue until it is closed,
//!   sending one envelope per task
//!
//! # Failure Envelopes
//!
//! Evaluation runs under `catch_unwind`. A predicate error or a panic becomes
//! an `Err(TaskFailure)` envelope sent on the same channel, so the dispatcher
//! always hears back about every task a worker picked up.
//!
//! # Thread Safety
//!
//! Workers share nothing mutable. Each holds its own `Sender` clone and an
//! `Arc` of the batch's predicate.

use crate::error::DispatchError;
use crate::evaluator::{evaluate, PredicateError, PrimalityTest, TaskResult};
use crossbeam::channel::{Receiver, Sender};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// Why a task produced no `TaskResult`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum TaskFailure {
    /// The predicate returned an error
    #[error(transparent)]
    Predicate(#[from] PredicateError),

    /// The predicate panicked
    #[error("worker panicked: {0}")]
    Panicked(String),
}

/// One task's outcome as transmitted back to the dispatcher
#[derive(Debug, Clone)]
pub struct ResultEnvelope {
    /// The task's integer
    pub n: i64,
    /// Worker that evaluated the task
    pub worker_id: usize,
    /// Result, or the failure that replaced it
    pub outcome: Result<TaskResult, TaskFailure>,
}

/// Handle to a spawned worker thread
///
/// Owned by the dispatcher only so it can join the thread; carries no data.
#[derive(Debug)]
pub struct WorkerHandle {
    id: usize,
    thread: JoinHandle<()>,
}

impl WorkerHandle {
    /// Worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Wait for the worker thread to exit
    pub fn join(self) -> Result<(), DispatchError> {
        let worker_id = self.id;
        self.thread
            .join()
            .map_err(|_| DispatchError::WorkerJoin { worker_id })
    }
}

/// Starts the OS thread behind a worker
///
/// `OsThreads` is the production spawner. The dispatcher only ever spawns
/// through this trait, so a refused spawn can be reproduced on demand.
pub trait ThreadSpawner: Send + Sync {
    /// Start `body` on a new thread called `name`
    fn spawn(
        &self,
        name: String,
        body: Box<dyn FnOnce() + Send + 'static>,
    ) -> io::Result<JoinHandle<()>>;
}

/// Spawns named `std::thread`s
#[derive(Debug, Clone, Copy, Default)]
pub struct OsThreads;

impl ThreadSpawner for OsThreads {
    fn spawn(
        &self,
        name: String,
        body: Box<dyn FnOnce() + Send + 'static>,
    ) -> io::Result<JoinHandle<()>> {
        thread::Builder::new().name(name).spawn(body)
    }
}

/// Spawn a worker that evaluates exactly one task
///
/// The worker sends one envelope for `n` and exits. Spawning does not wait for
/// the evaluation to start.
pub fn spawn_task_worker(
    spawner: &dyn ThreadSpawner,
    id: usize,
    n: i64,
    predicate: Arc<dyn PrimalityTest>,
    results: Sender<ResultEnvelope>,
) -> Result<WorkerHandle, DispatchError> {
    spawn_named(spawner, id, move || {
        send_envelope(id, n, check(predicate.as_ref(), n), &results);
    })
}

/// Spawn a pool worker that drains `jobs` until the queue is closed and empty
pub fn spawn_pool_worker(
    spawner: &dyn ThreadSpawner,
    id: usize,
    jobs: Receiver<i64>,
    predicate: Arc<dyn PrimalityTest>,
    results: Sender<ResultEnvelope>,
) -> Result<WorkerHandle, DispatchError> {
    spawn_named(spawner, id, move || {
        let mut handled = 0usize;
        for n in jobs.iter() {
            send_envelope(id, n, check(predicate.as_ref(), n), &results);
            handled += 1;
        }
        debug!(worker_id = id, handled, "pool worker drained job queue");
    })
}

fn spawn_named<F>(
    spawner: &dyn ThreadSpawner,
    id: usize,
    body: F,
) -> Result<WorkerHandle, DispatchError>
where
    F: FnOnce() + Send + 'static,
{
    let thread = spawner
        .spawn(format!("primefan-worker-{}", id), Box::new(body))
        .map_err(|source| DispatchError::WorkerSpawn {
            worker_id: id,
            source,
        })?;

    debug!(worker_id = id, "worker spawned");
    Ok(WorkerHandle { id, thread })
}

/// Evaluate `n`, turning predicate errors and panics into `TaskFailure`
pub fn check(predicate: &dyn PrimalityTest, n: i64) -> Result<TaskResult, TaskFailure> {
    match panic::catch_unwind(AssertUnwindSafe(|| evaluate(predicate, n))) {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(err)) => Err(TaskFailure::Predicate(err)),
        Err(payload) => Err(TaskFailure::Panicked(panic_message(payload.as_ref()))),
    }
}

fn send_envelope(
    worker_id: usize,
    n: i64,
    outcome: Result<TaskResult, TaskFailure>,
    results: &Sender<ResultEnvelope>,
) {
    if let Err(failure) = &outcome {
        warn!(worker_id, n, %failure, "task failed");
    }

    let envelope = ResultEnvelope {
        n,
        worker_id,
        outcome,
    };
    // Receiver is only gone once the dispatcher has already aborted the batch
    if results.send(envelope).is_err() {
        debug!(worker_id, n, "dispatcher stopped collecting; result dropped");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
