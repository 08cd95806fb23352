//! primefan - Parallel primality batch dispatcher
//!
//! primefan takes a fixed batch of integers, hands each one to its own worker
//! thread for a primality check, and reports every result as soon as it comes
//! back, followed by the wall-clock time for the whole batch.
//!
//! # Architecture
//!
//! - **Evaluator**: times one primality check behind the `PrimalityTest` trait
//! - **Workers**: OS threads that evaluate tasks and send result envelopes
//! - **Dispatcher**: fans tasks out, collects envelopes in completion order
//! - **Output**: console lines, optional summary, optional JSON report

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod evaluator;
pub mod output;
pub mod util;
pub mod worker;

// Re-export commonly used types
pub use config::Config;
pub use dispatcher::{BatchReport, DispatchMode, Dispatcher};
pub use error::DispatchError;
pub use evaluator::{evaluate, PrimalityTest, TaskResult};

/// Result type used throughout primefan
pub type Result<T> = anyhow::Result<T>;
