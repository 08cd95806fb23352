//! Mock primality predicate for testing
//!
//! This module provides a scripted implementation of the `PrimalityTest` trait.
//! Individual inputs can be told to answer a fixed value, fail, panic, or
//! sleep before answering; every other input falls back to trial division.
//!
//! # Features
//!
//! - Per-input scripted behavior
//! - Records every input it was asked about (in call order), and separately
//!   every input whose evaluation returned
//! - Shareable across threads; clones share the call log
//!
//! # Example
//!
//! ```
//! use primefan::evaluator::PrimalityTest;
//! use primefan::evaluator::mock::{MockBehavior, MockPredicate};
//!
//! let predicate = MockPredicate::new().with(4, MockBehavior::Answer(true));
//!
//! assert_eq!(predicate.is_prime(4), Ok(true));
//! assert_eq!(predicate.is_prime(5), Ok(true));
//! assert_eq!(predicate.calls(), vec![4, 5]);
//! ```

use super::trial_division;
use super::{PredicateError, PrimalityTest};
use crossbeam::channel::Receiver;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted behavior for one input
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return this answer regardless of the real primality
    Answer(bool),
    /// Sleep, then answer with trial division
    Delay(Duration),
    /// Fail with `PredicateError::Rejected` carrying this reason
    Fail(String),
    /// Panic with this message
    Panic(String),
    /// Block until `count` signals arrive (or every sender is gone), then
    /// answer with trial division
    AwaitSignals { signals: Receiver<()>, count: usize },
}

/// Scripted primality predicate
#[derive(Debug, Clone, Default)]
pub struct MockPredicate {
    behaviors: HashMap<i64, MockBehavior>,
    calls: Arc<Mutex<Vec<i64>>>,
    completed: Arc<Mutex<Vec<i64>>>,
}

impl MockPredicate {
    /// Create a mock that behaves like trial division for every input
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the behavior for input `n`
    pub fn with(mut self, n: i64, behavior: MockBehavior) -> Self {
        self.behaviors.insert(n, behavior);
        self
    }

    /// Inputs evaluated so far, in call order
    pub fn calls(&self) -> Vec<i64> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of evaluations so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Inputs whose evaluation has returned (answer or error), in return order
    pub fn completed(&self) -> Vec<i64> {
        self.completed.lock().unwrap().clone()
    }

    /// Number of evaluations that have returned
    pub fn completed_count(&self) -> usize {
        self.completed.lock().unwrap().len()
    }
}

impl PrimalityTest for MockPredicate {
    fn is_prime(&self, n: i64) -> Result<bool, PredicateError> {
        // Guard is dropped here, before any scripted panic
        self.calls.lock().unwrap().push(n);

        let outcome = match self.behaviors.get(&n) {
            Some(MockBehavior::Answer(answer)) => Ok(*answer),
            Some(MockBehavior::Delay(delay)) => {
                std::thread::sleep(*delay);
                Ok(trial_division::is_prime(n))
            }
            Some(MockBehavior::Fail(reason)) => Err(PredicateError::Rejected {
                n,
                reason: reason.clone(),
            }),
            Some(MockBehavior::Panic(message)) => panic!("{}", message),
            Some(MockBehavior::AwaitSignals { signals, count }) => {
                for _ in 0..*count {
                    if signals.recv().is_err() {
                        break;
                    }
                }
                Ok(trial_division::is_prime(n))
            }
            None => Ok(trial_division::is_prime(n)),
        };

        self.completed.lock().unwrap().push(n);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_falls_back_to_trial_division() {
        let predicate = MockPredicate::new();
        assert_eq!(predicate.is_prime(13), Ok(true));
        assert_eq!(predicate.is_prime(15), Ok(false));
    }

    #[test]
    fn test_mock_scripted_answer() {
        let predicate = MockPredicate::new().with(15, MockBehavior::Answer(true));
        assert_eq!(predicate.is_prime(15), Ok(true));
    }

    #[test]
    fn test_mock_failure() {
        let predicate = MockPredicate::new().with(8, MockBehavior::Fail("boom".to_string()));
        assert!(matches!(
            predicate.is_prime(8),
            Err(PredicateError::Rejected { n: 8, .. })
        ));
    }

    #[test]
    fn test_mock_panic_keeps_call_log_usable() {
        let predicate = MockPredicate::new().with(6, MockBehavior::Panic("kaboom".to_string()));
        let cloned = predicate.clone();

        let outcome =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || cloned.is_prime(6)));
        assert!(outcome.is_err());
        assert_eq!(predicate.calls(), vec![6]);
        assert!(predicate.completed().is_empty());
    }

    #[test]
    fn test_mock_completion_recorded_on_return() {
        let (tx, rx) = crossbeam::channel::unbounded();
        let predicate = MockPredicate::new().with(
            11,
            MockBehavior::AwaitSignals {
                signals: rx,
                count: 2,
            },
        );
        let worker = {
            let predicate = predicate.clone();
            std::thread::spawn(move || predicate.is_prime(11))
        };

        while predicate.call_count() == 0 {
            std::thread::yield_now();
        }
        // Called but still blocked on its signals
        assert!(predicate.completed().is_empty());

        tx.send(()).unwrap();
        tx.send(()).unwrap();
        assert_eq!(worker.join().unwrap(), Ok(true));
        assert_eq!(predicate.completed(), vec![11]);
    }

    #[test]
    fn test_mock_delay_answers_after_sleep() {
        let predicate =
            MockPredicate::new().with(9, MockBehavior::Delay(Duration::from_millis(5)));
        assert_eq!(predicate.is_prime(9), Ok(false));
        assert_eq!(predicate.completed_count(), 1);
    }

    #[test]
    fn test_mock_clones_share_call_log() {
        let predicate = MockPredicate::new();
        let cloned = predicate.clone();

        cloned.is_prime(2).unwrap();
        cloned.is_prime(3).unwrap();
        assert_eq!(predicate.call_count(), 2);
    }
}
