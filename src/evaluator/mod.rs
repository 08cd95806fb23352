//! Task evaluation
//!
//! This module defines the primality predicate abstraction and the timed
//! evaluation of a single task. The predicate is a collaborator: any correct
//! implementation of `PrimalityTest` can be plugged into the dispatcher.
//!
//! # Predicates
//!
//! - **TrialDivision**: odd-divisor trial division up to the integer square root
//! - **MockPredicate**: scripted answers, failures, panics and delays for tests
//!
//! # Example
//!
//! ```
//! use primefan::evaluator::{evaluate, trial_division::TrialDivision};
//!
//! let result = evaluate(&TrialDivision, 7919)?;
//! assert!(result.is_prime);
//! assert!(result.elapsed_secs >= 0.0);
//! # Ok::<(), primefan::evaluator::PredicateError>(())
//! ```

pub mod mock;
pub mod trial_division;

use crate::util::time::Timestamp;
use serde::{Deserialize, Serialize};

/// Failure reported by a primality predicate
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum PredicateError {
    /// The predicate refused to decide for this input
    #[error("primality test rejected {n}: {reason}")]
    Rejected { n: i64, reason: String },
}

/// Primality predicate
///
/// Implementations must be `Send + Sync` because a single predicate instance
/// is shared by every worker thread of a batch.
///
/// # Contract
///
/// - Deterministic: the same `n` always yields the same answer
/// - Pure: no I/O and no observable shared-state mutation
/// - Inputs below 2 are decided by the implementation, not rejected by callers
pub trait PrimalityTest: Send + Sync {
    /// Decide whether `n` is prime
    ///
    /// # Errors
    ///
    /// Returns `PredicateError` when the implementation cannot decide for `n`.
    /// Evaluation does not mask the error.
    fn is_prime(&self, n: i64) -> Result<bool, PredicateError>;
}

/// Outcome of one successful task evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    /// Whether the task's integer is prime
    pub is_prime: bool,
    /// Wall-clock seconds spent inside the predicate
    pub elapsed_secs: f64,
}

/// Evaluate one task: time a single primality check
///
/// Records a start timestamp, runs the predicate on `n`, and returns the
/// answer together with the elapsed wall-clock time. Predicate errors are
/// propagated unchanged.
pub fn evaluate(predicate: &dyn PrimalityTest, n: i64) -> Result<TaskResult, PredicateError> {
    let start = Timestamp::now();
    let is_prime = predicate.is_prime(n)?;

    Ok(TaskResult {
        is_prime,
        elapsed_secs: start.elapsed_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::mock::{MockBehavior, MockPredicate};
    use super::trial_division::TrialDivision;
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_evaluate_prime() {
        let result = evaluate(&TrialDivision, 3).unwrap();
        assert!(result.is_prime);
        assert!(result.elapsed_secs >= 0.0);
    }

    #[test]
    fn test_evaluate_composite() {
        let result = evaluate(&TrialDivision, 4).unwrap();
        assert!(!result.is_prime);
    }

    #[test]
    fn test_evaluate_below_two() {
        for n in [-7, 0, 1] {
            assert!(!evaluate(&TrialDivision, n).unwrap().is_prime, "{} is not prime", n);
        }
    }

    #[test]
    fn test_evaluate_is_deterministic() {
        let first = evaluate(&TrialDivision, 999_983).unwrap();
        let second = evaluate(&TrialDivision, 999_983).unwrap();
        assert_eq!(first.is_prime, second.is_prime);
    }

    #[test]
    fn test_evaluate_measures_predicate_time() {
        let predicate =
            MockPredicate::new().with(11, MockBehavior::Delay(Duration::from_millis(20)));
        let result = evaluate(&predicate, 11).unwrap();

        assert!(result.is_prime);
        assert!(result.elapsed_secs >= 0.020);
    }

    #[test]
    fn test_evaluate_propagates_predicate_error() {
        let predicate = MockPredicate::new().with(9, MockBehavior::Fail("unsupported".to_string()));
        let err = evaluate(&predicate, 9).unwrap_err();

        assert_eq!(
            err,
            PredicateError::Rejected {
                n: 9,
                reason: "unsupported".to_string()
            }
        );
    }
}
