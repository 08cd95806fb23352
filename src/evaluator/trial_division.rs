//! Trial-division primality test

use super::{PredicateError, PrimalityTest};

/// Trial division by odd divisors up to the integer square root
///
/// Numbers below 2 are not prime. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrialDivision;

impl PrimalityTest for TrialDivision {
    fn is_prime(&self, n: i64) -> Result<bool, PredicateError> {
        Ok(is_prime(n))
    }
}

/// Decide primality of `n` by trial division
pub fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    let n = n as u64;
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let root = isqrt(n);
    let mut divisor = 3;
    while divisor <= root {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Largest `r` with `r * r <= n`
fn isqrt(n: u64) -> u64 {
    // f64 sqrt is off by at most one for 64-bit inputs; correct both ways
    let mut root = (n as f64).sqrt() as u64;
    while root.checked_mul(root).map_or(true, |sq| sq > n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).map_or(false, |sq| sq <= n) {
        root += 1;
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_primes() {
        let primes: Vec<i64> = (0..30).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
    }

    #[test]
    fn test_negative_and_unit() {
        assert!(!is_prime(i64::MIN));
        assert!(!is_prime(-2));
        assert!(!is_prime(0));
        assert!(!is_prime(1));
    }

    #[test]
    fn test_perfect_squares_of_primes() {
        assert!(!is_prime(9));
        assert!(!is_prime(49));
        assert!(!is_prime(999_983 * 999_983));
    }

    #[test]
    fn test_larger_values() {
        assert!(is_prime(999_983));
        assert!(is_prime(1_000_003));
        assert!(!is_prime(1_000_001)); // 101 * 9901
    }

    #[test]
    fn test_isqrt() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
        assert_eq!(isqrt(u64::MAX), u32::MAX as u64);
        assert_eq!(isqrt(9_999_999_999_999_999), 99_999_999);
    }

    #[test]
    fn test_trait_impl_never_fails() {
        assert_eq!(TrialDivision.is_prime(7), Ok(true));
        assert_eq!(TrialDivision.is_prime(-7), Ok(false));
    }
}
