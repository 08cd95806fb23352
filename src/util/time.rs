//! Wall-clock timing utilities
//!
//! Per-task and whole-batch timings are both taken from a monotonic clock,
//! so elapsed values are never negative.

use std::time::{Duration, Instant};

/// Monotonic timestamp used to time tasks and batches
///
/// This is a thin wrapper around `std::time::Instant` that reports elapsed
/// time in the fractional seconds used throughout primefan's output.
#[derive(Debug, Clone, Copy)]
pub struct Timestamp {
    instant: Instant,
}

impl Timestamp {
    /// Create a new timestamp representing the current time
    #[inline]
    pub fn now() -> Self {
        Self {
            instant: Instant::now(),
        }
    }

    /// Get the elapsed time since this timestamp
    #[inline]
    pub fn elapsed(&self) -> Duration {
        self.instant.elapsed()
    }

    /// Get the elapsed time in fractional seconds
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }
}

/// Format a duration given in seconds in human-readable form
///
/// # Examples
///
/// ```
/// use primefan::util::time::format_seconds;
///
/// assert_eq!(format_seconds(0.000_000_5), "500ns");
/// assert_eq!(format_seconds(0.000_001_5), "1.50us");
/// assert_eq!(format_seconds(0.002_5), "2.50ms");
/// assert_eq!(format_seconds(5.0), "5.00s");
/// ```
pub fn format_seconds(seconds: f64) -> String {
    let nanos = (seconds.max(0.0) * 1_000_000_000.0).round();

    if nanos < 1_000.0 {
        format!("{}ns", nanos as u64)
    } else if nanos < 1_000_000.0 {
        format!("{:.2}us", nanos / 1_000.0)
    } else if nanos < 1_000_000_000.0 {
        format!("{:.2}ms", nanos / 1_000_000.0)
    } else {
        format!("{:.2}s", nanos / 1_000_000_000.0)
    }
}

/// Calculate parallel speedup from summed task time and batch wall-clock time
///
/// # Arguments
///
/// * `busy_seconds` - Sum of every task's individual elapsed time
/// * `wall_seconds` - End-to-end elapsed time of the batch
///
/// # Returns
///
/// How many tasks' worth of work ran at once on average, or 0.0 when the
/// batch took no measurable time
pub fn calculate_speedup(busy_seconds: f64, wall_seconds: f64) -> f64 {
    if wall_seconds > 0.0 {
        busy_seconds / wall_seconds
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_timestamp_elapsed() {
        let start = Timestamp::now();
        thread::sleep(Duration::from_millis(10));
        let elapsed = start.elapsed();

        assert!(elapsed >= Duration::from_millis(10));
    }

    #[test]
    fn test_timestamp_elapsed_secs_non_negative() {
        let start = Timestamp::now();
        assert!(start.elapsed_secs() >= 0.0);
    }

    #[test]
    fn test_format_seconds() {
        assert_eq!(format_seconds(0.000_000_5), "500ns");
        assert_eq!(format_seconds(0.000_001_5), "1.50us");
        assert_eq!(format_seconds(0.001_5), "1.50ms");
        assert_eq!(format_seconds(1.5), "1.50s");
        assert_eq!(format_seconds(-1.0), "0ns");
    }

    #[test]
    fn test_calculate_speedup() {
        assert_eq!(calculate_speedup(4.0, 2.0), 2.0);
    }

    #[test]
    fn test_calculate_speedup_zero_wall_time() {
        assert_eq!(calculate_speedup(1.0, 0.0), 0.0);
    }
}
