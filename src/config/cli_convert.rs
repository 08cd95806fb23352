//! CLI to Config conversion utilities

use crate::config::WorkerLimit;
use anyhow::{Context, Result};

/// Parse number arguments into a batch
///
/// Each argument may hold several integers separated by commas or whitespace.
/// Underscores inside a number are ignored ("1_000_003").
pub fn parse_numbers<S: AsRef<str>>(args: &[S]) -> Result<Vec<i64>> {
    let mut numbers = Vec::new();

    for arg in args {
        for token in arg
            .as_ref()
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            let digits = token.replace('_', "");
            let n: i64 = digits
                .parse()
                .with_context(|| format!("Invalid integer: {}", token))?;
            numbers.push(n);
        }
    }

    Ok(numbers)
}

/// Parse a worker limit ("auto" or a positive count)
pub fn parse_worker_limit(s: &str) -> Result<WorkerLimit> {
    let s = s.trim();

    if s.eq_ignore_ascii_case("auto") {
        return Ok(WorkerLimit::Auto);
    }

    let count: usize = s
        .parse()
        .with_context(|| format!("Invalid worker count: {} (expected a number or \"auto\")", s))?;

    Ok(WorkerLimit::Fixed(count))
}
