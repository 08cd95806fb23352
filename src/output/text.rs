//! Human-readable text output

use super::Reporter;
use crate::dispatcher::BatchReport;
use crate::evaluator::TaskResult;
use crate::util::time::format_seconds;
use crate::worker::TaskFailure;
use std::io::{self, Write};

/// Writes one line per task as results arrive, then the total time
///
/// Line format:
///
/// ```text
///                2  P  0.000001s
///                4     0.000001s
/// Total time: 0.00s
/// ```
pub struct TextReporter<W: Write> {
    out: W,
    summary: bool,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, summary: false }
    }

    /// Also print a summary block after the total time
    pub fn with_summary(mut self, summary: bool) -> Self {
        self.summary = summary;
        self
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn task_completed(&mut self, n: i64, result: &TaskResult) -> io::Result<()> {
        writeln!(self.out, "{}", format_task_line(n, result))?;
        self.out.flush()
    }

    fn task_failed(&mut self, n: i64, failure: &TaskFailure) -> io::Result<()> {
        writeln!(self.out, "{:>16}  ! error: {}", n, failure)?;
        self.out.flush()
    }

    fn batch_completed(&mut self, report: &BatchReport) -> io::Result<()> {
        writeln!(self.out, "{}", format_total_line(report.total_elapsed_secs))?;
        if self.summary {
            write_summary(&mut self.out, report)?;
        }
        self.out.flush()
    }
}

/// Format one task line: number, prime marker, elapsed seconds
pub fn format_task_line(n: i64, result: &TaskResult) -> String {
    let label = if result.is_prime { 'P' } else { ' ' };
    format!("{:>16}  {} {:9.6}s", n, label, result.elapsed_secs)
}

/// Format the final batch line
pub fn format_total_line(total_elapsed_secs: f64) -> String {
    format!("Total time: {:.2}s", total_elapsed_secs)
}

fn write_summary<W: Write>(out: &mut W, report: &BatchReport) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Summary:")?;
    writeln!(out, "  Mode:     {}", report.mode)?;
    writeln!(out, "  Tasks:    {} ({} prime)", report.len(), report.prime_count())?;
    writeln!(out, "  Busy:     {}", format_seconds(report.sum_elapsed_secs()))?;
    if let Some(slowest) = report.slowest() {
        writeln!(
            out,
            "  Slowest:  {} ({})",
            slowest.n,
            format_seconds(slowest.elapsed_secs)
        )?;
    }
    writeln!(out, "  Speedup:  {:.2}x", report.speedup())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::{DispatchMode, TaskRecord};

    fn record(n: i64, is_prime: bool, elapsed_secs: f64) -> TaskRecord {
        TaskRecord {
            n,
            worker_id: 0,
            is_prime,
            elapsed_secs,
        }
    }

    #[test]
    fn test_task_line_prime() {
        let line = format_task_line(
            2,
            &TaskResult {
                is_prime: true,
                elapsed_secs: 0.000001,
            },
        );
        assert_eq!(line, format!("{}2  P  0.000001s", " ".repeat(15)));
    }

    #[test]
    fn test_task_line_composite() {
        let line = format_task_line(
            9999999999999999,
            &TaskResult {
                is_prime: false,
                elapsed_secs: 12.5,
            },
        );
        assert_eq!(line, "9999999999999999    12.500000s");
    }

    #[test]
    fn test_total_line() {
        assert_eq!(format_total_line(1.234), "Total time: 1.23s");
        assert_eq!(format_total_line(0.0), "Total time: 0.00s");
    }

    #[test]
    fn test_reporter_writes_lines_in_call_order() {
        let mut reporter = TextReporter::new(Vec::new());
        reporter
            .task_completed(4, &TaskResult { is_prime: false, elapsed_secs: 0.5 })
            .unwrap();
        reporter
            .task_completed(3, &TaskResult { is_prime: true, elapsed_secs: 0.25 })
            .unwrap();
        let report = BatchReport {
            mode: DispatchMode::PerTask,
            tasks: vec![record(4, false, 0.5), record(3, true, 0.25)],
            total_elapsed_secs: 0.5,
        };
        reporter.batch_completed(&report).unwrap();

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].trim_start().starts_with("4 "));
        assert!(lines[1].contains(" P "));
        assert_eq!(lines[2], "Total time: 0.50s");
    }

    #[test]
    fn test_failure_line() {
        let mut reporter = TextReporter::new(Vec::new());
        reporter
            .task_failed(6, &TaskFailure::Panicked("overflow".to_string()))
            .unwrap();

        let output = String::from_utf8(reporter.into_inner()).unwrap();
        assert_eq!(
            output,
            format!("{}6  ! error: worker panicked: overflow\n", " ".repeat(15))
        );
    }

    #[test]
    fn test_summary_only_when_requested() {
        let report = BatchReport {
            mode: DispatchMode::Pool { workers: 2 },
            tasks: vec![record(5, true, 0.75), record(6, false, 0.25)],
            total_elapsed_secs: 0.5,
        };

        let mut plain = TextReporter::new(Vec::new());
        plain.batch_completed(&report).unwrap();
        let plain = String::from_utf8(plain.into_inner()).unwrap();
        assert_eq!(plain, "Total time: 0.50s\n");

        let mut detailed = TextReporter::new(Vec::new()).with_summary(true);
        detailed.batch_completed(&report).unwrap();
        let detailed = String::from_utf8(detailed.into_inner()).unwrap();
        assert!(detailed.starts_with("Total time: 0.50s\n"));
        assert!(detailed.contains("Mode:     pool of 2 workers"));
        assert!(detailed.contains("Tasks:    2 (1 prime)"));
        assert!(detailed.contains("Slowest:  5 (750.00ms)"));
        assert!(detailed.contains("Speedup:  2.00x"));
    }
}
