//! JSON output formatting
//!
//! Writes a finished batch as a single pretty-printed JSON document:
//! per-task records in completion order plus batch totals.

use crate::dispatcher::{BatchReport, DispatchMode, TaskRecord};
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Top-level JSON document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonReport {
    /// Tool version that produced the report
    pub version: String,
    /// RFC 3339 UTC timestamp of when the report was written
    pub generated_at: String,
    pub mode: DispatchMode,
    pub summary: JsonSummary,
    pub tasks: Vec<TaskRecord>,
}

/// Batch totals
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonSummary {
    pub task_count: usize,
    pub prime_count: usize,
    pub total_elapsed_secs: f64,
    pub sum_elapsed_secs: f64,
    pub max_elapsed_secs: f64,
    pub speedup: f64,
}

impl JsonReport {
    pub fn from_report(report: &BatchReport) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
            mode: report.mode,
            summary: JsonSummary {
                task_count: report.len(),
                prime_count: report.prime_count(),
                total_elapsed_secs: report.total_elapsed_secs,
                sum_elapsed_secs: report.sum_elapsed_secs(),
                max_elapsed_secs: report.max_elapsed_secs(),
                speedup: report.speedup(),
            },
            tasks: report.tasks.clone(),
        }
    }
}

/// Write `report` as JSON to `path`, replacing any existing file
pub fn write_json_report(path: &Path, report: &BatchReport) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create JSON output file: {}", path.display()))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &JsonReport::from_report(report))
        .with_context(|| format!("Failed to write JSON report: {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush JSON report: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> BatchReport {
        BatchReport {
            mode: DispatchMode::Pool { workers: 2 },
            tasks: vec![
                TaskRecord {
                    n: 3,
                    worker_id: 1,
                    is_prime: true,
                    elapsed_secs: 0.5,
                },
                TaskRecord {
                    n: 4,
                    worker_id: 0,
                    is_prime: false,
                    elapsed_secs: 0.25,
                },
            ],
            total_elapsed_secs: 0.5,
        }
    }

    #[test]
    fn test_json_report_fields() {
        let json = serde_json::to_value(JsonReport::from_report(&sample())).unwrap();

        assert_eq!(json["mode"]["kind"], "pool");
        assert_eq!(json["mode"]["workers"], 2);
        assert_eq!(json["summary"]["task_count"], 2);
        assert_eq!(json["summary"]["prime_count"], 1);
        assert_eq!(json["summary"]["speedup"], 1.5);
        assert_eq!(json["tasks"][0]["n"], 3);
        assert_eq!(json["tasks"][1]["is_prime"], false);
    }

    #[test]
    fn test_write_json_report() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.json");

        write_json_report(&path, &sample()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let parsed: JsonReport = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.tasks, sample().tasks);
        assert_eq!(parsed.mode, DispatchMode::Pool { workers: 2 });
    }

    #[test]
    fn test_write_json_report_bad_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("report.json");

        let err = write_json_report(&path, &sample()).unwrap_err();
        assert!(err.to_string().contains("Failed to create JSON output file"));
    }
}
