//! Configuration validation

use super::*;
use anyhow::Result;
use tracing::warn;

/// Fan-out above which per-task mode gets a warning
pub const LARGE_FAN_OUT: usize = 4096;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_workers(&config.workers)?;
    validate_output(&config.output)?;
    check_fan_out(config);

    Ok(())
}

/// Validate worker configuration
pub fn validate_workers(workers: &WorkerConfig) -> Result<()> {
    if let Some(WorkerLimit::Fixed(0)) = workers.max_workers {
        anyhow::bail!("max_workers must be at least 1 (omit it for one worker per task)");
    }

    Ok(())
}

/// Validate output configuration
pub fn validate_output(output: &OutputConfig) -> Result<()> {
    if let Some(ref path) = output.json_output {
        if path.as_os_str().is_empty() {
            anyhow::bail!("json_output path must not be empty");
        }
        if path.is_dir() {
            anyhow::bail!("json_output must be a file path, got directory {}", path.display());
        }
    }

    Ok(())
}

/// Per-task mode starts one thread per number; warn when that is a lot of threads
fn check_fan_out(config: &Config) {
    let tasks = config.batch.numbers.len();
    if config.workers.max_workers.is_none() && tasks > LARGE_FAN_OUT {
        warn!(
            tasks,
            "one worker thread per task; consider --workers to bound the number of threads"
        );
    }
}
