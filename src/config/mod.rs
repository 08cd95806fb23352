//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.

pub mod cli;
pub mod cli_convert;
pub mod toml;
pub mod validator;

use crate::dispatcher::DispatchMode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The batch tested when no numbers are given on the command line or in a
/// config file
pub const DEFAULT_NUMBERS: [i64; 20] = [
    2,
    142702110479723,
    299593572317531,
    3333333333333301,
    3333333333333333,
    3333335652092209,
    4444444444444423,
    4444444444444444,
    4444444488888889,
    5555553133149889,
    5555555555555503,
    5555555555555555,
    6666666666666666,
    6666666666666719,
    6666667141414921,
    7777777536340681,
    7777777777777753,
    7777777777777777,
    9999999999999917,
    9999999999999999,
];

/// Complete run configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub workers: WorkerConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// Batch input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Integers to test, in dispatch order; duplicates are separate tasks
    #[serde(default = "default_numbers")]
    pub numbers: Vec<i64>,
}

fn default_numbers() -> Vec<i64> {
    DEFAULT_NUMBERS.to_vec()
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            numbers: default_numbers(),
        }
    }
}

/// Worker configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Cap on concurrent worker threads; `None` spawns one worker per task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_workers: Option<WorkerLimit>,
}

impl WorkerConfig {
    /// Dispatch mode implied by this configuration
    pub fn dispatch_mode(&self) -> DispatchMode {
        match self.max_workers {
            None => DispatchMode::PerTask,
            Some(limit) => DispatchMode::Pool {
                workers: limit.resolve(),
            },
        }
    }
}

/// Worker pool size
///
/// In TOML this is either a positive integer or the string `"auto"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WorkerLimitRepr", into = "WorkerLimitRepr")]
pub enum WorkerLimit {
    /// One worker per logical CPU
    Auto,
    /// Exactly this many workers
    Fixed(usize),
}

impl WorkerLimit {
    /// Concrete number of pool workers
    pub fn resolve(self) -> usize {
        match self {
            Self::Auto => num_cpus::get(),
            Self::Fixed(count) => count,
        }
    }
}

impl fmt::Display for WorkerLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto ({})", num_cpus::get()),
            Self::Fixed(count) => write!(f, "{}", count),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum WorkerLimitRepr {
    Count(usize),
    Keyword(String),
}

impl TryFrom<WorkerLimitRepr> for WorkerLimit {
    type Error = String;

    fn try_from(repr: WorkerLimitRepr) -> Result<Self, Self::Error> {
        match repr {
            WorkerLimitRepr::Count(count) => Ok(Self::Fixed(count)),
            WorkerLimitRepr::Keyword(word) if word.eq_ignore_ascii_case("auto") => Ok(Self::Auto),
            WorkerLimitRepr::Keyword(word) => Err(format!(
                "invalid max_workers '{}': expected a positive integer or \"auto\"",
                word
            )),
        }
    }
}

impl From<WorkerLimit> for WorkerLimitRepr {
    fn from(limit: WorkerLimit) -> Self {
        match limit {
            WorkerLimit::Auto => Self::Keyword("auto".to_string()),
            WorkerLimit::Fixed(count) => Self::Count(count),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JSON report file path
    pub json_output: Option<PathBuf>,
    /// Print a summary block after the total time
    #[serde(default)]
    pub summary: bool,
}

/// Runtime configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Validate and print configuration without dispatching
    #[serde(default)]
    pub dry_run: bool,
    /// Enable debug logging
    #[serde(default)]
    pub debug: bool,
}

// Display trait implementations

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Configuration:")?;
        writeln!(f, "  Batch: {}", self.batch)?;
        for n in &self.batch.numbers {
            writeln!(f, "    {:>16}", n)?;
        }
        writeln!(f, "  Workers: {} ({})", self.workers, self.workers.dispatch_mode())?;
        writeln!(f, "  Output: {}", self.output)?;
        Ok(())
    }
}

impl fmt::Display for BatchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} number(s)", self.numbers.len())
    }
}

impl fmt::Display for WorkerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max_workers {
            None => write!(f, "one per task"),
            Some(limit) => write!(f, "pool, max_workers={}", limit),
        }
    }
}

impl fmt::Display for OutputConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "text")?;
        if self.summary {
            write!(f, " + summary")?;
        }
        if let Some(ref path) = self.json_output {
            write!(f, ", json={}", path.display())?;
        }
        Ok(())
    }
}
