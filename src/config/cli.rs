//! CLI argument parsing using clap

use clap::Parser;
use std::path::PathBuf;

/// primefan - check a batch of integers for primality on parallel workers
#[derive(Parser, Debug)]
#[command(name = "primefan")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Integers to test, separated by spaces or commas (e.g. "2 3 4" or "2,3,4")
    ///
    /// Underscores are accepted as digit separators. Defaults to the built-in
    /// batch when neither numbers nor a config file are given.
    #[arg(value_name = "NUMBERS", allow_negative_numbers = true)]
    pub numbers: Vec<String>,

    // === Worker Options ===
    /// Use a pool of N worker threads instead of one thread per task ("auto" = CPU count)
    #[arg(short = 'w', long, value_name = "N|auto")]
    pub workers: Option<String>,

    // === Output Options ===
    /// JSON report file path
    #[arg(long)]
    pub json_output: Option<PathBuf>,

    /// Print a summary (prime count, slowest task, speedup) after the total time
    #[arg(long)]
    pub summary: bool,

    // === Configuration File ===
    /// TOML configuration file
    #[arg(short = 'c', long, env = "PRIMEFAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Dry run - validate configuration without dispatching
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging on stderr
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate CLI arguments
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(ref workers) = self.workers {
            if workers.trim().is_empty() {
                anyhow::bail!("--workers must not be empty");
            }
        }
        Ok(())
    }
}
