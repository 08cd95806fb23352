//! TOML configuration file parsing
//!
//! ```toml
//! [batch]
//! numbers = [2, 3, 4, 1_000_003]
//!
//! [workers]
//! max_workers = "auto"   # or a positive integer; omit for one worker per task
//!
//! [output]
//! json_output = "primes.json"
//! summary = true
//!
//! [runtime]
//! debug = false
//! ```

use super::*;
use crate::config::cli::Cli;
use crate::config::cli_convert::{parse_numbers, parse_worker_limit};
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: Config) -> Result<Config> {
    // Override batch
    if !cli.numbers.is_empty() {
        config.batch.numbers = parse_numbers(&cli.numbers).context("Invalid NUMBERS")?;
    }

    // Override worker settings
    if let Some(ref workers) = cli.workers {
        config.workers.max_workers = Some(parse_worker_limit(workers)?);
    }

    // Override output settings
    if let Some(ref path) = cli.json_output {
        config.output.json_output = Some(path.clone());
    }
    if cli.summary {
        config.output.summary = true;
    }

    // Override runtime settings
    if cli.dry_run {
        config.runtime.dry_run = true;
    }
    if cli.debug {
        config.runtime.debug = true;
    }

    Ok(config)
}

/// Build the run configuration: TOML file (if any), then CLI overrides
pub fn load_config(cli: &Cli) -> Result<Config> {
    let base = match cli.config {
        Some(ref path) => parse_toml_file(path)?,
        None => Config::default(),
    };

    merge_cli_with_config(cli, base)
}
