//! primefan CLI entry point

use anyhow::{Context, Result};
use primefan::config::{cli::Cli, toml::load_config, validator::validate_config, Config};
use primefan::dispatcher::Dispatcher;
use primefan::evaluator::trial_division::TrialDivision;
use primefan::output::{json::write_json_report, text::TextReporter};
use std::io;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();
    cli.validate()?;

    // Build configuration (TOML file first, CLI overrides)
    let config = load_config(&cli)?;

    init_logging(config.runtime.debug)?;

    validate_config(&config).context("Configuration validation failed")?;

    if config.runtime.dry_run {
        print!("{}", config);
        println!();
        println!("Dry run mode - configuration validated successfully");
        return Ok(());
    }

    run_batch(&config)
}

/// Dispatch the configured batch and write its reports
fn run_batch(config: &Config) -> Result<()> {
    let dispatcher =
        Dispatcher::new(Arc::new(TrialDivision)).with_mode(config.workers.dispatch_mode());

    let stdout = io::stdout();
    let mut reporter = TextReporter::new(stdout.lock()).with_summary(config.output.summary);

    let report = dispatcher
        .run_batch(&config.batch.numbers, &mut reporter)
        .context("Batch aborted")?;

    if let Some(ref path) = config.output.json_output {
        write_json_report(path, &report)?;
        info!(path = %path.display(), "JSON report written");
    }

    Ok(())
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` wins when set; otherwise warnings only, or debug with `--debug`.
fn init_logging(debug: bool) -> Result<()> {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_thread_names(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install log subscriber")?;
    Ok(())
}
