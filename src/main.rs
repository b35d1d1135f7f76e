//! Function Probe - integration test runner for the AI description function
//!
//! Runs six HTTP probes in order against a locally hosted function
//! (`func start`) and reports whether it is ready for deployment.
//!
//! ## Probes
//!
//! 1. Health check (`GET /health`)
//! 2. AI status (`GET /ai-status`)
//! 3. Description without images
//! 4. Description with image URLs
//! 5. Invalid request rejection
//! 6. Category sweep
//!
//! The process exits with 0 when at least 80% of the probes pass.
//!
//! ## Usage
//!
//! ```bash
//! # Run all probes against http://localhost:7071/api
//! function-probe
//!
//! # Skip the prompt and probe another host
//! function-probe --yes --base-url http://10.0.0.5:7071/api
//!
//! # Run a single probe and emit JSON
//! function-probe -y --test 5 --format json
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{BufRead, Write};
use std::process::ExitCode;
use tracing::{debug, info};

mod cli;
mod config;
mod executor;
mod http;
mod models;
mod output;
mod tests;
mod utils;

use cli::Args;
use config::{ConfigError, EnvConfig, ProbeConfig};
use executor::TestRunner;
use models::TestCase;
use output::{OutputFormat, ResultFormatter};
use utils::{init_logger, LogLevel};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    if args.list {
        list_tests();
        return Ok(ExitCode::SUCCESS);
    }

    let env = EnvConfig::load();
    let config = build_config(&args, &env)?;

    init_logger(LogLevel::from_verbose(config.verbose));
    if env.has_any() {
        debug!("Applied FUNCTION_PROBE_* environment overrides");
    }

    let format = OutputFormat::from_str(&config.format)
        .ok_or_else(|| ConfigError::UnknownFormat(config.format.clone()))?;
    let mut formatter = ResultFormatter::new(format);
    if args.no_color {
        formatter = formatter.no_color();
    }

    let selected = args
        .test
        .map(|n| {
            TestCase::from_number(n)
                .ok_or_else(|| anyhow::anyhow!("Invalid test number: {n} (valid range: 1-6)"))
        })
        .transpose()?;

    if !args.yes {
        let confirmed = confirm_run(
            format,
            &mut std::io::stdin().lock(),
            &mut std::io::stdout(),
            &mut std::io::stderr(),
        )?;
        if !confirmed {
            info!("Input closed before confirmation; aborting");
            return Ok(ExitCode::FAILURE);
        }
    }

    info!(
        "Probing {} (timeout {}s)",
        config.base_url, config.timeout_secs
    );

    let mut runner = TestRunner::new(&config).context("Failed to set up test runner")?;
    if format.shows_progress() {
        println!("{}", formatter.format_header());
        runner = runner.with_reporter(formatter.clone());
    }

    let summary = match selected {
        Some(test_case) => runner.run_tests(&[test_case]).await,
        None => runner.run_all().await,
    };

    if format == OutputFormat::Summary {
        for result in &summary.results {
            println!("{}", formatter.format_result(result));
        }
    }
    println!("{}", formatter.format_summary(&summary));

    Ok(ExitCode::from(summary.exit_code() as u8))
}

/// Show the confirmation prompt without mixing it into a machine-readable report
///
/// Only the table format keeps the prompt on stdout; the other formats
/// reserve stdout for the report itself.
fn confirm_run(
    format: OutputFormat,
    input: &mut impl BufRead,
    stdout: &mut impl Write,
    stderr: &mut impl Write,
) -> Result<bool> {
    if format.shows_progress() {
        cli::confirm(input, stdout)
    } else {
        cli::confirm(input, stderr)
    }
}

/// Layer CLI flags over file and environment configuration
fn build_config(args: &Args, env: &EnvConfig) -> Result<ProbeConfig> {
    let mut config = ProbeConfig::resolve(args.config.as_deref(), env)?;

    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }
    if let Some(format) = &args.format {
        config.format = format.clone();
    }
    if args.verbose {
        config.verbose = true;
    }

    config.validate()?;
    Ok(config)
}

fn list_tests() {
    println!("\nFunction Probes ({} total)\n", TestCase::all().len());
    for test_case in TestCase::all() {
        println!("  {:2}. {}", test_case.number(), test_case.name());
    }
    println!();
}
