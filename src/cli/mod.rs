//! CLI argument parsing
//!
//! Defines command-line interface using clap.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Integration test runner for the AI description function
#[derive(Parser, Debug)]
#[command(name = "function-probe")]
#[command(version)]
#[command(about = "Probe a locally running AI description function before deployment")]
#[command(long_about = None)]
pub struct Args {
    /// Base URL of the function host
    #[arg(long)]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Specific test number to run (1-6)
    #[arg(short, long)]
    pub test: Option<u8>,

    /// Output format (table, json, json-pretty, summary)
    #[arg(short, long)]
    pub format: Option<String>,

    /// Path to a YAML or JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,

    /// List available tests and exit
    #[arg(short, long)]
    pub list: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Block until the operator presses Enter
///
/// Returns `false` when input is closed before a line arrives.
pub fn confirm(input: &mut impl BufRead, output: &mut impl Write) -> Result<bool> {
    writeln!(output, "Azure Function Test Suite")?;
    writeln!(
        output,
        "Make sure your function is running locally with 'func start'"
    )?;
    writeln!(output, "Press Enter to continue or Ctrl+C to cancel...")?;
    output.flush()?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("Failed to read confirmation")?;
    Ok(read > 0)
}
