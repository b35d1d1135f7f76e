//! Output formatting module
//!
//! Provides the console report and machine-readable output for probe runs.

mod formatter;

pub use formatter::{OutputFormat, ResultFormatter};
