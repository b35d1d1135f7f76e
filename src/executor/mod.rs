//! Test execution engine
//!
//! Runs the probes one after another against a single function host.

mod runner;

pub use runner::TestRunner;
