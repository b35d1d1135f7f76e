//! Data models for function probing
//!
//! This module contains all data structures used throughout the application.

mod payload;
mod test_result;

pub use payload::DescriptionRequest;
pub use test_result::{TestCase, TestResult, TestRunSummary, TestStatus, Verdict, PASS_THRESHOLD};
