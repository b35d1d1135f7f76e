//! Test result models for function probing
//!
//! Defines test cases, results, run summaries and the deployment verdict.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum share of passing checks (overall, and within the category sweep)
pub const PASS_THRESHOLD: f64 = 0.8;

/// The six probes run against the function
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestCase {
    HealthCheck,
    AiStatus,
    DescriptionNoImages,
    DescriptionWithUrls,
    InvalidRequest,
    CategorySweep,
}

impl TestCase {
    /// Get test case number (1-6)
    pub fn number(&self) -> u8 {
        match self {
            TestCase::HealthCheck => 1,
            TestCase::AiStatus => 2,
            TestCase::DescriptionNoImages => 3,
            TestCase::DescriptionWithUrls => 4,
            TestCase::InvalidRequest => 5,
            TestCase::CategorySweep => 6,
        }
    }

    /// Get test case name
    pub fn name(&self) -> &'static str {
        match self {
            TestCase::HealthCheck => "Health Check",
            TestCase::AiStatus => "AI Status",
            TestCase::DescriptionNoImages => "Description (No Images)",
            TestCase::DescriptionWithUrls => "Description (With URLs)",
            TestCase::InvalidRequest => "Error Handling",
            TestCase::CategorySweep => "Category Tests",
        }
    }

    /// Progress line printed before the probe starts
    pub fn banner(&self) -> &'static str {
        match self {
            TestCase::HealthCheck => "Testing health check endpoint...",
            TestCase::AiStatus => "Testing AI status endpoint...",
            TestCase::DescriptionNoImages => "Testing description generation without images...",
            TestCase::DescriptionWithUrls => "Testing description generation with image URLs...",
            TestCase::InvalidRequest => "Testing error handling with invalid request...",
            TestCase::CategorySweep => "Testing different product categories...",
        }
    }

    /// All test cases in execution order
    pub fn all() -> Vec<TestCase> {
        vec![
            TestCase::HealthCheck,
            TestCase::AiStatus,
            TestCase::DescriptionNoImages,
            TestCase::DescriptionWithUrls,
            TestCase::InvalidRequest,
            TestCase::CategorySweep,
        ]
    }

    /// Parse from test number
    pub fn from_number(n: u8) -> Option<TestCase> {
        Self::all().into_iter().find(|tc| tc.number() == n)
    }
}

impl fmt::Display for TestCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Test {}: {}", self.number(), self.name())
    }
}

/// Test execution status
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Pass,
    Fail,
    /// The probe itself crashed or returned an error
    Error,
}

impl TestStatus {
    pub fn from_passed(passed: bool) -> Self {
        if passed {
            TestStatus::Pass
        } else {
            TestStatus::Fail
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TestStatus::Pass => "✅",
            TestStatus::Fail | TestStatus::Error => "❌",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TestStatus::Pass)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestStatus::Pass => write!(f, "PASS"),
            TestStatus::Fail => write!(f, "FAIL"),
            TestStatus::Error => write!(f, "ERROR"),
        }
    }
}

/// Result of a single probe
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestResult {
    pub test_case: TestCase,
    pub status: TestStatus,
    pub duration_ms: u64,
    pub message: Option<String>,
    /// Diagnostic lines printed under the result
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

impl TestResult {
    pub fn new(test_case: TestCase, passed: bool, duration_ms: u64) -> Self {
        Self {
            test_case,
            status: TestStatus::from_passed(passed),
            duration_ms,
            message: None,
            details: Vec::new(),
        }
    }

    pub fn error(test_case: TestCase, error: impl Into<String>) -> Self {
        Self {
            test_case,
            status: TestStatus::Error,
            duration_ms: 0,
            message: Some(error.into()),
            details: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    pub fn passed(&self) -> bool {
        self.status.is_success()
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}ms]",
            self.status.symbol(),
            self.test_case,
            self.duration_ms
        )?;
        if let Some(msg) = &self.message {
            write!(f, " - {msg}")?;
        }
        Ok(())
    }
}

/// Deployment readiness derived from the overall pass rate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Ready,
    ConditionallyReady,
    NotReady,
}

impl Verdict {
    pub fn from_pass_rate(rate: f64) -> Self {
        if rate >= 1.0 {
            Verdict::Ready
        } else if rate >= PASS_THRESHOLD {
            Verdict::ConditionallyReady
        } else {
            Verdict::NotReady
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Verdict::Ready => "🎉",
            Verdict::ConditionallyReady => "⚠️",
            Verdict::NotReady => "🚨",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Ready => "All tests passed! Function is ready for deployment.",
            Verdict::ConditionallyReady => {
                "Most tests passed. Review failed tests before deployment."
            }
            Verdict::NotReady => {
                "Multiple test failures. Function needs debugging before deployment."
            }
        }
    }

    /// Process exit status for this verdict
    pub fn exit_code(&self) -> i32 {
        match self {
            Verdict::Ready | Verdict::ConditionallyReady => 0,
            Verdict::NotReady => 1,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.symbol(), self.message())
    }
}

/// Summary of one pass over the probes
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestRunSummary {
    pub started_at: DateTime<Utc>,
    pub base_url: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub total_duration_ms: u64,
    pub results: Vec<TestResult>,
}

impl TestRunSummary {
    pub fn new(
        started_at: DateTime<Utc>,
        base_url: impl Into<String>,
        results: Vec<TestResult>,
    ) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed()).count();
        let failed = results
            .iter()
            .filter(|r| r.status == TestStatus::Fail)
            .count();
        let errors = results
            .iter()
            .filter(|r| r.status == TestStatus::Error)
            .count();
        let total_duration_ms = results.iter().map(|r| r.duration_ms).sum();

        Self {
            started_at,
            base_url: base_url.into(),
            total,
            passed,
            failed,
            errors,
            total_duration_ms,
            results,
        }
    }

    /// Share of passing probes, in [0, 1]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 / self.total as f64
        }
    }

    pub fn verdict(&self) -> Verdict {
        Verdict::from_pass_rate(self.pass_rate())
    }

    pub fn exit_code(&self) -> i32 {
        self.verdict().exit_code()
    }
}
