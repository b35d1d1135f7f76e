//! Test execution runner
//!
//! Runs probes strictly in order. A probe that errors or panics becomes a
//! failed result; the remaining probes still run.

use anyhow::Result;
use chrono::Utc;
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Instant;
use tracing::{error, info};

use crate::config::ProbeConfig;
use crate::http::HttpClient;
use crate::models::{TestCase, TestResult, TestRunSummary};
use crate::output::ResultFormatter;
use crate::tests;

/// Sequential runner for the function probes
pub struct TestRunner {
    client: HttpClient,
    reporter: Option<ResultFormatter>,
}

impl TestRunner {
    /// Create a new test runner
    pub fn new(config: &ProbeConfig) -> Result<Self> {
        let client = HttpClient::new(&config.base_url, config.timeout_secs)?;
        Ok(Self {
            client,
            reporter: None,
        })
    }

    /// Print each result as soon as its probe finishes
    pub fn with_reporter(mut self, reporter: ResultFormatter) -> Self {
        self.reporter = Some(reporter);
        self
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Run all test cases sequentially
    pub async fn run_all(&self) -> TestRunSummary {
        self.run_tests(&TestCase::all()).await
    }

    /// Run specific test cases, in the given order
    pub async fn run_tests(&self, test_cases: &[TestCase]) -> TestRunSummary {
        let client = &self.client;
        self.run_tests_with(test_cases, move |test_case| {
            tests::run_test(test_case, client)
        })
        .await
    }

    /// Run `test_cases` in order, each through `procedure`
    pub async fn run_tests_with<F, Fut>(
        &self,
        test_cases: &[TestCase],
        procedure: F,
    ) -> TestRunSummary
    where
        F: Fn(TestCase) -> Fut,
        Fut: Future<Output = Result<TestResult>>,
    {
        info!(
            "Running {} probes against {}",
            test_cases.len(),
            self.base_url()
        );

        let started_at = Utc::now();
        let start = Instant::now();
        let mut results = Vec::with_capacity(test_cases.len());

        for &test_case in test_cases {
            info!("Running {}", test_case);
            if let Some(reporter) = &self.reporter {
                println!("{}", reporter.format_banner(test_case));
            }

            let result = guarded(test_case, procedure(test_case)).await;

            if let Some(reporter) = &self.reporter {
                let details = reporter.format_details(&result);
                if !details.is_empty() {
                    println!("{details}");
                }
            }

            info!("  {}", result);
            results.push(result);
        }

        let summary = TestRunSummary::new(started_at, self.base_url(), results);

        info!(
            "Probe run completed in {}ms - Pass: {}/{} ({:.1}%)",
            start.elapsed().as_millis(),
            summary.passed,
            summary.total,
            summary.pass_rate() * 100.0
        );

        summary
    }
}

/// Await one procedure; an `Err` or a panic becomes an `Error` result
async fn guarded<Fut>(test_case: TestCase, procedure: Fut) -> TestResult
where
    Fut: Future<Output = Result<TestResult>>,
{
    match AssertUnwindSafe(procedure).catch_unwind().await {
        Ok(Ok(result)) => result,
        Ok(Err(e)) => {
            error!("{} failed with error: {:#}", test_case, e);
            TestResult::error(test_case, format!("{e:#}"))
        }
        Err(panic) => {
            let reason = panic_message(panic.as_ref());
            error!("{} crashed: {}", test_case, reason);
            TestResult::error(test_case, format!("crashed: {reason}"))
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
