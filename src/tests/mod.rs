//! Function probe implementations
//!
//! This module contains the six checks run against the description function.
//!
//! ## Status Probes (1-2)
//! - Health Check
//! - AI Status
//!
//! ## Generation Probes (3-5)
//! - Description without images
//! - Description with image URLs
//! - Invalid request rejection
//!
//! ## Category Probe (6)
//! - Category sweep


use categories::CategorySweepTest;
use description::{DescriptionTest, InvalidRequestTest};
use status::{AiStatusTest, HealthCheckTest};

use crate::http::HttpClient;
use crate::models::{TestCase, TestResult};
use anyhow::Result;

/// Run a specific test case
pub async fn run_test(test_case: TestCase, client: &HttpClient) -> Result<TestResult> {
    match test_case {
        TestCase::HealthCheck => HealthCheckTest::new().run(client).await,
        TestCase::AiStatus => AiStatusTest::new().run(client).await,
        TestCase::DescriptionNoImages => DescriptionTest::without_images().run(client).await,
        TestCase::DescriptionWithUrls => DescriptionTest::with_image_urls().run(client).await,
        TestCase::InvalidRequest => InvalidRequestTest::new().run(client).await,
        TestCase::CategorySweep => CategorySweepTest::new().run(client).await,
    }
}
