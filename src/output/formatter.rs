//! Output formatters for probe results
//!
//! Provides table, JSON and one-line summary output formats.

use crate::models::{TestCase, TestResult, TestRunSummary, TestStatus, Verdict};

const RULE: &str = "==================================================";

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }

    /// Whether per-probe progress belongs on stdout
    pub fn shows_progress(&self) -> bool {
        matches!(self, OutputFormat::Table)
    }
}

/// Result formatter
#[derive(Clone, Debug)]
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Heading printed before the run starts
    pub fn format_header(&self) -> String {
        format!("🚀 Starting Azure Function Tests\n{RULE}")
    }

    /// Line printed as a probe starts
    pub fn format_banner(&self, test_case: TestCase) -> String {
        let banner = format!("🔍 {}", test_case.banner());
        if test_case == TestCase::HealthCheck {
            banner
        } else {
            format!("\n{banner}")
        }
    }

    /// Diagnostic lines of a finished probe
    pub fn format_details(&self, result: &TestResult) -> String {
        let mut lines = result.details.clone();
        if result.status == TestStatus::Error {
            let message = result.message.as_deref().unwrap_or("unknown error");
            lines.push(format!("❌ {} crashed: {}", result.test_case.name(), message));
        }
        lines.join("\n")
    }

    /// Format a single test result
    pub fn format_result(&self, result: &TestResult) -> String {
        match self.format {
            OutputFormat::Table => self.format_result_line(result),
            OutputFormat::Json => serde_json::to_string(result).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(result).unwrap_or_default(),
            OutputFormat::Summary => format!(
                "{} {} ({}ms)",
                result.status.symbol(),
                result.test_case.name(),
                result.duration_ms
            ),
        }
    }

    fn format_result_line(&self, result: &TestResult) -> String {
        let status_str = if self.colorize {
            match result.status {
                TestStatus::Pass => "\x1b[32m✅ PASS\x1b[0m",
                TestStatus::Fail | TestStatus::Error => "\x1b[31m❌ FAIL\x1b[0m",
            }
        } else {
            match result.status {
                TestStatus::Pass => "✅ PASS",
                TestStatus::Fail | TestStatus::Error => "❌ FAIL",
            }
        };

        format!("{} - {}", status_str, result.test_case.name())
    }

    /// Format the end-of-run summary
    pub fn format_summary(&self, summary: &TestRunSummary) -> String {
        match self.format {
            OutputFormat::Table => self.format_summary_table(summary),
            OutputFormat::Json => serde_json::to_string(summary).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(summary).unwrap_or_default(),
            OutputFormat::Summary => self.format_summary_brief(summary),
        }
    }

    fn format_summary_table(&self, summary: &TestRunSummary) -> String {
        let mut output = String::new();

        output.push_str(&format!("\n{RULE}\n📋 TEST SUMMARY\n{RULE}\n"));

        for result in &summary.results {
            output.push_str(&self.format_result_line(result));
            output.push('\n');
        }

        output.push_str(&format!(
            "\n🎯 Overall Results: {}/{} tests passed ({:.1}%)\n",
            summary.passed,
            summary.total,
            summary.pass_rate() * 100.0
        ));
        output.push_str(&self.format_verdict(summary.verdict()));

        output
    }

    fn format_verdict(&self, verdict: Verdict) -> String {
        let text = verdict.to_string();
        if !self.colorize {
            return text;
        }
        let color = match verdict {
            Verdict::Ready => "32",
            Verdict::ConditionallyReady => "33",
            Verdict::NotReady => "31",
        };
        format!("\x1b[{color}m{text}\x1b[0m")
    }

    fn format_summary_brief(&self, summary: &TestRunSummary) -> String {
        format!(
            "{}: {}/{} passed ({:.1}%) in {}ms - {}",
            summary.base_url,
            summary.passed,
            summary.total,
            summary.pass_rate() * 100.0,
            summary.total_duration_ms,
            summary.verdict().message()
        )
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn summary(passed: &[bool]) -> TestRunSummary {
        let results = TestCase::all()
            .into_iter()
            .zip(passed)
            .map(|(tc, &p)| TestResult::new(tc, p, 1))
            .collect();
        TestRunSummary::new(Utc::now(), "http://localhost:7071/api", results)
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("TABLE"), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::from_str("csv"), None);
        assert!(!OutputFormat::Json.shows_progress());
    }

    #[test]
    fn test_formatter_creation() {
        let formatter = ResultFormatter::new(OutputFormat::Json).no_color();
        assert_eq!(formatter.format, OutputFormat::Json);
        assert!(!formatter.colorize);
    }

    #[test]
    fn test_summary_table_lists_every_probe() {
        let formatter = ResultFormatter::default().no_color();
        let output = formatter.format_summary(&summary(&[true, true, true, true, true, false]));

        assert!(output.contains("✅ PASS - Health Check"));
        assert!(output.contains("❌ FAIL - Category Tests"));
        assert!(output.contains("🎯 Overall Results: 5/6 tests passed (83.3%)"));
        assert!(output.contains("Most tests passed. Review failed tests before deployment."));
    }

    #[test]
    fn test_summary_table_all_passed() {
        let formatter = ResultFormatter::default().no_color();
        let output = formatter.format_summary(&summary(&[true; 6]));
        assert!(output.contains("(100.0%)"));
        assert!(output.contains("Function is ready for deployment."));
    }

    #[test]
    fn test_crashed_probe_is_reported() {
        let formatter = ResultFormatter::default().no_color();
        let result = TestResult::error(TestCase::AiStatus, "panicked at probe");
        assert_eq!(
            formatter.format_details(&result),
            "❌ AI Status crashed: panicked at probe"
        );
        assert_eq!(formatter.format_result(&result), "❌ FAIL - AI Status");
    }

    #[test]
    fn test_json_summary_is_parseable() {
        let formatter = ResultFormatter::new(OutputFormat::Json);
        let output = formatter.format_summary(&summary(&[true, false, true, true, true, true]));
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["passed"], 5);
        assert_eq!(value["results"][1]["status"], "fail");
        assert_eq!(value["results"][1]["test_case"], "ai_status");
    }

    #[test]
    fn test_banner_spacing() {
        let formatter = ResultFormatter::default();
        assert_eq!(
            formatter.format_banner(TestCase::HealthCheck),
            "🔍 Testing health check endpoint..."
        );
        assert!(formatter.format_banner(TestCase::AiStatus).starts_with('\n'));
    }
}
