//! Environment variable configuration
//!
//! Provides environment variable overrides for configuration.

use std::env;

/// Environment variable prefix
const ENV_PREFIX: &str = "FUNCTION_PROBE";

/// Configuration read from `FUNCTION_PROBE_*` variables
#[derive(Clone, Debug, Default)]
pub struct EnvConfig {
    /// Base URL from FUNCTION_PROBE_BASE_URL
    pub base_url: Option<String>,
    /// Timeout from FUNCTION_PROBE_TIMEOUT
    pub timeout: Option<u64>,
    /// Output format from FUNCTION_PROBE_FORMAT
    pub format: Option<String>,
    /// Verbose from FUNCTION_PROBE_VERBOSE
    pub verbose: Option<bool>,
    /// Config file from FUNCTION_PROBE_CONFIG
    pub config_file: Option<String>,
}

impl EnvConfig {
    /// Load configuration from environment variables
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| {
            lookup(&format!("{ENV_PREFIX}_{name}")).filter(|v| !v.trim().is_empty())
        };

        Self {
            base_url: get("BASE_URL"),
            timeout: get("TIMEOUT").and_then(|v| v.trim().parse().ok()),
            format: get("FORMAT"),
            verbose: get("VERBOSE").and_then(|v| parse_bool(&v)),
            config_file: get("CONFIG"),
        }
    }

    /// Check if any environment variables are set
    pub fn has_any(&self) -> bool {
        self.base_url.is_some()
            || self.timeout.is_some()
            || self.format.is_some()
            || self.verbose.is_some()
            || self.config_file.is_some()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
