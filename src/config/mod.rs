//! Configuration module
//!
//! Settings are layered: built-in defaults, then a config file, then
//! `FUNCTION_PROBE_*` environment variables. CLI flags are applied last by
//! the caller.

mod env;
mod file;

pub use env::EnvConfig;
pub use file::ConfigFile;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Address of the function host started with `func start`
pub const DEFAULT_BASE_URL: &str = "http://localhost:7071/api";

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid base URL '{0}': must start with http:// or https://")]
    InvalidBaseUrl(String),

    #[error("Timeout must be greater than zero")]
    ZeroTimeout,

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),
}

/// Probe configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Prefix every endpoint path is appended to
    pub base_url: String,

    /// HTTP timeout in seconds
    pub timeout_secs: u64,

    /// Output format (table, json, json-pretty, summary)
    pub format: String,

    /// Enable debug logging
    pub verbose: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            format: "table".to_string(),
            verbose: false,
        }
    }
}

impl ProbeConfig {
    /// Resolve configuration from file and environment
    ///
    /// The file is `explicit` if given, else the one named by the
    /// environment, else the first one found in the standard locations.
    pub fn resolve(explicit: Option<&Path>, env: &EnvConfig) -> Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env.config_file.as_ref().map(Into::into))
            .or_else(ConfigFile::find);

        let mut config = match path {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                ConfigFile::load(&path)?
            }
            None => Self::default(),
        };

        config.apply_env(env);
        Ok(config)
    }

    /// Override fields set in the environment
    pub fn apply_env(&mut self, env: &EnvConfig) {
        if let Some(base_url) = &env.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(timeout) = env.timeout {
            self.timeout_secs = timeout;
        }
        if let Some(format) = &env.format {
            self.format = format.clone();
        }
        if let Some(verbose) = env.verbose {
            self.verbose = verbose;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}
