//! Application configuration structures.

use std::path::Path;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use tracing::Level;

use crate::httpclient::HttpClientConfig;
use crate::sampler::SamplerConfig;

use super::validation::{ConfigError, expand_env_vars, parse_level};

// =============================================================================
// Constants
// =============================================================================

/// Default minimum log level.
pub const DEFAULT_LOG_LEVEL: &str = "INFO";

fn default_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_output() -> String {
    LogOutput::Stdout.to_string()
}

// =============================================================================
// Logger Configuration
// =============================================================================

/// Destination stream of the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, AsRefStr)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum LogOutput {
    /// Write logs to standard output.
    Stdout,
    /// Discard all logs.
    Null,
}

/// Logger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Minimum level of logs to emit: DEBUG, INFO, WARN or ERROR (default: INFO).
    #[serde(default = "default_level")]
    pub level: String,

    /// Destination stream of the logs: STDOUT or NULL (default: STDOUT).
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            output: default_output(),
        }
    }
}

impl LoggerConfig {
    /// Parsed minimum level.
    ///
    /// # Errors
    /// Returns `ConfigError::ValidationError` for an unknown level name.
    pub fn level(&self) -> Result<Level, ConfigError> {
        parse_level(&self.level).map_err(ConfigError::ValidationError)
    }

    /// Parsed output stream.
    ///
    /// # Errors
    /// Returns `ConfigError::ValidationError` for an unknown output name.
    pub fn output(&self) -> Result<LogOutput, ConfigError> {
        self.output.trim().parse::<LogOutput>().map_err(|_| {
            ConfigError::ValidationError(format!("unknown logger output '{}'", self.output))
        })
    }

    /// Validate level and output.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.level()?;
        self.output()?;
        Ok(())
    }
}

// =============================================================================
// Application Configuration
// =============================================================================

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logger configuration.
    #[serde(default)]
    pub logger: LoggerConfig,

    /// Runtime sampler configuration.
    #[serde(default)]
    pub sampler: SamplerConfig,

    /// HTTP client configuration.
    #[serde(default)]
    pub httpclient: HttpClientConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file.
    ///
    /// `${VAR}` and `${VAR:-default}` references are expanded before parsing.
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read, parsed, or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse and validate configuration from YAML text.
    ///
    /// # Errors
    /// Returns `ConfigError` if the text cannot be parsed or validated.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let expanded = expand_env_vars(content);
        let config: Self = serde_yaml::from_str(&expanded)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns `ConfigError::ValidationError` if any field is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logger.validate()?;
        self.sampler.validate()?;
        self.httpclient.validate()?;
        Ok(())
    }
}
