//! Configuration parsing and validation helpers.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use tracing::Level;

use crate::sampler::SamplerError;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse YAML configuration.
    #[error("failed to parse YAML config: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation failed.
    #[error("config validation error: {0}")]
    ValidationError(String),
}

impl From<SamplerError> for ConfigError {
    fn from(e: SamplerError) -> Self {
        match e {
            SamplerError::InvalidConfig(msg) => Self::ValidationError(msg),
        }
    }
}

/// Parse a positive duration string using humantime.
///
/// Supports `100ms`, `30s`, `1m`, `5m30s`, `1h`, etc.
///
/// # Examples
///
/// ```
/// use runtime_sampler::config::parse_duration;
///
/// assert_eq!(parse_duration("30s").unwrap().as_secs(), 30);
/// assert_eq!(parse_duration("250ms").unwrap().as_millis(), 250);
/// assert!(parse_duration("0s").is_err());
/// ```
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("duration string is empty".to_string());
    }
    let duration = humantime::parse_duration(s).map_err(|e| e.to_string())?;
    if duration.is_zero() {
        return Err("duration must be positive".to_string());
    }
    Ok(duration)
}

/// Parse a log level name: one of DEBUG, INFO, WARN or ERROR, in any case.
///
/// TRACE is not a logger level and is rejected like any unknown name.
pub fn parse_level(s: &str) -> Result<Level, String> {
    match Level::from_str(s.trim()) {
        Ok(level) if level != Level::TRACE => Ok(level),
        _ => Err(format!("unknown logger level '{}'", s)),
    }
}

/// Expand environment variables in a string.
/// Supports ${VAR} and ${VAR:-default} syntax.
pub fn expand_env_vars(input: &str) -> String {
    static ENV_VAR_REGEX: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();

    let regex = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("failed to compile env var regex")
    });

    regex
        .replace_all(input, |caps: &regex::Captures| {
            let var_name = &caps[1];
            let default_value = caps.get(2).map(|m| m.as_str()).unwrap_or("");
            std::env::var(var_name).unwrap_or_else(|_| default_value.to_string())
        })
        .into_owned()
}
