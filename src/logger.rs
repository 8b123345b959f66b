//! Process-wide `tracing` subscriber built from [`LoggerConfig`].
//!
//! `RUST_LOG` takes precedence over the configured level, so operators can
//! raise verbosity for a single module without editing the config file.

use thiserror::Error;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ConfigError, LogOutput, LoggerConfig};

/// Errors raised while installing the logger.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// The logger section is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A global subscriber is already installed.
    #[error("failed to install logger: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Filter directives derived from the configured level.
///
/// # Errors
/// Returns `ConfigError::ValidationError` for an unknown level.
pub fn env_filter(config: &LoggerConfig) -> Result<EnvFilter, ConfigError> {
    let level = config.level()?;
    Ok(EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase())))
}

fn writer(output: LogOutput) -> BoxMakeWriter {
    match output {
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
        LogOutput::Null => BoxMakeWriter::new(std::io::sink),
    }
}

/// Install the global subscriber.
///
/// # Errors
/// Returns `LoggerError::Config` for an invalid section and
/// `LoggerError::Init` if a subscriber is already installed.
pub fn init(config: &LoggerConfig) -> Result<(), LoggerError> {
    let filter = env_filter(config)?;
    let output = config.output()?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(writer(output)))
        .try_init()?;

    Ok(())
}
