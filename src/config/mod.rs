//! Configuration module for the runtime sampler.
//!
//! Provides YAML-based configuration loading and validation for:
//! - Logger settings (level, output stream)
//! - Sampler settings (interval)

mod app;
mod validation;

pub use app::{AppConfig, DEFAULT_LOG_LEVEL, LogOutput, LoggerConfig};
pub use validation::{ConfigError, expand_env_vars, parse_duration, parse_level};

// Re-export constants
pub use crate::sampler::DEFAULT_INTERVAL;
