//! Runtime Sampler Binary Entry Point
//!
//! Loads configuration, installs the logger and reports runtime statistics of
//! this process through the `tracing` sink until interrupted.

use std::path::PathBuf;

use clap::Parser;
use runtime_sampler::{
    AppConfig, CountingAllocator, Sampler, SamplerHandle, TracingSink,
    config::{parse_duration, parse_level},
    logger,
};

#[global_allocator]
static GLOBAL: CountingAllocator = CountingAllocator::system();

/// Runtime Sampler - periodic runtime-health telemetry
#[derive(Parser, Debug)]
#[command(name = "runtime-sampler", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long, env = "SAMPLER_CONFIG")]
    config: Option<PathBuf>,

    /// Sampling interval, e.g. "10s" (overrides config file)
    #[arg(long, env = "SAMPLER_INTERVAL", value_parser = parse_duration)]
    interval: Option<std::time::Duration>,

    /// Minimum log level (overrides config file)
    #[arg(long, env = "SAMPLER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Level at which observations are logged
    #[arg(long, default_value = "INFO", value_parser = parse_level)]
    stats_level: tracing::Level,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration from file
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    // Apply CLI/env overrides (CLI > ENV > config file)
    if let Some(interval) = cli.interval {
        config.sampler.interval = interval;
    }
    if let Some(level) = cli.log_level {
        config.logger.level = level;
    }
    config.validate()?;

    logger::init(&config.logger)?;

    tracing::info!(
        config = ?cli.config,
        interval = ?config.sampler.interval,
        "Runtime sampler starting"
    );

    let sampler = Sampler::new(&config.sampler, TracingSink::new(cli.stats_level))?;
    let handle = sampler.start();

    shutdown_signal(handle).await;

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM, then stop the sampler.
async fn shutdown_signal(handle: SamplerHandle) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal");
        }
    }

    tracing::info!("Stopping runtime sampler...");
    handle.shutdown().await;
}
