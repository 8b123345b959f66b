//! Runtime Sampler - periodic runtime-health telemetry
//!
//! A background task that wakes on a fixed interval, reads the host process's
//! memory, pause and thread statistics, and emits them as named gauge and
//! histogram measurements to a pluggable stats sink.
//!
//! # Architecture
//!
//! - **Sampler**: the tick loop, pause de-duplication and start/stop lifecycle
//! - **Runtime**: snapshot type, pause log, counting allocator, process source
//! - **Sinks**: in-memory, `tracing` and channel destinations
//! - **Config / Logger**: YAML settings and the `tracing-subscriber` pipeline
//! - **HTTP client**: `reqwest` client built from the `httpclient` section
//!
//! # Example
//!
//! ```rust,no_run
//! use runtime_sampler::{MemorySink, Sampler, SamplerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sink = MemorySink::new();
//!     let handle = Sampler::new(&SamplerConfig::default(), sink.clone())?.start();
//!
//!     tokio::time::sleep(std::time::Duration::from_secs(1)).await;
//!     handle.shutdown().await;
//!     println!("{} observations", sink.len());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod httpclient;
pub mod logger;
pub mod runtime;
pub mod sampler;
pub mod sink;

pub use config::{AppConfig, ConfigError, LoggerConfig};
pub use httpclient::HttpClientConfig;
pub use runtime::{CountingAllocator, MemStats, PauseTimer, ProcessSource, record_pause};
pub use sampler::{
    Sampler, SamplerConfig, SamplerError, SamplerHandle, StatSink, StatsSource, StopSignal,
};
pub use sink::{ChannelSink, MemorySink, Observation, ObservationKind, TracingSink};
