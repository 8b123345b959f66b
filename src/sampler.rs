//! Sampler Layer
//!
//! A background task that wakes on a fixed interval, reads process
//! statistics from a [`StatsSource`] and forwards them to a [`StatSink`] as
//! 14 gauges plus one `mem.stats.pause_ns` histogram entry per pause recorded
//! since the previous tick.
//!
//! # Architecture
//!
//! - [`Sampler`]: owns the interval, sink, source and `last_num_gc` state
//! - [`SamplerHandle`] / [`StopSignal`]: lifecycle of the background task
//! - [`names`]: the stable stat names
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use runtime_sampler::sampler::{Sampler, SamplerConfig};
//! use runtime_sampler::sink::TracingSink;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SamplerConfig::new(Duration::from_secs(10));
//! let handle = Sampler::new(&config, TracingSink::default())?.start();
//! // ...
//! handle.shutdown().await;
//! # Ok(())
//! # }
//! ```

mod history;
pub mod names;
mod runner;
mod traits;

pub use history::new_pauses;
pub use runner::{DEFAULT_INTERVAL, Sampler, SamplerConfig, SamplerHandle, StopSignal};
pub use traits::{FnSource, SamplerError, StatSink, StatsSource};
