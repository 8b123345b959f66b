//! Stat sinks.
//!
//! - [`MemorySink`]: keeps every observation in memory
//! - [`TracingSink`]: logs observations as `tracing` events
//! - [`ChannelSink`]: forwards observations over a tokio channel

mod channel;
mod log;
mod memory;
mod types;

pub use channel::ChannelSink;
pub use log::{STATS_TARGET, TracingSink};
pub use memory::MemorySink;
pub use types::{Observation, ObservationKind};
