//! Capabilities consumed by the sampler and its error type.

use std::sync::Arc;

use thiserror::Error;

use crate::runtime::MemStats;

/// Errors raised while constructing a sampler.
#[derive(Debug, Error)]
pub enum SamplerError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Destination for named measurements.
///
/// Calls are fire-and-forget: a sink that can fail must handle the failure
/// itself.
pub trait StatSink: Send + Sync + 'static {
    /// Record the current value of a gauge.
    fn gauge(&self, name: &str, value: f64);

    /// Record one observation into a histogram.
    fn histogram(&self, name: &str, value: f64);
}

impl<T: StatSink + ?Sized> StatSink for Arc<T> {
    fn gauge(&self, name: &str, value: f64) {
        (**self).gauge(name, value);
    }

    fn histogram(&self, name: &str, value: f64) {
        (**self).histogram(name, value);
    }
}

/// Source of process statistics.
pub trait StatsSource: Send + Sync + 'static {
    /// Overwrite `stats` with the current counters and pause history.
    fn read_mem_stats(&self, stats: &mut MemStats);

    /// Number of live concurrent execution units.
    fn live_units(&self) -> usize;
}

/// A [`StatsSource`] built from two closures.
///
/// ```
/// use runtime_sampler::runtime::MemStats;
/// use runtime_sampler::sampler::{FnSource, StatsSource};
///
/// let source = FnSource::new(|stats: &mut MemStats| stats.num_gc = 3, || 8);
/// let mut stats = MemStats::default();
/// source.read_mem_stats(&mut stats);
/// assert_eq!(stats.num_gc, 3);
/// assert_eq!(source.live_units(), 8);
/// ```
pub struct FnSource<R, U> {
    read: R,
    units: U,
}

impl<R, U> FnSource<R, U>
where
    R: Fn(&mut MemStats) + Send + Sync + 'static,
    U: Fn() -> usize + Send + Sync + 'static,
{
    /// Wrap a snapshot reader and a live-unit counter.
    pub fn new(read: R, units: U) -> Self {
        Self { read, units }
    }
}

impl<R, U> StatsSource for FnSource<R, U>
where
    R: Fn(&mut MemStats) + Send + Sync + 'static,
    U: Fn() -> usize + Send + Sync + 'static,
{
    fn read_mem_stats(&self, stats: &mut MemStats) {
        (self.read)(stats);
    }

    fn live_units(&self) -> usize {
        (self.units)()
    }
}
