//! Sink that writes observations to the `tracing` pipeline.

use tracing::Level;

use crate::sampler::StatSink;
use crate::sink::ObservationKind;

/// Target used for every observation event.
pub const STATS_TARGET: &str = "runtime_sampler::stats";

/// Emits each observation as a structured `tracing` event.
///
/// Events carry `kind`, `name` and `value` fields on target
/// [`STATS_TARGET`], so they can be routed with an `EnvFilter` directive such
/// as `runtime_sampler::stats=info`.
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    level: Level,
}

impl TracingSink {
    /// Create a sink emitting at `level`.
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    fn emit(&self, kind: ObservationKind, name: &str, value: f64) {
        let kind = kind.as_ref();
        match self.level {
            Level::TRACE => tracing::trace!(target: STATS_TARGET, kind, name, value),
            Level::DEBUG => tracing::debug!(target: STATS_TARGET, kind, name, value),
            Level::INFO => tracing::info!(target: STATS_TARGET, kind, name, value),
            Level::WARN => tracing::warn!(target: STATS_TARGET, kind, name, value),
            _ => tracing::error!(target: STATS_TARGET, kind, name, value),
        }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(Level::INFO)
    }
}

impl StatSink for TracingSink {
    fn gauge(&self, name: &str, value: f64) {
        self.emit(ObservationKind::Gauge, name, value);
    }

    fn histogram(&self, name: &str, value: f64) {
        self.emit(ObservationKind::Histogram, name, value);
    }
}
