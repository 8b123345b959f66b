//! Observation records passed to in-memory and channel sinks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Kind of measurement.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ObservationKind {
    /// Point-in-time value.
    Gauge,
    /// One sample of a distribution.
    Histogram,
}

/// A single named measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// When the sink received the measurement (UTC).
    pub ts: DateTime<Utc>,
    /// Gauge or histogram.
    pub kind: ObservationKind,
    /// Stat name (e.g., "mem.stats.alloc").
    pub name: String,
    /// Measured value.
    pub value: f64,
}

impl Observation {
    /// Create an observation stamped with the current time.
    pub fn new(kind: ObservationKind, name: impl Into<String>, value: f64) -> Self {
        Self {
            ts: Utc::now(),
            kind,
            name: name.into(),
            value,
        }
    }

    /// Create a gauge observation.
    pub fn gauge(name: impl Into<String>, value: f64) -> Self {
        Self::new(ObservationKind::Gauge, name, value)
    }

    /// Create a histogram observation.
    pub fn histogram(name: impl Into<String>, value: f64) -> Self {
        Self::new(ObservationKind::Histogram, name, value)
    }
}
