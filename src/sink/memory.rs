//! In-memory sink.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::sampler::StatSink;
use crate::sink::{Observation, ObservationKind};

/// Records every observation in arrival order.
///
/// Clones share the same buffer, so one clone can be handed to a sampler and
/// another kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    observations: Arc<Mutex<Vec<Observation>>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Observation>> {
        self.observations
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// All observations so far.
    pub fn observations(&self) -> Vec<Observation> {
        self.lock().clone()
    }

    /// `(name, value)` of every gauge, in order.
    pub fn gauges(&self) -> Vec<(String, f64)> {
        self.of_kind(ObservationKind::Gauge)
            .map(|o| (o.name, o.value))
            .collect()
    }

    /// Values recorded into the named histogram, in order.
    pub fn histograms(&self, name: &str) -> Vec<f64> {
        self.of_kind(ObservationKind::Histogram)
            .filter(|o| o.name == name)
            .map(|o| o.value)
            .collect()
    }

    /// Number of observations recorded.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Drop all recorded observations.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn of_kind(&self, kind: ObservationKind) -> impl Iterator<Item = Observation> {
        self.observations()
            .into_iter()
            .filter(move |o| o.kind == kind)
    }
}

impl StatSink for MemorySink {
    fn gauge(&self, name: &str, value: f64) {
        self.lock().push(Observation::gauge(name, value));
    }

    fn histogram(&self, name: &str, value: f64) {
        self.lock().push(Observation::histogram(name, value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let sink = MemorySink::new();
        let handle = sink.clone();

        sink.gauge("a", 1.0);
        sink.histogram("h", 2.0);
        sink.histogram("other", 3.0);

        assert_eq!(handle.len(), 3);
        assert_eq!(handle.gauges(), vec![("a".to_string(), 1.0)]);
        assert_eq!(handle.histograms("h"), vec![2.0]);

        handle.clear();
        assert!(sink.is_empty());
    }
}
