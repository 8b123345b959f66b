//! Sink forwarding observations over a bounded tokio channel.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc::{self, Receiver, Sender, error::TrySendError};

use crate::sampler::StatSink;
use crate::sink::Observation;

/// Non-blocking writer into an `mpsc` channel.
///
/// When the channel is full or the receiver is gone the observation is
/// dropped, counted, and a warning is logged.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<Observation>,
    dropped: Arc<AtomicU64>,
}

impl ChannelSink {
    /// Create a sink and the receiver for its observations.
    pub fn channel(capacity: usize) -> (Self, Receiver<Observation>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }

    /// Wrap an existing sender.
    pub fn new(tx: Sender<Observation>) -> Self {
        Self {
            tx,
            dropped: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Observations dropped because the channel was full or closed.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn send(&self, observation: Observation) {
        if let Err(e) = self.tx.try_send(observation) {
            let dropped = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
            match e {
                TrySendError::Full(o) => {
                    tracing::warn!(name = %o.name, dropped, "Observation channel full");
                }
                TrySendError::Closed(o) => {
                    tracing::warn!(name = %o.name, dropped, "Observation channel closed");
                }
            }
        }
    }
}

impl StatSink for ChannelSink {
    fn gauge(&self, name: &str, value: f64) {
        self.send(Observation::gauge(name, value));
    }

    fn histogram(&self, name: &str, value: f64) {
        self.send(Observation::histogram(name, value));
    }
}
