//! Periodic sampler and its lifecycle handle.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::runtime::{MemStats, ProcessSource};
use crate::sampler::history::new_pauses;
use crate::sampler::names::*;
use crate::sampler::{SamplerError, StatSink, StatsSource};

/// Default sampling interval (5 seconds).
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

fn default_interval() -> Duration {
    DEFAULT_INTERVAL
}

/// Configuration for the runtime sampler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// Time between two samples (default: 5s).
    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl SamplerConfig {
    /// Create a configuration with the given interval.
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if the interval is zero.
    pub fn validate(&self) -> Result<(), SamplerError> {
        if self.interval.is_zero() {
            return Err(SamplerError::InvalidConfig(
                "sampler interval must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Periodically samples process statistics and forwards them to a sink.
///
/// The sampler owns its de-duplication state (`last_num_gc`) and is moved into
/// a background task by [`Sampler::start`], so the state is never shared.
pub struct Sampler {
    interval: Duration,
    sink: Arc<dyn StatSink>,
    source: Box<dyn StatsSource>,
    last_num_gc: u32,
}

impl Sampler {
    /// Create a sampler reading the current process.
    ///
    /// # Errors
    /// Returns `SamplerError::InvalidConfig` if the interval is zero.
    pub fn new(config: &SamplerConfig, sink: impl StatSink) -> Result<Self, SamplerError> {
        config.validate()?;
        Ok(Self {
            interval: config.interval,
            sink: Arc::new(sink),
            source: Box::new(ProcessSource::new()),
            last_num_gc: 0,
        })
    }

    /// Replace the statistics source.
    pub fn with_source(mut self, source: impl StatsSource) -> Self {
        self.source = Box::new(source);
        self
    }

    /// Treat pauses up to cycle `num_gc` as already reported.
    pub fn with_last_num_gc(mut self, num_gc: u32) -> Self {
        self.last_num_gc = num_gc;
        self
    }

    /// Sampling interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Cycle count observed by the most recent tick.
    pub fn last_num_gc(&self) -> u32 {
        self.last_num_gc
    }

    /// Take one sample and forward every observation to the sink.
    pub fn report(&mut self) {
        let mut stats = MemStats::default();
        self.source.read_mem_stats(&mut stats);
        let live_units = self.source.live_units();

        let sink = &self.sink;
        sink.gauge(STAT_MEMSTATS_ALLOC, stats.alloc as f64);
        sink.gauge(STAT_MEMSTATS_FREES, stats.frees as f64);
        sink.gauge(STAT_MEMSTATS_HEAP_ALLOC, stats.heap_alloc as f64);
        sink.gauge(STAT_MEMSTATS_HEAP_IDLE, stats.heap_idle as f64);
        sink.gauge(STAT_MEMSTATS_HEAP_INUSE, stats.heap_inuse as f64);
        sink.gauge(STAT_MEMSTATS_HEAP_OBJECTS, stats.heap_objects as f64);
        sink.gauge(STAT_MEMSTATS_HEAP_RELEASED, stats.heap_released as f64);
        sink.gauge(STAT_MEMSTATS_HEAP_SYS, stats.heap_sys as f64);
        sink.gauge(STAT_MEMSTATS_LOOKUPS, stats.lookups as f64);
        sink.gauge(STAT_MEMSTATS_MALLOCS, stats.mallocs as f64);
        sink.gauge(STAT_MEMSTATS_NUM_GC, f64::from(stats.num_gc));
        sink.gauge(STAT_MEMSTATS_PAUSE_TOTAL_NS, stats.pause_total_ns as f64);
        sink.gauge(STAT_MEMSTATS_TOTAL_ALLOC, stats.total_alloc as f64);
        sink.gauge(STAT_GOROUTINES_EXIST, live_units as f64);

        let mut pauses = 0usize;
        for pause in new_pauses(&stats, self.last_num_gc) {
            sink.histogram(STAT_MEMSTATS_PAUSE_NS, pause as f64);
            pauses += 1;
        }
        self.last_num_gc = stats.num_gc;

        tracing::trace!(num_gc = stats.num_gc, pauses, live_units, "Runtime sample reported");
    }

    /// Report immediately, then once per interval until `stop` is signalled.
    ///
    /// Stop is only observed between ticks, so a tick in progress always
    /// completes. Ticks missed because a report overran the interval are
    /// skipped, not queued.
    pub async fn run(mut self, mut stop: watch::Receiver<bool>) {
        tracing::info!(interval = ?self.interval, "Runtime sampler started");

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately.
        ticker.tick().await;
        self.report();

        loop {
            if *stop.borrow() {
                break;
            }
            tokio::select! {
                biased;
                changed = stop.changed() => {
                    // Err means every sender was dropped.
                    if changed.is_err() || *stop.borrow() {
                        break;
                    }
                }
                _ = ticker.tick() => self.report(),
            }
        }

        tracing::info!(last_num_gc = self.last_num_gc, "Runtime sampler stopped");
    }

    /// Spawn the sampling loop on the current tokio runtime.
    ///
    /// Returns immediately; must be called from within a runtime.
    pub fn start(self) -> SamplerHandle {
        let (tx, rx) = watch::channel(false);
        let task = tokio::spawn(self.run(rx));
        SamplerHandle {
            stop: StopSignal(Arc::new(tx)),
            task: Some(task),
        }
    }
}

impl std::fmt::Debug for Sampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sampler")
            .field("interval", &self.interval)
            .field("last_num_gc", &self.last_num_gc)
            .finish_non_exhaustive()
    }
}

/// Cloneable, non-blocking stop request for a running sampler.
#[derive(Debug, Clone)]
pub struct StopSignal(Arc<watch::Sender<bool>>);

impl StopSignal {
    /// Ask the sampling loop to exit after its current tick.
    ///
    /// Idempotent and safe to call from any thread or task.
    pub fn stop(&self) {
        self.0.send_replace(true);
    }

    /// Whether stop has been requested.
    pub fn is_stopped(&self) -> bool {
        *self.0.borrow()
    }
}

/// Handle to a sampler running in the background.
///
/// Dropping the handle requests stop without waiting.
#[derive(Debug)]
pub struct SamplerHandle {
    stop: StopSignal,
    task: Option<JoinHandle<()>>,
}

impl SamplerHandle {
    /// Request stop without waiting for the loop to exit.
    pub fn stop(&self) {
        self.stop.stop();
    }

    /// A stop signal that can be moved to another context.
    pub fn stopper(&self) -> StopSignal {
        self.stop.clone()
    }

    /// Whether the background task has exited.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(|task| task.is_finished())
    }

    /// Request stop and wait for the loop to exit.
    ///
    /// No observation is emitted after this returns.
    pub async fn shutdown(mut self) {
        self.stop.stop();
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            tracing::error!(error = %e, "Runtime sampler task failed");
        }
    }
}

impl Drop for SamplerHandle {
    fn drop(&mut self) {
        self.stop.stop();
    }
}
