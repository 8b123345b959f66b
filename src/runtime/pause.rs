//! Pause log: the writer side of the pause history ring.
//!
//! Host code reports its own stop-the-world phases (compaction, cache sweeps,
//! arena resets) with [`record_pause`] or a scoped [`PauseTimer`]. The process
//! source copies the global log into every [`MemStats`] snapshot.

use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use super::stats::{MemStats, PAUSE_HISTORY_LEN};

/// Fixed-size record of the most recent pause durations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PauseHistory {
    pause_ns: [u64; PAUSE_HISTORY_LEN],
    num_gc: u32,
    pause_total_ns: u64,
}

impl PauseHistory {
    /// Create an empty history.
    pub const fn new() -> Self {
        Self {
            pause_ns: [0; PAUSE_HISTORY_LEN],
            num_gc: 0,
            pause_total_ns: 0,
        }
    }

    /// Record one pause, overwriting the oldest slot once the ring is full.
    pub fn record(&mut self, pause: Duration) {
        let ns = u64::try_from(pause.as_nanos()).unwrap_or(u64::MAX);
        let slot = self.num_gc as usize % PAUSE_HISTORY_LEN;
        self.pause_ns[slot] = ns;
        self.num_gc = self.num_gc.wrapping_add(1);
        self.pause_total_ns = self.pause_total_ns.saturating_add(ns);
    }

    /// Number of pauses recorded so far (wraps at 2^32).
    pub fn num_gc(&self) -> u32 {
        self.num_gc
    }

    /// Sum of all recorded pauses in nanoseconds.
    pub fn pause_total_ns(&self) -> u64 {
        self.pause_total_ns
    }

    /// Copy the pause counters into a snapshot.
    pub fn fill(&self, stats: &mut MemStats) {
        stats.num_gc = self.num_gc;
        stats.pause_total_ns = self.pause_total_ns;
        stats.pause_ns = self.pause_ns;
    }
}

impl Default for PauseHistory {
    fn default() -> Self {
        Self::new()
    }
}

static PAUSES: Mutex<PauseHistory> = Mutex::new(PauseHistory::new());

fn pauses() -> MutexGuard<'static, PauseHistory> {
    // Poisoning is ignored: the ring only holds plain integers.
    PAUSES.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Append a pause to the process-wide pause log.
pub fn record_pause(pause: Duration) {
    pauses().record(pause);
}

/// Copy the process-wide pause log into a snapshot.
pub fn fill_pause_stats(stats: &mut MemStats) {
    pauses().fill(stats);
}

/// Records the lifetime of a scope as one pause when dropped.
///
/// ```
/// use runtime_sampler::runtime::PauseTimer;
///
/// {
///     let _pause = PauseTimer::start();
///     // stop-the-world work
/// }
/// ```
#[derive(Debug)]
pub struct PauseTimer {
    started: Instant,
}

impl PauseTimer {
    /// Start timing a pause.
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Drop for PauseTimer {
    fn drop(&mut self) {
        record_pause(self.started.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_writes_slot_of_cycle() {
        let mut history = PauseHistory::new();
        for i in 1..=3u64 {
            history.record(Duration::from_nanos(i * 10));
        }
        assert_eq!(history.num_gc(), 3);
        assert_eq!(history.pause_total_ns(), 60);

        let mut stats = MemStats::default();
        history.fill(&mut stats);

        assert_eq!(stats.num_gc, 3);
        assert_eq!(stats.pause_total_ns, 60);
        assert_eq!(stats.pause_ns[MemStats::pause_slot(1)], 10);
        assert_eq!(stats.pause_ns[MemStats::pause_slot(3)], 30);
    }

    #[test]
    fn test_record_overwrites_oldest() {
        let mut history = PauseHistory::new();
        for i in 0..(PAUSE_HISTORY_LEN as u64 + 2) {
            history.record(Duration::from_nanos(i));
        }

        let mut stats = MemStats::default();
        history.fill(&mut stats);

        // Cycles 257 and 258 reuse slots 0 and 1.
        assert_eq!(stats.pause_ns[0], 256);
        assert_eq!(stats.pause_ns[1], 257);
        assert_eq!(stats.pause_ns[2], 2);
    }

    #[test]
    fn test_pause_timer_records_on_drop() {
        let before = pauses().num_gc();
        {
            let _timer = PauseTimer::start();
        }
        let after = pauses().num_gc();
        // Other tests may record concurrently, so only require progress.
        assert!(after.wrapping_sub(before) >= 1);
    }
}
