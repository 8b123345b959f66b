//! Default statistics source for the running process.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

use super::allocator::AllocCounters;
use super::pause::fill_pause_stats;
use super::stats::MemStats;
use crate::sampler::StatsSource;

/// Reads statistics of the current process.
///
/// - allocation counters come from [`CountingAllocator`](super::CountingAllocator)
/// - resident and virtual sizes come from `sysinfo`
/// - pause history comes from the global pause log
///
/// `heap_released` and `lookups` have no counterpart in a Rust process and
/// are always zero.
///
/// `read_mem_stats` refreshes the process entry once and caches its thread
/// count, which the following `live_units` call takes instead of refreshing
/// again.
pub struct ProcessSource {
    system: Mutex<System>,
    pid: Option<Pid>,
    /// Thread count from the last refresh; 0 when already taken.
    cached_threads: AtomicUsize,
    refreshes: AtomicU64,
}

impl ProcessSource {
    /// Create a source bound to the current process.
    pub fn new() -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                tracing::warn!(error = %e, "Cannot resolve current pid; process sizes will be zero");
                None
            }
        };

        Self {
            system: Mutex::new(System::new()),
            pid,
            cached_threads: AtomicUsize::new(0),
            refreshes: AtomicU64::new(0),
        }
    }

    /// Refresh the process entry and apply `f` to it.
    fn with_process<T>(&self, f: impl FnOnce(&sysinfo::Process) -> T) -> Option<T> {
        let pid = self.pid?;
        let mut system = self
            .system
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing().with_memory().with_tasks(),
        );
        self.refreshes.fetch_add(1, Ordering::Relaxed);
        system.process(pid).map(f)
    }
}

/// Number of threads of `process`, or 1 where the task list is unavailable.
fn thread_count(process: &sysinfo::Process) -> usize {
    // The task list is only exposed on Linux; elsewhere count the caller.
    process
        .tasks()
        .map(|tasks| tasks.len())
        .filter(|&n| n > 0)
        .unwrap_or(1)
}

impl Default for ProcessSource {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProcessSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessSource")
            .field("pid", &self.pid)
            .finish_non_exhaustive()
    }
}

impl StatsSource for ProcessSource {
    fn read_mem_stats(&self, stats: &mut MemStats) {
        let counters = AllocCounters::read();
        stats.alloc = counters.live_bytes;
        stats.heap_alloc = counters.live_bytes;
        stats.total_alloc = counters.total_bytes;
        stats.mallocs = counters.mallocs;
        stats.frees = counters.frees;
        stats.heap_objects = counters.live_objects();
        stats.heap_released = 0;
        stats.lookups = 0;

        let (resident, reserved, threads) = self
            .with_process(|p| (p.memory(), p.virtual_memory(), thread_count(p)))
            .unwrap_or_default();
        self.cached_threads.store(threads, Ordering::Relaxed);
        stats.heap_inuse = resident;
        stats.heap_sys = reserved;
        stats.heap_idle = reserved.saturating_sub(resident);

        fill_pause_stats(stats);
    }

    fn live_units(&self) -> usize {
        match self.cached_threads.swap(0, Ordering::Relaxed) {
            0 => self.with_process(thread_count).unwrap_or(1),
            threads => threads,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_mem_stats_reports_process_sizes() {
        let source = ProcessSource::new();
        let mut stats = MemStats::default();
        source.read_mem_stats(&mut stats);

        assert!(stats.heap_sys >= stats.heap_inuse || stats.heap_sys == 0);
        assert_eq!(stats.heap_idle, stats.heap_sys.saturating_sub(stats.heap_inuse));
        assert_eq!(stats.lookups, 0);
        assert_eq!(stats.heap_released, 0);
    }

    #[test]
    fn test_live_units_at_least_one() {
        let source = ProcessSource::new();
        assert!(source.live_units() >= 1);
    }

    #[test]
    fn test_one_refresh_per_tick() {
        let source = ProcessSource::new();
        let mut stats = MemStats::default();

        source.read_mem_stats(&mut stats);
        let after_read = source.refreshes.load(Ordering::Relaxed);
        assert!(source.live_units() >= 1);
        assert_eq!(source.refreshes.load(Ordering::Relaxed), after_read);

        // Without a preceding read the count is fetched fresh.
        assert!(source.live_units() >= 1);
        let expected = after_read + u64::from(source.pid.is_some());
        assert_eq!(source.refreshes.load(Ordering::Relaxed), expected);
    }
}
