//! Point-in-time memory and pause statistics.

/// Number of individual pause durations retained in [`MemStats::pause_ns`].
pub const PAUSE_HISTORY_LEN: usize = 256;

/// A snapshot of allocator and pause counters for the current process.
///
/// All byte and object counters are cumulative or instantaneous exactly as
/// their names suggest; `pause_ns` is a circular buffer where the pause for
/// cycle `n` (1-based) lives at slot `(n - 1) % 256`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemStats {
    /// Bytes of live heap allocations.
    pub alloc: u64,
    /// Cumulative count of deallocations.
    pub frees: u64,
    /// Bytes of live heap allocations (same as `alloc` for Rust heaps).
    pub heap_alloc: u64,
    /// Bytes reserved by the process but not resident.
    pub heap_idle: u64,
    /// Bytes resident in memory.
    pub heap_inuse: u64,
    /// Number of live heap objects.
    pub heap_objects: u64,
    /// Bytes returned to the operating system.
    pub heap_released: u64,
    /// Bytes of address space reserved by the process.
    pub heap_sys: u64,
    /// Pointer lookups performed by the runtime.
    pub lookups: u64,
    /// Cumulative count of allocations.
    pub mallocs: u64,
    /// Number of completed collection cycles.
    pub num_gc: u32,
    /// Cumulative time spent in collection pauses, in nanoseconds.
    pub pause_total_ns: u64,
    /// Cumulative bytes allocated, never decreasing.
    pub total_alloc: u64,
    /// Circular history of the most recent pause durations, in nanoseconds.
    pub pause_ns: [u64; PAUSE_HISTORY_LEN],
}

impl Default for MemStats {
    fn default() -> Self {
        Self {
            alloc: 0,
            frees: 0,
            heap_alloc: 0,
            heap_idle: 0,
            heap_inuse: 0,
            heap_objects: 0,
            heap_released: 0,
            heap_sys: 0,
            lookups: 0,
            mallocs: 0,
            num_gc: 0,
            pause_total_ns: 0,
            total_alloc: 0,
            pause_ns: [0; PAUSE_HISTORY_LEN],
        }
    }
}

impl MemStats {
    /// Slot in `pause_ns` holding the pause of the given 1-based cycle number.
    pub fn pause_slot(cycle: u32) -> usize {
        (cycle.wrapping_sub(1) as usize) % PAUSE_HISTORY_LEN
    }
}
