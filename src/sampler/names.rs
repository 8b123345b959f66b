//! Stat names emitted by the sampler.

pub const STAT_MEMSTATS_ALLOC: &str = "mem.stats.alloc";
pub const STAT_MEMSTATS_FREES: &str = "mem.stats.frees";
pub const STAT_MEMSTATS_HEAP_ALLOC: &str = "mem.stats.heap_alloc";
pub const STAT_MEMSTATS_HEAP_IDLE: &str = "mem.stats.heap_idle";
pub const STAT_MEMSTATS_HEAP_INUSE: &str = "mem.stats.heap_inuse";
pub const STAT_MEMSTATS_HEAP_OBJECTS: &str = "mem.stats.heap_objects";
pub const STAT_MEMSTATS_HEAP_RELEASED: &str = "mem.stats.heap_released";
pub const STAT_MEMSTATS_HEAP_SYS: &str = "mem.stats.heap_sys";
pub const STAT_MEMSTATS_LOOKUPS: &str = "mem.stats.lookups";
pub const STAT_MEMSTATS_MALLOCS: &str = "mem.stats.mallocs";
pub const STAT_MEMSTATS_NUM_GC: &str = "mem.stats.num_gc";
pub const STAT_MEMSTATS_PAUSE_TOTAL_NS: &str = "mem.stats.pause_total_ns";
pub const STAT_MEMSTATS_TOTAL_ALLOC: &str = "mem.stats.total_alloc";
/// Histogram of individual pause durations.
pub const STAT_MEMSTATS_PAUSE_NS: &str = "mem.stats.pause_ns";
/// Gauge of live concurrent execution units (threads).
pub const STAT_GOROUTINES_EXIST: &str = "goroutines.exist";

/// Every gauge name, in emission order.
pub const GAUGE_NAMES: [&str; 14] = [
    STAT_MEMSTATS_ALLOC,
    STAT_MEMSTATS_FREES,
    STAT_MEMSTATS_HEAP_ALLOC,
    STAT_MEMSTATS_HEAP_IDLE,
    STAT_MEMSTATS_HEAP_INUSE,
    STAT_MEMSTATS_HEAP_OBJECTS,
    STAT_MEMSTATS_HEAP_RELEASED,
    STAT_MEMSTATS_HEAP_SYS,
    STAT_MEMSTATS_LOOKUPS,
    STAT_MEMSTATS_MALLOCS,
    STAT_MEMSTATS_NUM_GC,
    STAT_MEMSTATS_PAUSE_TOTAL_NS,
    STAT_MEMSTATS_TOTAL_ALLOC,
    STAT_GOROUTINES_EXIST,
];
