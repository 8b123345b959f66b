//! Runtime statistics of the host process.
//!
//! - [`MemStats`]: the snapshot read on every sampler tick
//! - [`PauseHistory`], [`record_pause`], [`PauseTimer`]: the 256-slot pause log
//! - [`CountingAllocator`]: global allocator feeding the allocation counters
//! - [`ProcessSource`]: default [`StatsSource`](crate::sampler::StatsSource)

mod allocator;
mod pause;
mod process;
mod stats;

pub use allocator::{AllocCounters, CountingAllocator};
pub use pause::{PauseHistory, PauseTimer, fill_pause_stats, record_pause};
pub use process::ProcessSource;
pub use stats::{MemStats, PAUSE_HISTORY_LEN};
