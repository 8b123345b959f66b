//! Recovery of new pause events from the circular pause history.

use crate::runtime::{MemStats, PAUSE_HISTORY_LEN};

/// Pauses recorded since `last_num_gc`, oldest first.
///
/// `delta` is computed with wrapping 32-bit arithmetic, so exactly 2^32 new
/// cycles look like none. When more than 256 cycles happened the older pauses
/// have already been overwritten and only the newest 256 are returned.
/// A counter that moved backwards (e.g. `num_gc = 1`, `last_num_gc = 255`)
/// reads as a wrap of nearly 2^32 cycles and is capped at 256 the same way.
pub fn new_pauses(stats: &MemStats, last_num_gc: u32) -> impl Iterator<Item = u64> + '_ {
    let delta = stats.num_gc.wrapping_sub(last_num_gc);
    let count = (delta as usize).min(PAUSE_HISTORY_LEN);
    let first = stats.num_gc.wrapping_sub(count as u32) as usize % PAUSE_HISTORY_LEN;

    (0..count).map(move |i| stats.pause_ns[(first + i) % PAUSE_HISTORY_LEN])
}
