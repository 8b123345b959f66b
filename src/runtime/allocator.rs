//! Counting global allocator.
//!
//! Wraps another [`GlobalAlloc`] (the system allocator by default) and keeps
//! process-wide allocation counters that [`ProcessSource`](super::ProcessSource)
//! reports as `mem.stats.*` gauges. Install it in the binary:
//!
//! ```rust,ignore
//! use runtime_sampler::runtime::CountingAllocator;
//!
//! #[global_allocator]
//! static GLOBAL: CountingAllocator = CountingAllocator::system();
//! ```

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, Ordering};

static LIVE_BYTES: AtomicU64 = AtomicU64::new(0);
static TOTAL_BYTES: AtomicU64 = AtomicU64::new(0);
static MALLOCS: AtomicU64 = AtomicU64::new(0);
static FREES: AtomicU64 = AtomicU64::new(0);

/// Allocation counters read from [`CountingAllocator`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocCounters {
    /// Bytes currently allocated.
    pub live_bytes: u64,
    /// Bytes allocated since start, never decreasing.
    pub total_bytes: u64,
    /// Number of allocations since start.
    pub mallocs: u64,
    /// Number of deallocations since start.
    pub frees: u64,
}

impl AllocCounters {
    /// Read the current counters.
    ///
    /// All zeros unless a [`CountingAllocator`] is the global allocator.
    pub fn read() -> Self {
        Self {
            live_bytes: LIVE_BYTES.load(Ordering::Relaxed),
            total_bytes: TOTAL_BYTES.load(Ordering::Relaxed),
            mallocs: MALLOCS.load(Ordering::Relaxed),
            frees: FREES.load(Ordering::Relaxed),
        }
    }

    /// Objects allocated and not yet freed.
    pub fn live_objects(&self) -> u64 {
        self.mallocs.saturating_sub(self.frees)
    }
}

/// A [`GlobalAlloc`] wrapper that counts allocations and bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct CountingAllocator<A = System> {
    inner: A,
}

impl CountingAllocator<System> {
    /// Counting wrapper around the system allocator.
    pub const fn system() -> Self {
        Self { inner: System }
    }
}

impl<A> CountingAllocator<A> {
    /// Counting wrapper around `inner`.
    pub const fn new(inner: A) -> Self {
        Self { inner }
    }
}

fn on_alloc(size: usize) {
    let size = size as u64;
    LIVE_BYTES.fetch_add(size, Ordering::Relaxed);
    TOTAL_BYTES.fetch_add(size, Ordering::Relaxed);
    MALLOCS.fetch_add(1, Ordering::Relaxed);
}

fn on_dealloc(size: usize) {
    LIVE_BYTES.fetch_sub(size as u64, Ordering::Relaxed);
    FREES.fetch_add(1, Ordering::Relaxed);
}

// SAFETY: every method forwards to the inner allocator unchanged and only
// touches atomics on the side; no allocation happens while counting.
unsafe impl<A: GlobalAlloc> GlobalAlloc for CountingAllocator<A> {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { self.inner.alloc(layout) };
        if !ptr.is_null() {
            on_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { self.inner.alloc_zeroed(layout) };
        if !ptr.is_null() {
            on_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        on_dealloc(layout.size());
        unsafe { self.inner.dealloc(ptr, layout) };
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { self.inner.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            // Counted as a free of the old block and an allocation of the new one.
            on_dealloc(layout.size());
            on_alloc(new_size);
        }
        new_ptr
    }
}
