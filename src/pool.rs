//! Fixed-type chunk recycler with an external free stack.
//!
//! A `Pool<T>` hands out `Box<T>` chunks and keeps released chunks on
//! an idle stack for reuse, so steady-state acquire/release cycles stop
//! touching the global allocator. A bounded pool caps the idle stack:
//! once the cap is reached, released chunks are freed instead of
//! retained.
//!
//! The classic intrusive free list threads its next pointer through
//! the freed chunk's own memory; here the stack is external
//! (`Vec<Box<T>>`) and freed chunks never store linkage, so no freed
//! memory is ever read back.
//!
//! A released chunk keeps its last contents until it is reused or the
//! pool drops; callers that recycle payload-bearing values should clear
//! the payload before release (the hash tables release entries with
//! their element already taken).

use crate::track::Tracked;
use std::mem::size_of;

/// Lifetime counters for a pool, exposed so tests can observe whether
/// an acquire hit the idle stack or the allocator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Chunks allocated fresh from the global allocator.
    pub fresh: u64,
    /// Chunks reused from the idle stack.
    pub recycled: u64,
    /// Chunks freed on release because the idle cap was reached.
    pub released: u64,
}

/// Chunk recycler for values of a single type.
#[derive(Debug)]
pub struct Pool<T> {
    idle: Vec<Box<T>>,
    max_idle: Option<usize>,
    stats: PoolStats,
    tracked: Tracked,
}

impl<T> Pool<T> {
    /// Unbounded pool: every released chunk is retained.
    pub fn new() -> Self {
        Self::with_cap(None)
    }

    /// Bounded pool: retains at most `max_idle` idle chunks.
    pub fn bounded(max_idle: usize) -> Self {
        Self::with_cap(Some(max_idle))
    }

    fn with_cap(max_idle: Option<usize>) -> Self {
        Self {
            idle: Vec::new(),
            max_idle,
            stats: PoolStats::default(),
            tracked: Tracked::new("Pool", 0),
        }
    }

    /// Produce a chunk holding `value`, reusing an idle chunk when one
    /// is available.
    pub fn acquire(&mut self, value: T) -> Box<T> {
        match self.idle.pop() {
            Some(mut chunk) => {
                *chunk = value;
                self.stats.recycled += 1;
                self.tracked.set_bytes(self.idle.len() * size_of::<T>());
                chunk
            }
            None => {
                self.stats.fresh += 1;
                Box::new(value)
            }
        }
    }

    /// Return a chunk to the pool. A bounded pool at its cap frees the
    /// chunk instead.
    pub fn release(&mut self, chunk: Box<T>) {
        if let Some(cap) = self.max_idle {
            if self.idle.len() >= cap {
                self.stats.released += 1;
                drop(chunk);
                return;
            }
        }
        self.idle.push(chunk);
        self.tracked.set_bytes(self.idle.len() * size_of::<T>());
    }

    /// Number of chunks currently retained for reuse.
    pub fn idle(&self) -> usize {
        self.idle.len()
    }

    /// The idle cap, if this pool is bounded.
    pub fn max_idle(&self) -> Option<usize> {
        self.max_idle
    }

    /// Lifetime counters.
    pub fn stats(&self) -> PoolStats {
        self.stats
    }

    /// Mark this pool's tracker record during a leak pass.
    pub fn note_refs(&self) {
        self.tracked.mark();
    }
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}
