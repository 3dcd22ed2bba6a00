//! Open-addressing hash tables: one probing/rehash core, two
//! collision-resolution engines.
//!
//! `OpenTable` owns a slot array of pooled entries. A slot is *empty*
//! (never allocated), a *tombstone* (allocated, element cleared by a
//! previous remove), or *active*. Probing steps by the
//! [`ProbePolicy`]'s increment per collision and terminates at the
//! first empty slot or an active comparer-equal element, remembering
//! the first tombstone seen so removals' slots get reused.
//!
//! The rehash trigger counts every slot ever occupied (`entries`), not
//! current occupancy: tombstones keep counting until a rehash drops
//! them, so heavy insert/remove churn over distinct keys rehashes
//! periodically even at flat `items()`. That is the intended
//! tombstone-reclamation schedule and is deliberately observable
//! through [`OpenTable::entries`] and [`OpenTable::capacity`].

use crate::alloc;
use crate::dispose::Disposer;
use crate::hash_common::{
    entry_pool, next_table_size, Comparer, Entry, HashFn, SharedEntryPool,
};
use crate::track::Tracked;
use std::cmp::Ordering;
use std::marker::PhantomData;
use std::mem::size_of;

/// Collision step policy of an engine.
pub trait ProbePolicy {
    /// Engine name used in diagnostics.
    const NAME: &'static str;
    /// Default slot count of a fresh table.
    const DEFAULT_SIZE: usize;
    /// Probe increment for the Nth collision (1-based).
    fn step(collisions: usize) -> usize;
}

/// Linear probing: one slot per collision.
#[derive(Debug)]
pub struct LinearProbe;

impl ProbePolicy for LinearProbe {
    const NAME: &'static str = "LinearHashTable";
    const DEFAULT_SIZE: usize = 997;

    fn step(_collisions: usize) -> usize {
        1
    }
}

/// Quadratic probing: the next odd increment per collision, so probe
/// offsets from home are the squares 1, 4, 9, ...
#[derive(Debug)]
pub struct QuadraticProbe;

impl ProbePolicy for QuadraticProbe {
    const NAME: &'static str = "QuadHashTable";
    const DEFAULT_SIZE: usize = 7;

    fn step(collisions: usize) -> usize {
        2 * collisions - 1
    }
}

/// Linear-probing engine.
pub type LinearHashTable<K> = OpenTable<K, LinearProbe>;
/// Quadratic-probing engine.
pub type QuadHashTable<K> = OpenTable<K, QuadraticProbe>;

enum Slot {
    /// Active slot holding a comparer-equal element.
    Match(usize),
    /// First tombstone on the probe chain (no equal element found).
    Tombstone(usize),
    /// First truly empty slot (no equal element, no tombstone).
    Empty(usize),
}

/// Open-addressing table generic over the probe policy.
pub struct OpenTable<K, P: ProbePolicy> {
    buckets: Vec<Option<Box<Entry<K>>>>,
    /// Slots ever occupied, tombstones included; the rehash trigger.
    entries: usize,
    /// Currently active elements.
    active: usize,
    comparer: Comparer<K>,
    hasher: HashFn<K>,
    disposer: Disposer<K>,
    pool: SharedEntryPool<K>,
    tracked: Tracked,
    _probe: PhantomData<P>,
}

impl<K, P: ProbePolicy> OpenTable<K, P> {
    /// Table at the engine's default size with its own bounded entry
    /// pool.
    pub fn new(comparer: Comparer<K>, hasher: HashFn<K>, disposer: Disposer<K>) -> Self {
        Self::with_pool(comparer, hasher, disposer, entry_pool())
    }

    /// Table sharing an entry pool with other tables of the same key
    /// type.
    pub fn with_pool(
        comparer: Comparer<K>,
        hasher: HashFn<K>,
        disposer: Disposer<K>,
        pool: SharedEntryPool<K>,
    ) -> Self {
        Self::sized(comparer, hasher, disposer, pool, P::DEFAULT_SIZE)
    }

    /// Table with at least `size` slots (rounded up to the next
    /// acceptable prime).
    pub fn with_size(
        comparer: Comparer<K>,
        hasher: HashFn<K>,
        disposer: Disposer<K>,
        size: usize,
    ) -> Self {
        Self::sized(comparer, hasher, disposer, entry_pool(), size)
    }

    fn sized(
        comparer: Comparer<K>,
        hasher: HashFn<K>,
        disposer: Disposer<K>,
        pool: SharedEntryPool<K>,
        size: usize,
    ) -> Self {
        let size = next_table_size(size.max(2));
        let mut buckets = Vec::new();
        buckets.resize_with(size, || None);
        Self {
            buckets,
            entries: 0,
            active: 0,
            comparer,
            hasher,
            disposer,
            pool,
            tracked: Tracked::new(P::NAME, size * size_of::<Option<Box<Entry<K>>>>()),
            _probe: PhantomData,
        }
    }

    /// Currently active elements.
    pub fn items(&self) -> usize {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active == 0
    }

    /// Slots ever occupied (tombstones included) since the last
    /// rehash.
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Current slot count.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Probe for `key`. Stops at the first empty slot or an active
    /// equal element; a tombstone seen along the chain wins over the
    /// terminating empty slot.
    fn find_position(&self, key: &K) -> Slot {
        let size = self.buckets.len();
        let mut index = (self.hasher)(key, size) % size;
        let mut first_tombstone: Option<usize> = None;
        let mut collisions = 0usize;
        loop {
            match &self.buckets[index] {
                None => {
                    return match first_tombstone {
                        Some(t) => Slot::Tombstone(t),
                        None => Slot::Empty(index),
                    }
                }
                Some(entry) => match &entry.element {
                    Some(element) => {
                        if (self.comparer)(element, key) == Ordering::Equal {
                            return Slot::Match(index);
                        }
                    }
                    None => {
                        if first_tombstone.is_none() {
                            first_tombstone = Some(index);
                        }
                    }
                },
            }
            collisions += 1;
            // The load factor cap guarantees an empty slot on every
            // chain; a full lap means the bookkeeping broke.
            crate::debug_invariant!(
                collisions <= size,
                "{}: probe chain failed to terminate",
                P::NAME
            );
            index = (index + P::step(collisions)) % size;
        }
    }

    /// Insert `key`, replacing (and disposing) any comparer-equal
    /// element already present. New occupancy beyond half the table
    /// triggers a rehash.
    pub fn insert(&mut self, key: K) {
        match self.find_position(&key) {
            Slot::Match(index) => {
                if !self.disposer.has_hook() {
                    log::warn!(
                        "{}: replacing an element with no disposer configured; the previous element is dropped",
                        P::NAME
                    );
                }
                let entry = self.buckets[index].as_mut().expect("match slot occupied");
                if let Some(old) = entry.element.replace(key) {
                    self.disposer.dispose(old);
                }
            }
            Slot::Tombstone(index) => {
                let entry = self.buckets[index]
                    .as_mut()
                    .expect("tombstone slot occupied");
                entry.element = Some(key);
                self.active += 1;
                // entries is untouched: the slot was already counted.
            }
            Slot::Empty(index) => {
                let entry = self.pool.borrow_mut().acquire(Entry::new(key));
                self.buckets[index] = Some(entry);
                self.entries += 1;
                self.active += 1;
                if self.entries > self.buckets.len() / 2 {
                    self.rehash();
                }
            }
        }
    }

    /// Remove the element equal to `key`, disposing it. The slot
    /// becomes a tombstone.
    pub fn remove(&mut self, key: &K) -> bool {
        match self.find_position(key) {
            Slot::Match(index) => {
                let entry = self.buckets[index].as_mut().expect("match slot occupied");
                let element = entry.element.take().expect("active slot has element");
                self.active -= 1;
                self.disposer.dispose(element);
                true
            }
            _ => false,
        }
    }

    /// Retrieve-and-remove the element equal to `key` without running
    /// the disposal hook. The slot becomes a tombstone.
    pub fn take(&mut self, key: &K) -> Option<K> {
        match self.find_position(key) {
            Slot::Match(index) => {
                let entry = self.buckets[index].as_mut().expect("match slot occupied");
                let element = entry.element.take();
                if element.is_some() {
                    self.active -= 1;
                }
                element
            }
            _ => None,
        }
    }

    /// The active element equal to `key`, if any.
    pub fn find(&self, key: &K) -> Option<&K> {
        match self.find_position(key) {
            Slot::Match(index) => self.buckets[index].as_ref()?.element.as_ref(),
            _ => None,
        }
    }

    /// The Nth active element in slot-array order, **one-based**.
    pub fn retrieve(&self, ordinal: usize) -> Option<&K> {
        if ordinal == 0 {
            return None;
        }
        self.active_elements().nth(ordinal - 1)
    }

    /// Visit active elements in slot-array order; the callback
    /// returning `false` aborts the traversal.
    pub fn iterate<F>(&self, mut f: F)
    where
        F: FnMut(&K) -> bool,
    {
        for element in self.active_elements() {
            if !f(element) {
                break;
            }
        }
    }

    /// Dispose every active element and recycle every entry; capacity
    /// is retained and the tombstone count resets.
    pub fn make_empty(&mut self) {
        let disposer = self.disposer.clone();
        let pool = self.pool.clone();
        for bucket in &mut self.buckets {
            if let Some(mut entry) = bucket.take() {
                if let Some(element) = entry.element.take() {
                    disposer.dispose(element);
                }
                pool.borrow_mut().release(entry);
            }
        }
        self.entries = 0;
        self.active = 0;
    }

    /// Mark this table's (and its pool's) tracker records during a
    /// leak pass.
    pub fn note_refs(&self) {
        self.tracked.mark();
        self.pool.borrow().note_refs();
    }

    fn active_elements(&self) -> impl Iterator<Item = &K> {
        self.buckets
            .iter()
            .filter_map(|bucket| bucket.as_ref()?.element.as_ref())
    }

    /// Grow to the next acceptable prime past double and reinsert the
    /// active entries; tombstone entries go back to the pool. This is
    /// the only point where tombstone accumulation is reclaimed.
    fn rehash(&mut self) {
        let new_size = next_table_size(self.buckets.len() * 2);
        let mut fresh = Vec::new();
        if !alloc::grow(&mut fresh, new_size) {
            // Table stays as it was; the next fresh-slot insert
            // re-trips the trigger and retries the rehash.
            return;
        }
        fresh.resize_with(new_size, || None);
        let old = std::mem::replace(&mut self.buckets, fresh);
        self.entries = self.active;
        for entry in old.into_iter().flatten() {
            if entry.element.is_some() {
                self.reinsert(entry);
            } else {
                self.pool.borrow_mut().release(entry);
            }
        }
        self.tracked
            .set_bytes(new_size * size_of::<Option<Box<Entry<K>>>>());
    }

    /// Place an active entry into the fresh (tombstone-free) table.
    fn reinsert(&mut self, entry: Box<Entry<K>>) {
        let size = self.buckets.len();
        let key = entry.element.as_ref().expect("reinserted entry active");
        let mut index = (self.hasher)(key, size) % size;
        let mut collisions = 0usize;
        while self.buckets[index].is_some() {
            collisions += 1;
            crate::debug_invariant!(
                collisions <= size,
                "{}: rehash probe failed to terminate",
                P::NAME
            );
            index = (index + P::step(collisions)) % size;
        }
        self.buckets[index] = Some(entry);
    }
}

impl<K, P: ProbePolicy> Drop for OpenTable<K, P> {
    fn drop(&mut self) {
        self.make_empty();
    }
}

impl<K, P: ProbePolicy> std::fmt::Debug for OpenTable<K, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(P::NAME)
            .field("capacity", &self.buckets.len())
            .field("entries", &self.entries)
            .field("active", &self.active)
            .finish()
    }
}
