//! Growable, bounds-checked, owning array of optional slots.
//!
//! `SlotArray` is the sparse workhorse of the toolkit: `put` grows the
//! slot array on demand (doubling, never less than the requested
//! location plus one) and reports failure with no partial mutation
//! when the room cannot be reserved, `get` on any out-of-range
//! location is a defensive `None` rather than an error, and `items`
//! reports the current capacity rather than the number of occupied
//! slots, a documented quirk of this interface.

use crate::alloc;
use crate::dispose::Disposer;
use crate::track::Tracked;
use std::mem::size_of;

/// Growable array of `Option<T>` slots that owns its occupants.
#[derive(Debug)]
pub struct SlotArray<T> {
    slots: Vec<Option<T>>,
    disposer: Disposer<T>,
    tracked: Tracked,
}

impl<T> SlotArray<T> {
    /// Fully lazy array: no slots until the first `put`.
    pub fn new(disposer: Disposer<T>) -> Self {
        Self::with_capacity(disposer, 0)
    }

    /// Array pre-sized to `capacity` empty slots.
    pub fn with_capacity(disposer: Disposer<T>, capacity: usize) -> Self {
        let mut slots = Vec::new();
        slots.resize_with(capacity, || None);
        Self {
            slots,
            disposer,
            tracked: Tracked::new("SlotArray", capacity * size_of::<Option<T>>()),
        }
    }

    /// Store `value` at `location`, growing the array when the location
    /// is out of range and disposing any previous occupant of the slot.
    /// Returns `false`, with the array untouched, when the growth
    /// reservation fails after the out-of-memory handler's retry.
    pub fn put(&mut self, location: usize, value: T) -> bool {
        if location >= self.slots.len() {
            // Double, but never allocate less than the slot demanded.
            let grown = self.slots.len().saturating_mul(2).max(location + 1);
            let additional = grown - self.slots.len();
            if !alloc::grow(&mut self.slots, additional) {
                return false;
            }
            self.slots.resize_with(grown, || None);
            self.tracked
                .set_bytes(self.slots.len() * size_of::<Option<T>>());
        }
        if let Some(old) = self.slots[location].replace(value) {
            self.disposer.dispose(old);
        }
        true
    }

    /// The occupant at `location`; out of range or empty is `None`.
    pub fn get(&self, location: usize) -> Option<&T> {
        self.slots.get(location).and_then(|slot| slot.as_ref())
    }

    /// Retrieve-and-remove the occupant at `location` without running
    /// the disposal hook.
    pub fn take(&mut self, location: usize) -> Option<T> {
        self.slots.get_mut(location).and_then(|slot| slot.take())
    }

    /// Dispose every occupant; capacity is retained.
    pub fn make_empty(&mut self) {
        let disposer = self.disposer.clone();
        for slot in &mut self.slots {
            if let Some(value) = slot.take() {
                disposer.dispose(value);
            }
        }
    }

    /// Current capacity in slots (not the occupied count).
    pub fn items(&self) -> usize {
        self.slots.len()
    }

    /// Visit every slot, occupied or not, in index order. The callback
    /// returning `false` aborts the traversal.
    pub fn iterate<F>(&self, mut f: F)
    where
        F: FnMut(Option<&T>) -> bool,
    {
        for slot in &self.slots {
            if !f(slot.as_ref()) {
                break;
            }
        }
    }

    /// Mark this array's tracker record during a leak pass.
    pub fn note_refs(&self) {
        self.tracked.mark();
    }
}

impl<T> Drop for SlotArray<T> {
    fn drop(&mut self) {
        self.make_empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Invariant: `get(i)` returns the last value `put` at `i`, and
    /// never-written in-range locations read as `None`.
    #[test]
    fn put_then_get_round_trip() {
        let mut a: SlotArray<i32> = SlotArray::new(Disposer::none());
        assert!(a.put(4, 40));
        assert!(a.put(1, 10));
        assert!(a.put(4, 44));
        assert_eq!(a.get(4), Some(&44));
        assert_eq!(a.get(1), Some(&10));
        assert_eq!(a.get(0), None);
        assert_eq!(a.get(3), None);
    }

    /// Invariant: out-of-range `get` is a defensive `None`, never a
    /// panic; `items` reflects capacity after growth.
    #[test]
    fn out_of_range_get_is_none() {
        let a: SlotArray<i32> = SlotArray::with_capacity(Disposer::none(), 3);
        assert_eq!(a.items(), 3);
        assert_eq!(a.get(2), None);
        assert_eq!(a.get(99), None);
    }

    /// Invariant: growth reaches at least `location + 1` slots and
    /// never loses existing occupants. Exercises arbitrary,
    /// non-monotonic locations so under-allocation would be caught.
    #[test]
    fn growth_preserves_occupants() {
        let mut a: SlotArray<usize> = SlotArray::new(Disposer::none());
        let locations = [7usize, 0, 31, 2, 15, 63, 8, 1];
        for &loc in &locations {
            a.put(loc, loc * 10);
            assert!(a.items() > loc);
        }
        for &loc in &locations {
            assert_eq!(a.get(loc), Some(&(loc * 10)));
        }
        // Unwritten trailing slots stay empty.
        for i in 0..a.items() {
            if !locations.contains(&i) {
                assert_eq!(a.get(i), None);
            }
        }
    }

    /// Invariant: `put` over an occupied slot disposes the previous
    /// occupant exactly once; `take` never runs the hook.
    #[test]
    fn overwrite_disposes_and_take_does_not() {
        let disposed = Rc::new(Cell::new(0));
        let d = disposed.clone();
        let mut a: SlotArray<i32> = SlotArray::new(Disposer::new(move |_| d.set(d.get() + 1)));
        a.put(0, 1);
        a.put(0, 2);
        assert_eq!(disposed.get(), 1);
        assert_eq!(a.take(0), Some(2));
        assert_eq!(disposed.get(), 1, "take skips the disposal hook");
        assert_eq!(a.get(0), None);
    }

    /// Invariant: `make_empty` disposes every occupant and keeps
    /// capacity; teardown disposes whatever is still owned.
    #[test]
    fn make_empty_and_drop_dispose_all() {
        let disposed = Rc::new(Cell::new(0));
        let d = disposed.clone();
        let mut a: SlotArray<i32> = SlotArray::new(Disposer::new(move |_| d.set(d.get() + 1)));
        a.put(0, 1);
        a.put(5, 6);
        let cap = a.items();
        a.make_empty();
        assert_eq!(disposed.get(), 2);
        assert_eq!(a.items(), cap);
        a.put(3, 4);
        drop(a);
        assert_eq!(disposed.get(), 3);
    }

    /// Invariant: `iterate` visits every slot (including empty ones) in
    /// index order and stops early when the callback returns false.
    #[test]
    fn iterate_visits_all_slots_in_order() {
        let mut a: SlotArray<i32> = SlotArray::with_capacity(Disposer::none(), 4);
        a.put(1, 11);
        a.put(3, 33);

        let mut seen = Vec::new();
        a.iterate(|slot| {
            seen.push(slot.copied());
            true
        });
        assert_eq!(seen, vec![None, Some(11), None, Some(33)]);

        let mut visited = 0;
        a.iterate(|_| {
            visited += 1;
            visited < 2
        });
        assert_eq!(visited, 2, "false return aborts the traversal");
    }
}
