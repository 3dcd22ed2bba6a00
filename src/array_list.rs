//! Contiguous list representation and its index cursor.
//!
//! `ArrayList` keeps its elements packed in a `Vec`: removals compact,
//! there is never a gap, and capacity doubles on demand (the `Vec`
//! machinery makes grow-plus-insert atomic from the caller's point of
//! view). Two indexing conventions coexist on purpose: `get` is
//! zero-based like everything else in the crate, while `indexed_item`
//! is **one-based**, a historical quirk of this accessor that callers
//! depend on, preserved and tested rather than unified.
//!
//! `ArrayCursor` is a detached position (index + in-list flag): every
//! operation takes the list as a parameter, so any number of cursors
//! can exist over one list, and a cursor left behind by a mutation
//! degrades to not-in-list instead of touching freed memory.

use crate::alloc;
use crate::dispose::Disposer;
use crate::track::Tracked;
use std::mem::size_of;

/// Starting capacity of a new list.
pub const INITIAL_CAPACITY: usize = 8;

/// Contiguous, owning list.
#[derive(Debug)]
pub struct ArrayList<T> {
    buf: Vec<T>,
    disposer: Disposer<T>,
    tracked: Tracked,
}

impl<T> ArrayList<T> {
    pub fn new(disposer: Disposer<T>) -> Self {
        Self {
            buf: Vec::with_capacity(INITIAL_CAPACITY),
            disposer,
            tracked: Tracked::new("ArrayList", INITIAL_CAPACITY * size_of::<T>()),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Insert at the front, shifting everything up by one.
    pub fn push_front(&mut self, value: T) {
        self.reserve_one();
        self.buf.insert(0, value);
        self.sync_tracked();
    }

    /// Append at the back.
    pub fn push_back(&mut self, value: T) {
        self.reserve_one();
        self.buf.push(value);
        self.sync_tracked();
    }

    /// Insert at `index`, shifting trailing elements up by one.
    /// `index == len` appends; `index > len` is rejected: insertion
    /// past the end is a documented limitation of this representation.
    /// A failed growth reservation is rejected the same way, with the
    /// list untouched.
    pub fn insert_at(&mut self, value: T, index: usize) -> bool {
        if index > self.buf.len() {
            return false;
        }
        if self.buf.len() == self.buf.capacity() && !alloc::grow(&mut self.buf, 1) {
            return false;
        }
        self.buf.insert(index, value);
        self.sync_tracked();
        true
    }

    /// Zero-based accessor; out of range is `None`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.buf.get(index)
    }

    /// **One-based** accessor: `indexed_item(1)` is the first element.
    /// `indexed_item(0)` is always `None`. Historical quirk, kept.
    pub fn indexed_item(&self, one_based: usize) -> Option<&T> {
        if one_based == 0 {
            return None;
        }
        self.buf.get(one_based - 1)
    }

    /// Retrieve-and-remove the first element (no disposal hook).
    pub fn pop_front(&mut self) -> Option<T> {
        if self.buf.is_empty() {
            None
        } else {
            Some(self.buf.remove(0))
        }
    }

    /// Retrieve-and-remove the last element (no disposal hook).
    pub fn pop_back(&mut self) -> Option<T> {
        self.buf.pop()
    }

    /// Retrieve-and-remove at `index` (no disposal hook), compacting
    /// the tail down.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        if index < self.buf.len() {
            Some(self.buf.remove(index))
        } else {
            None
        }
    }

    /// Dispose every element; capacity is retained.
    pub fn clear(&mut self) {
        let disposer = self.disposer.clone();
        for value in self.buf.drain(..) {
            disposer.dispose(value);
        }
    }

    /// Mark this list's tracker record during a leak pass.
    pub fn note_refs(&self) {
        self.tracked.mark();
    }

    // Gives the out-of-memory handler its release-and-retry chance
    // before the infallible insert that follows.
    fn reserve_one(&mut self) {
        if self.buf.len() == self.buf.capacity() {
            let _ = alloc::grow(&mut self.buf, 1);
        }
    }

    fn sync_tracked(&self) {
        self.tracked.set_bytes(self.buf.capacity() * size_of::<T>());
    }
}

impl<T: PartialEq> ArrayList<T> {
    /// Linear-scan membership on element equality.
    pub fn contains(&self, value: &T) -> bool {
        self.buf.contains(value)
    }

    /// Remove the first element equal to `value`, disposing it.
    /// Returns whether anything was removed.
    pub fn remove_value(&mut self, value: &T) -> bool {
        match self.buf.iter().position(|v| v == value) {
            Some(index) => {
                let removed = self.buf.remove(index);
                self.disposer.dispose(removed);
                true
            }
            None => false,
        }
    }
}

impl<T> Drop for ArrayList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Detached index cursor over an [`ArrayList`].
///
/// A cursor is either *in-list* (referencing the element at `pos`) or
/// *not-in-list* (a virtual position off either end). Walking off the
/// tail resets the position to zero, so a subsequent `retreat` also
/// reports not-in-list instead of re-entering at the tail. Long-standing
/// behavior callers rely on, pinned by a regression test.
#[derive(Clone, Debug, Default)]
pub struct ArrayCursor {
    pos: usize,
    in_list: bool,
}

impl ArrayCursor {
    /// A fresh cursor, not-in-list.
    pub fn new() -> Self {
        Self {
            pos: 0,
            in_list: false,
        }
    }

    /// Clear to the virtual not-in-list position.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.in_list = false;
    }

    /// The referenced index, if in-list.
    pub fn index(&self) -> Option<usize> {
        if self.in_list {
            Some(self.pos)
        } else {
            None
        }
    }

    /// Seek to the first element; not-in-list when the list is empty.
    pub fn first<T>(&mut self, list: &ArrayList<T>) -> bool {
        self.pos = 0;
        self.in_list = !list.is_empty();
        self.in_list
    }

    /// Seek to the last element; not-in-list when the list is empty.
    pub fn last<T>(&mut self, list: &ArrayList<T>) -> bool {
        if list.is_empty() {
            self.reset();
        } else {
            self.pos = list.len() - 1;
            self.in_list = true;
        }
        self.in_list
    }

    /// The referenced element, validated against the current list
    /// length (a cursor stranded by a shrink reads as `None`).
    pub fn current<'a, T>(&self, list: &'a ArrayList<T>) -> Option<&'a T> {
        if self.in_list {
            list.get(self.pos)
        } else {
            None
        }
    }

    /// Step forward; walking off the tail leaves the cursor
    /// not-in-list with its position zeroed.
    pub fn advance<T>(&mut self, list: &ArrayList<T>) -> bool {
        if !self.in_list {
            return false;
        }
        self.pos += 1;
        if self.pos >= list.len() {
            self.reset();
        }
        self.in_list
    }

    /// Step backward; walking off the head leaves the cursor
    /// not-in-list.
    pub fn retreat<T>(&mut self, list: &ArrayList<T>) -> bool {
        if !self.in_list {
            return false;
        }
        if self.pos == 0 || self.pos >= list.len() {
            self.reset();
        } else {
            self.pos -= 1;
        }
        self.in_list
    }

    /// Advance unless both cursors already reference the same index,
    /// in which case this is a no-op. Bounded "catch up to a sibling"
    /// primitive.
    pub fn advance_to<T>(&mut self, other: &ArrayCursor, list: &ArrayList<T>) -> bool {
        if self.in_list && other.in_list && self.pos == other.pos {
            return true;
        }
        self.advance(list)
    }

    /// Insert after the current position (at the front when
    /// not-in-list) and leave the cursor on the new element.
    pub fn insert_after<T>(&mut self, list: &mut ArrayList<T>, value: T) {
        let at = if self.in_list && self.pos < list.len() {
            self.pos + 1
        } else {
            0
        };
        list.reserve_one();
        list.buf.insert(at, value);
        list.sync_tracked();
        self.pos = at;
        self.in_list = true;
    }

    /// Remove at the current position: runs the disposal hook, returns
    /// the payload, and leaves the cursor on the following element (or
    /// not-in-list when none remains).
    pub fn remove<T>(&mut self, list: &mut ArrayList<T>) -> Option<T> {
        if !self.in_list || self.pos >= list.len() {
            return None;
        }
        let mut removed = list.buf.remove(self.pos);
        list.disposer.run_hook(&mut removed);
        if self.pos >= list.len() {
            self.reset();
        }
        Some(removed)
    }

    /// Exchange the two referenced elements' values when both cursors
    /// are in-list. Positions are validated against the length of the
    /// list passed in, nothing more: cursors are plain indices, so
    /// handing in a list other than the one both cursors were walked
    /// over swaps that list's elements at those indices. Passing the
    /// cursors' own list is the caller's obligation.
    pub fn swap<T>(&self, other: &ArrayCursor, list: &mut ArrayList<T>) -> bool {
        if !self.in_list || !other.in_list {
            return false;
        }
        if self.pos >= list.len() || other.pos >= list.len() {
            return false;
        }
        list.buf.swap(self.pos, other.pos);
        true
    }
}
