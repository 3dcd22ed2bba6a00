//! Doubly-linked list representation backed by a generational node
//! arena, and its node cursor.
//!
//! Nodes live in a `SlotMap` and link to each other by key, so the
//! list gets O(1) end insertion/removal, node-slot recycling for free,
//! and, because keys are generational, stale cursors left behind by
//! a removal simply fail to resolve instead of touching recycled
//! memory. That staleness check is the defensive backbone of every
//! cursor operation here.

use crate::dispose::Disposer;
use crate::track::Tracked;
use slotmap::SlotMap;
use std::mem::size_of;

slotmap::new_key_type! {
    /// Generational key of a list node.
    pub struct NodeKey;
}

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<NodeKey>,
    next: Option<NodeKey>,
}

/// Doubly-linked, owning list over an arena of recycled nodes.
#[derive(Debug)]
pub struct DynamicList<T> {
    nodes: SlotMap<NodeKey, Node<T>>,
    head: Option<NodeKey>,
    tail: Option<NodeKey>,
    disposer: Disposer<T>,
    tracked: Tracked,
}

impl<T> DynamicList<T> {
    pub fn new(disposer: Disposer<T>) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            head: None,
            tail: None,
            disposer,
            tracked: Tracked::new("DynamicList", 0),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn push_front(&mut self, value: T) {
        let key = self.nodes.insert(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(old) => self.nodes[old].prev = Some(key),
            None => self.tail = Some(key),
        }
        self.head = Some(key);
        self.after_mutation();
    }

    pub fn push_back(&mut self, value: T) {
        let key = self.nodes.insert(Node {
            value,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(old) => self.nodes[old].next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
        self.after_mutation();
    }

    /// Walk from the head to `index` and splice. `index == len`
    /// appends; `index > len` is rejected.
    pub fn insert_at(&mut self, value: T, index: usize) -> bool {
        if index > self.len() {
            return false;
        }
        if index == 0 {
            self.push_front(value);
        } else if index == self.len() {
            self.push_back(value);
        } else {
            // 0 < index < len, so the walk lands on a real node.
            let at = self.node_at(index).expect("index in range");
            self.link_before(at, value);
        }
        true
    }

    /// Zero-based accessor (head walk); out of range is `None`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.node_at(index).map(|key| &self.nodes[key].value)
    }

    /// Retrieve-and-remove the first element (no disposal hook).
    pub fn pop_front(&mut self) -> Option<T> {
        self.head.and_then(|key| self.unlink(key))
    }

    /// Retrieve-and-remove the last element (no disposal hook).
    pub fn pop_back(&mut self) -> Option<T> {
        self.tail.and_then(|key| self.unlink(key))
    }

    /// Retrieve-and-remove at `index` (no disposal hook).
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        self.node_at(index).and_then(|key| self.unlink(key))
    }

    /// Dispose every element and recycle every node slot.
    pub fn clear(&mut self) {
        let disposer = self.disposer.clone();
        let mut at = self.head;
        while let Some(key) = at {
            at = self.nodes[key].next;
            if let Some(node) = self.nodes.remove(key) {
                disposer.dispose(node.value);
            }
        }
        self.head = None;
        self.tail = None;
        self.after_mutation();
    }

    /// Mark this list's tracker record during a leak pass.
    pub fn note_refs(&self) {
        self.tracked.mark();
    }

    fn node_at(&self, index: usize) -> Option<NodeKey> {
        if index >= self.len() {
            return None;
        }
        let mut at = self.head;
        for _ in 0..index {
            at = at.and_then(|key| self.nodes[key].next);
        }
        at
    }

    /// Splice a new node directly before `at`.
    fn link_before(&mut self, at: NodeKey, value: T) {
        let prev = self.nodes[at].prev;
        let key = self.nodes.insert(Node {
            value,
            prev,
            next: Some(at),
        });
        self.nodes[at].prev = Some(key);
        match prev {
            Some(p) => self.nodes[p].next = Some(key),
            None => self.head = Some(key),
        }
        self.after_mutation();
    }

    /// Splice a new node directly after `at`; returns its key.
    fn link_after(&mut self, at: NodeKey, value: T) -> NodeKey {
        let next = self.nodes[at].next;
        let key = self.nodes.insert(Node {
            value,
            prev: Some(at),
            next,
        });
        self.nodes[at].next = Some(key);
        match next {
            Some(n) => self.nodes[n].prev = Some(key),
            None => self.tail = Some(key),
        }
        self.after_mutation();
        key
    }

    /// Unlink a node and return its payload. A stale key is a
    /// defensive `None`.
    fn unlink(&mut self, key: NodeKey) -> Option<T> {
        let node = self.nodes.remove(key)?;
        match node.prev {
            Some(p) => self.nodes[p].next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => self.nodes[n].prev = node.prev,
            None => self.tail = node.prev,
        }
        self.after_mutation();
        Some(node.value)
    }

    fn after_mutation(&self) {
        self.tracked
            .set_bytes(self.nodes.capacity() * size_of::<Node<T>>());
        self.audit_links();
    }

    /// Full linkage audit, debug builds only.
    fn audit_links(&self) {
        #[cfg(debug_assertions)]
        {
            crate::debug_invariant!(
                (self.len() == 0) == (self.head.is_none() && self.tail.is_none()),
                "empty list must have no head or tail"
            );
            if self.len() == 1 {
                crate::debug_invariant!(self.head == self.tail, "single node must be head and tail");
            }
            let mut forward = 0usize;
            let mut at = self.head;
            let mut prev = None;
            while let Some(key) = at {
                let node = &self.nodes[key];
                crate::debug_invariant!(node.prev == prev, "prev link must match walk");
                prev = Some(key);
                at = node.next;
                forward += 1;
                crate::debug_invariant!(forward <= self.len(), "forward walk must terminate");
            }
            crate::debug_invariant!(
                forward == self.len(),
                "forward walk must visit every node"
            );
            let mut backward = 0usize;
            let mut at = self.tail;
            while let Some(key) = at {
                at = self.nodes[key].prev;
                backward += 1;
                crate::debug_invariant!(backward <= self.len(), "backward walk must terminate");
            }
            crate::debug_invariant!(
                backward == self.len(),
                "backward walk must visit every node"
            );
        }
    }
}

impl<T: PartialEq> DynamicList<T> {
    /// Linear-scan membership on element equality.
    pub fn contains(&self, value: &T) -> bool {
        self.iter_keys().any(|key| self.nodes[key].value == *value)
    }

    /// Remove the first element equal to `value`, disposing it.
    pub fn remove_value(&mut self, value: &T) -> bool {
        let found = self.iter_keys().find(|&key| self.nodes[key].value == *value);
        match found {
            Some(key) => {
                if let Some(removed) = self.unlink(key) {
                    self.disposer.dispose(removed);
                }
                true
            }
            None => false,
        }
    }
}

impl<T> DynamicList<T> {
    fn iter_keys(&self) -> impl Iterator<Item = NodeKey> + '_ {
        let mut at = self.head;
        std::iter::from_fn(move || {
            let key = at?;
            at = self.nodes[key].next;
            Some(key)
        })
    }
}

impl<T> Drop for DynamicList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Detached node cursor over a [`DynamicList`].
///
/// Holds a generational node key; once the node is removed the key no
/// longer resolves and every operation treats the cursor as
/// not-in-list.
#[derive(Clone, Debug, Default)]
pub struct LinkCursor {
    at: Option<NodeKey>,
}

impl LinkCursor {
    /// A fresh cursor with no current node.
    pub fn new() -> Self {
        Self { at: None }
    }

    /// Clear to no current node.
    pub fn reset(&mut self) {
        self.at = None;
    }

    /// Seek to the head; no current node when the list is empty.
    pub fn first<T>(&mut self, list: &DynamicList<T>) -> bool {
        self.at = list.head;
        self.at.is_some()
    }

    /// Seek to the tail; no current node when the list is empty.
    pub fn last<T>(&mut self, list: &DynamicList<T>) -> bool {
        self.at = list.tail;
        self.at.is_some()
    }

    /// The current node's payload; a stale or absent node is `None`.
    pub fn current<'a, T>(&self, list: &'a DynamicList<T>) -> Option<&'a T> {
        self.live_node(list)
            .map(|key| &list.nodes[key].value)
    }

    /// Follow the next link; off the tail (or stale) leaves no current
    /// node.
    pub fn advance<T>(&mut self, list: &DynamicList<T>) -> bool {
        self.at = self
            .live_node(list)
            .and_then(|key| list.nodes[key].next);
        self.at.is_some()
    }

    /// Follow the previous link; off the head (or stale) leaves no
    /// current node.
    pub fn retreat<T>(&mut self, list: &DynamicList<T>) -> bool {
        self.at = self
            .live_node(list)
            .and_then(|key| list.nodes[key].prev);
        self.at.is_some()
    }

    /// Splice a node directly after the current one (at the head when
    /// there is no current node) and become current on it.
    pub fn insert_after<T>(&mut self, list: &mut DynamicList<T>, value: T) {
        match self.live_node(list) {
            Some(key) => {
                self.at = Some(list.link_after(key, value));
            }
            None => {
                list.push_front(value);
                self.at = list.head;
            }
        }
    }

    /// Unlink the current node: runs the disposal hook, returns the
    /// payload, and advances to the following node (or becomes empty).
    pub fn remove<T>(&mut self, list: &mut DynamicList<T>) -> Option<T> {
        let key = self.live_node(list)?;
        let next = list.nodes[key].next;
        let mut removed = list.unlink(key)?;
        list.disposer.run_hook(&mut removed);
        self.at = next;
        Some(removed)
    }

    fn live_node<T>(&self, list: &DynamicList<T>) -> Option<NodeKey> {
        self.at.filter(|&key| list.nodes.contains_key(key))
    }
}

impl LinkCursor {
    /// Scan forward from the head (not from the cursor) and stop on
    /// the first element equal to `value`.
    pub fn find<T: PartialEq>(&mut self, list: &DynamicList<T>, value: &T) -> bool {
        self.at = list
            .iter_keys()
            .find(|&key| list.nodes[key].value == *value);
        self.at.is_some()
    }
}
