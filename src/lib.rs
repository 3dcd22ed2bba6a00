//! adt-kit: single-threaded collection kit with explicit element
//! disposal, pooled allocation, and leak accounting.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: one coherent family of containers whose ownership
//!   transitions are all explicit, so each container can be reasoned
//!   about (and leak-checked) independently.
//! - Layers:
//!   - dispose: `Disposer<T>`, the per-container pre-drop hook. Every
//!     container runs it exactly once per element it discards, and
//!     never on elements it hands back to the caller.
//!   - alloc: the growth front end. Buffer reservations go through it
//!     so an injectable out-of-memory handler gets one
//!     release-and-retry chance before the operation fails soft (or,
//!     under the default handler, panics with a diagnostic).
//!   - track + pool: debug-only allocation registry with a mark/verify
//!     leak pass, and `Pool<T>`, a fixed-shape chunk recycler with
//!     fresh/recycled/released counters.
//!   - containers: `SlotArray` (growable bounds-checked slots),
//!     `ArrayList`/`ArrayCursor` and `DynamicList`/`LinkCursor` (the
//!     two list representations with their cursor interfaces), and
//!     `OpenTable` (open addressing over pooled entries, linear or
//!     quadratic probing).
//!   - facade: `List`/`ListCursor`, a representation- and
//!     capability-polymorphic front over the two list types that fails
//!     closed on unsupported operations.
//!
//! Constraints
//! - Single-threaded: callbacks are `Rc<dyn Fn>`, no atomics. The
//!   debug tracker alone uses a `Mutex` so tests can run in parallel.
//! - Disposal discipline: remove-style operations dispose, pop/take
//!   style operations transfer ownership without the hook.
//! - Cursors are detached positions; they borrow their list per
//!   operation, so any number can walk one list. Linked cursors hold
//!   generational keys and go quietly not-in-list when their node is
//!   freed.
//! - Hash tables cap occupancy at half the slot count, counting
//!   tombstones, so probe chains always terminate and churn gets
//!   reclaimed by rehash.
//!
//! Why this split?
//! - Localize invariants: disposal, pooling, and probing each have a
//!   small contract the containers compose rather than reimplement.
//! - The facade holds no logic of its own: it dispatches to a concrete
//!   representation or returns `ListError::Unsupported`, never a
//!   partial emulation.
//!
//! Notes and non-goals
//! - No thread-safe variants; wrap at a higher level if needed.
//! - No key/value tables here: `OpenTable` stores elements compared
//!   and hashed through caller-supplied callbacks.

pub mod alloc;
pub mod array;
pub mod array_list;
mod diag;
pub mod dispose;
pub mod hash_common;
pub mod hash_table;
pub mod linked_list;
pub mod list;
#[cfg(test)]
mod list_equiv_proptest;
pub mod pool;
pub mod track;

// Public surface
pub use alloc::{set_oom_handler, OomHandler};
pub use array::SlotArray;
pub use array_list::{ArrayCursor, ArrayList};
pub use dispose::Disposer;
pub use hash_common::{Comparer, Entry, HashFn, SharedEntryPool};
pub use hash_table::{LinearHashTable, OpenTable, QuadHashTable};
pub use linked_list::{DynamicList, LinkCursor};
pub use list::{Capability, List, ListCursor, ListError, Repr};
pub use pool::{Pool, PoolStats};
pub use track::{LeakRecord, Tracked};
