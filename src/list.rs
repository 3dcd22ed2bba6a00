//! Capability-polymorphic list facade.
//!
//! A `List` is constructed over one of two representations
//! ([`Repr::Contiguous`] or [`Repr::Linked`]) and one of two interface
//! capabilities ([`Capability::Plain`] or [`Capability::Cursor`]),
//! four fixed combinations in all. Dispatch is an enum match; an
//! operation the chosen combination does not support fails closed with
//! [`ListError::Unsupported`] instead of panicking, so callers can
//! treat capability errors as ordinary recoverable failures.
//!
//! Representation-specific cursor operations keep their asymmetry:
//! `advance_to` and `swap` exist only on the contiguous representation
//! and `find` only on the linked one; calling them across
//! representations is `Unsupported`, as is using a cursor against a
//! facade of the other representation.

use crate::array_list::{ArrayCursor, ArrayList};
use crate::dispose::Disposer;
use crate::linked_list::{DynamicList, LinkCursor};

/// Which backing representation a facade is built over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repr {
    /// Packed array storage ([`ArrayList`]).
    Contiguous,
    /// Node-arena linked storage ([`DynamicList`]).
    Linked,
}

/// Which interface a facade exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    /// Index-oriented plain operations only.
    Plain,
    /// Cursor operations only.
    Cursor,
}

/// Neutral failure values returned by the facade.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListError {
    /// The chosen {representation × capability} combination does not
    /// support this operation.
    Unsupported,
    /// Index past the representation's accepted range.
    OutOfRange,
}

#[derive(Debug)]
enum Inner<T> {
    Contiguous(ArrayList<T>),
    Linked(DynamicList<T>),
}

/// The uniform facade over both list representations.
#[derive(Debug)]
pub struct List<T> {
    inner: Inner<T>,
    capability: Capability,
}

impl<T> List<T> {
    /// Construct a facade with the representation and capability fixed
    /// for its lifetime.
    pub fn new(capability: Capability, repr: Repr, disposer: Disposer<T>) -> Self {
        let inner = match repr {
            Repr::Contiguous => Inner::Contiguous(ArrayList::new(disposer)),
            Repr::Linked => Inner::Linked(DynamicList::new(disposer)),
        };
        Self { inner, capability }
    }

    pub fn repr(&self) -> Repr {
        match self.inner {
            Inner::Contiguous(_) => Repr::Contiguous,
            Inner::Linked(_) => Repr::Linked,
        }
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    fn plain(&self) -> Result<&Inner<T>, ListError> {
        match self.capability {
            Capability::Plain => Ok(&self.inner),
            Capability::Cursor => Err(ListError::Unsupported),
        }
    }

    fn plain_mut(&mut self) -> Result<&mut Inner<T>, ListError> {
        match self.capability {
            Capability::Plain => Ok(&mut self.inner),
            Capability::Cursor => Err(ListError::Unsupported),
        }
    }

    pub fn len(&self) -> Result<usize, ListError> {
        Ok(match self.plain()? {
            Inner::Contiguous(l) => l.len(),
            Inner::Linked(l) => l.len(),
        })
    }

    pub fn is_empty(&self) -> Result<bool, ListError> {
        Ok(self.len()? == 0)
    }

    pub fn push_front(&mut self, value: T) -> Result<(), ListError> {
        match self.plain_mut()? {
            Inner::Contiguous(l) => l.push_front(value),
            Inner::Linked(l) => l.push_front(value),
        }
        Ok(())
    }

    pub fn push_back(&mut self, value: T) -> Result<(), ListError> {
        match self.plain_mut()? {
            Inner::Contiguous(l) => l.push_back(value),
            Inner::Linked(l) => l.push_back(value),
        }
        Ok(())
    }

    pub fn insert_at(&mut self, value: T, index: usize) -> Result<(), ListError> {
        let ok = match self.plain_mut()? {
            Inner::Contiguous(l) => l.insert_at(value, index),
            Inner::Linked(l) => l.insert_at(value, index),
        };
        if ok {
            Ok(())
        } else {
            Err(ListError::OutOfRange)
        }
    }

    pub fn get(&self, index: usize) -> Result<Option<&T>, ListError> {
        Ok(match self.plain()? {
            Inner::Contiguous(l) => l.get(index),
            Inner::Linked(l) => l.get(index),
        })
    }

    pub fn pop_front(&mut self) -> Result<Option<T>, ListError> {
        Ok(match self.plain_mut()? {
            Inner::Contiguous(l) => l.pop_front(),
            Inner::Linked(l) => l.pop_front(),
        })
    }

    pub fn pop_back(&mut self) -> Result<Option<T>, ListError> {
        Ok(match self.plain_mut()? {
            Inner::Contiguous(l) => l.pop_back(),
            Inner::Linked(l) => l.pop_back(),
        })
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Option<T>, ListError> {
        Ok(match self.plain_mut()? {
            Inner::Contiguous(l) => l.remove_at(index),
            Inner::Linked(l) => l.remove_at(index),
        })
    }

    pub fn clear(&mut self) -> Result<(), ListError> {
        match self.plain_mut()? {
            Inner::Contiguous(l) => l.clear(),
            Inner::Linked(l) => l.clear(),
        }
        Ok(())
    }

    /// Mark the underlying representation's tracker record during a
    /// leak pass. Always available; the tracker is not an interface.
    pub fn note_refs(&self) {
        match &self.inner {
            Inner::Contiguous(l) => l.note_refs(),
            Inner::Linked(l) => l.note_refs(),
        }
    }

    /// Mint a cursor over this facade. Requires [`Capability::Cursor`].
    pub fn cursor(&self) -> Result<ListCursor, ListError> {
        match self.capability {
            Capability::Cursor => Ok(ListCursor {
                inner: match self.inner {
                    Inner::Contiguous(_) => CursorInner::Contiguous(ArrayCursor::new()),
                    Inner::Linked(_) => CursorInner::Linked(LinkCursor::new()),
                },
            }),
            Capability::Plain => Err(ListError::Unsupported),
        }
    }
}

impl<T: PartialEq> List<T> {
    pub fn contains(&self, value: &T) -> Result<bool, ListError> {
        Ok(match self.plain()? {
            Inner::Contiguous(l) => l.contains(value),
            Inner::Linked(l) => l.contains(value),
        })
    }

    pub fn remove_value(&mut self, value: &T) -> Result<bool, ListError> {
        Ok(match self.plain_mut()? {
            Inner::Contiguous(l) => l.remove_value(value),
            Inner::Linked(l) => l.remove_value(value),
        })
    }
}

#[derive(Clone, Debug)]
enum CursorInner {
    Contiguous(ArrayCursor),
    Linked(LinkCursor),
}

/// Cursor facade minted by [`List::cursor`].
///
/// Every operation re-validates that the target facade has cursor
/// capability and the matching representation; mismatches fail closed.
#[derive(Clone, Debug)]
pub struct ListCursor {
    inner: CursorInner,
}

macro_rules! with_rep {
    // Dispatch a cursor op against the matching representation, fail
    // closed on capability or representation mismatch.
    ($cursor:expr, $list:expr, $c:ident, $l:ident, $contig:expr, $linked:expr) => {{
        if $list.capability != Capability::Cursor {
            return Err(ListError::Unsupported);
        }
        match (&mut $cursor.inner, &$list.inner) {
            (CursorInner::Contiguous($c), Inner::Contiguous($l)) => Ok($contig),
            (CursorInner::Linked($c), Inner::Linked($l)) => Ok($linked),
            _ => Err(ListError::Unsupported),
        }
    }};
}

macro_rules! with_rep_mut {
    ($cursor:expr, $list:expr, $c:ident, $l:ident, $contig:expr, $linked:expr) => {{
        if $list.capability != Capability::Cursor {
            return Err(ListError::Unsupported);
        }
        match (&mut $cursor.inner, &mut $list.inner) {
            (CursorInner::Contiguous($c), Inner::Contiguous($l)) => Ok($contig),
            (CursorInner::Linked($c), Inner::Linked($l)) => Ok($linked),
            _ => Err(ListError::Unsupported),
        }
    }};
}

impl ListCursor {
    /// Clear to the virtual not-in-list position.
    pub fn reset(&mut self) {
        match &mut self.inner {
            CursorInner::Contiguous(c) => c.reset(),
            CursorInner::Linked(c) => c.reset(),
        }
    }

    pub fn first<T>(&mut self, list: &List<T>) -> Result<bool, ListError> {
        with_rep!(self, list, c, l, c.first(l), c.first(l))
    }

    pub fn last<T>(&mut self, list: &List<T>) -> Result<bool, ListError> {
        with_rep!(self, list, c, l, c.last(l), c.last(l))
    }

    pub fn advance<T>(&mut self, list: &List<T>) -> Result<bool, ListError> {
        with_rep!(self, list, c, l, c.advance(l), c.advance(l))
    }

    pub fn retreat<T>(&mut self, list: &List<T>) -> Result<bool, ListError> {
        with_rep!(self, list, c, l, c.retreat(l), c.retreat(l))
    }

    pub fn current<'a, T>(&self, list: &'a List<T>) -> Result<Option<&'a T>, ListError> {
        if list.capability != Capability::Cursor {
            return Err(ListError::Unsupported);
        }
        match (&self.inner, &list.inner) {
            (CursorInner::Contiguous(c), Inner::Contiguous(l)) => Ok(c.current(l)),
            (CursorInner::Linked(c), Inner::Linked(l)) => Ok(c.current(l)),
            _ => Err(ListError::Unsupported),
        }
    }

    pub fn insert_after<T>(&mut self, list: &mut List<T>, value: T) -> Result<(), ListError> {
        with_rep_mut!(
            self,
            list,
            c,
            l,
            c.insert_after(l, value),
            c.insert_after(l, value)
        )
    }

    pub fn remove<T>(&mut self, list: &mut List<T>) -> Result<Option<T>, ListError> {
        with_rep_mut!(self, list, c, l, c.remove(l), c.remove(l))
    }

    /// Contiguous-only: advance unless already level with `other`.
    pub fn advance_to<T>(&mut self, other: &ListCursor, list: &List<T>) -> Result<bool, ListError> {
        if list.capability != Capability::Cursor {
            return Err(ListError::Unsupported);
        }
        match (&mut self.inner, &other.inner, &list.inner) {
            (CursorInner::Contiguous(c), CursorInner::Contiguous(o), Inner::Contiguous(l)) => {
                Ok(c.advance_to(o, l))
            }
            _ => Err(ListError::Unsupported),
        }
    }

    /// Contiguous-only: exchange the two referenced elements' values.
    pub fn swap<T>(&self, other: &ListCursor, list: &mut List<T>) -> Result<bool, ListError> {
        if list.capability != Capability::Cursor {
            return Err(ListError::Unsupported);
        }
        match (&self.inner, &other.inner, &mut list.inner) {
            (CursorInner::Contiguous(c), CursorInner::Contiguous(o), Inner::Contiguous(l)) => {
                Ok(c.swap(o, l))
            }
            _ => Err(ListError::Unsupported),
        }
    }

    /// Linked-only: scan forward from the head for the first match.
    pub fn find<T: PartialEq>(&mut self, list: &List<T>, value: &T) -> Result<bool, ListError> {
        if list.capability != Capability::Cursor {
            return Err(ListError::Unsupported);
        }
        match (&mut self.inner, &list.inner) {
            (CursorInner::Linked(c), Inner::Linked(l)) => Ok(c.find(l, value)),
            _ => Err(ListError::Unsupported),
        }
    }
}
