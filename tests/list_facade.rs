//! End-to-end scenarios for the capability-polymorphic list facade:
//! the four {representation x capability} combinations, cursor
//! workflows, and disposal through the facade boundary.

use adt_kit::{Capability, Disposer, List, ListError, Repr};
use std::cell::Cell;
use std::rc::Rc;

fn counting_disposer(counter: &Rc<Cell<usize>>) -> Disposer<i32> {
    let c = counter.clone();
    Disposer::new(move |_| c.set(c.get() + 1))
}

/// Invariant: all four combinations construct and report their fixed
/// representation and capability.
#[test]
fn four_combinations_construct() {
    for repr in [Repr::Contiguous, Repr::Linked] {
        for cap in [Capability::Plain, Capability::Cursor] {
            let l: List<i32> = List::new(cap, repr, Disposer::none());
            assert_eq!(l.repr(), repr);
            assert_eq!(l.capability(), cap);
        }
    }
}

/// Invariant: two independent cursors walk one contiguous facade;
/// `advance_to` closes the gap one step at a time and `swap` exchanges
/// the referenced elements.
#[test]
fn two_cursor_sort_step_on_contiguous() {
    let mut l: List<i32> = List::new(Capability::Cursor, Repr::Contiguous, Disposer::none());
    let mut w = l.cursor().unwrap();
    for v in [3, 1, 2] {
        w.insert_after(&mut l, v).unwrap();
    }
    // Insert-after walks the cursor, so the list reads 3, 1, 2.

    let mut lo = l.cursor().unwrap();
    let mut hi = l.cursor().unwrap();
    lo.first(&l).unwrap();
    hi.last(&l).unwrap();
    // One selection pass: bubble the smallest of {3, 2} leftwards.
    if lo.current(&l).unwrap() > hi.current(&l).unwrap() {
        assert!(lo.swap(&hi, &mut l).unwrap());
    }
    assert_eq!(lo.current(&l).unwrap(), Some(&2));
    assert_eq!(hi.current(&l).unwrap(), Some(&3));

    // advance_to is a single step and a no-op once level.
    assert!(lo.advance_to(&hi, &l).unwrap());
    assert!(lo.advance_to(&hi, &l).unwrap());
    assert_eq!(lo.current(&l).unwrap(), hi.current(&l).unwrap());
}

/// Invariant: `find` on a linked facade positions the cursor from the
/// head each call; a missing value parks the cursor off-list.
#[test]
fn find_positions_linked_cursor() {
    let mut l: List<i32> = List::new(Capability::Cursor, Repr::Linked, Disposer::none());
    let mut w = l.cursor().unwrap();
    for v in [10, 20, 30] {
        w.insert_after(&mut l, v).unwrap();
    }
    let mut c = l.cursor().unwrap();
    assert_eq!(c.find(&l, &20), Ok(true));
    assert_eq!(c.current(&l).unwrap(), Some(&20));
    assert_eq!(c.find(&l, &99), Ok(false));
    assert_eq!(c.current(&l).unwrap(), None);
}

/// Invariant: cursor `remove` runs the disposal hook and still returns
/// the payload, on both representations.
#[test]
fn cursor_remove_disposes_and_returns() {
    for repr in [Repr::Contiguous, Repr::Linked] {
        let disposed = Rc::new(Cell::new(0));
        let mut l: List<i32> = List::new(Capability::Cursor, repr, counting_disposer(&disposed));
        let mut c = l.cursor().unwrap();
        c.insert_after(&mut l, 7).unwrap();
        c.first(&l).unwrap();
        assert_eq!(c.remove(&mut l).unwrap(), Some(7));
        assert_eq!(disposed.get(), 1, "hook ran once for {repr:?}");
    }
}

/// Invariant: dropping a facade disposes every element still held,
/// once each.
#[test]
fn drop_disposes_remaining_elements() {
    for repr in [Repr::Contiguous, Repr::Linked] {
        let disposed = Rc::new(Cell::new(0));
        {
            let mut l: List<i32> =
                List::new(Capability::Plain, repr, counting_disposer(&disposed));
            for v in 0..5 {
                l.push_back(v).unwrap();
            }
            assert_eq!(l.pop_back().unwrap(), Some(4));
        }
        assert_eq!(disposed.get(), 4, "popped element skips the hook");
    }
}

/// Invariant: the unsupported-operation matrix is complete; no
/// combination panics, every mismatch is `ListError::Unsupported`.
#[test]
fn unsupported_matrix() {
    let mut plain: List<i32> = List::new(Capability::Plain, Repr::Contiguous, Disposer::none());
    assert_eq!(plain.cursor().unwrap_err(), ListError::Unsupported);

    let mut contig: List<i32> = List::new(Capability::Cursor, Repr::Contiguous, Disposer::none());
    let linked: List<i32> = List::new(Capability::Cursor, Repr::Linked, Disposer::none());
    assert_eq!(contig.push_back(1).unwrap_err(), ListError::Unsupported);
    assert_eq!(contig.remove_value(&1).unwrap_err(), ListError::Unsupported);

    let mut cc = contig.cursor().unwrap();
    let mut lc = linked.cursor().unwrap();
    assert_eq!(cc.find(&contig, &1).unwrap_err(), ListError::Unsupported);
    assert_eq!(cc.first(&linked).unwrap_err(), ListError::Unsupported);
    assert_eq!(lc.advance(&contig).unwrap_err(), ListError::Unsupported);
    let other = linked.cursor().unwrap();
    assert_eq!(
        lc.advance_to(&other, &linked).unwrap_err(),
        ListError::Unsupported
    );
    assert_eq!(
        lc.swap(&other, &mut contig).unwrap_err(),
        ListError::Unsupported
    );
}
