#![cfg(test)]

// Property tests for the plain list facade kept inside the crate so
// they can observe disposal accounting without feature gates.

use crate::dispose::Disposer;
use crate::list::{Capability, List, ListError, Repr};
use proptest::prelude::*;
use std::cell::Cell;
use std::rc::Rc;

// Small value range so Contains/RemoveValue hit duplicates; indices
// deliberately run past the live length to exercise range rejection.
#[derive(Clone, Debug)]
enum OpI {
    PushFront(i32),
    PushBack(i32),
    InsertAt(i32, usize),
    Get(usize),
    PopFront,
    PopBack,
    RemoveAt(usize),
    Contains(i32),
    RemoveValue(i32),
    Clear,
    Iterate,
}

fn arb_ops() -> impl Strategy<Value = Vec<OpI>> {
    let value = 0i32..8;
    let index = 0usize..12;
    let op = prop_oneof![
        4 => value.clone().prop_map(OpI::PushFront),
        4 => value.clone().prop_map(OpI::PushBack),
        3 => (value.clone(), index.clone()).prop_map(|(v, i)| OpI::InsertAt(v, i)),
        3 => index.clone().prop_map(OpI::Get),
        2 => Just(OpI::PopFront),
        2 => Just(OpI::PopBack),
        3 => index.prop_map(OpI::RemoveAt),
        2 => value.clone().prop_map(OpI::Contains),
        2 => value.prop_map(OpI::RemoveValue),
        1 => Just(OpI::Clear),
        1 => Just(OpI::Iterate),
    ];
    proptest::collection::vec(op, 1..60)
}

// Property: State-machine equivalence of one plain facade against a
// Vec model. Invariants exercised across random operation sequences:
// - Every successful mutation matches the model's element order.
// - `insert_at` past the live length is `OutOfRange` and a no-op.
// - `get`/`remove_at` out of range return None without disturbing order.
// - Disposal accounting: `remove_value` and `clear` run the hook once
//   per discarded element; the pop/remove_at retrievals never do.
// - `len`/`is_empty` parity with the model after each op; full element
//   parity on Iterate.
fn run_against_model(repr: Repr, ops: Vec<OpI>) -> Result<(), TestCaseError> {
    let disposed = Rc::new(Cell::new(0usize));
    let d = disposed.clone();
    let mut sut: List<i32> = List::new(
        Capability::Plain,
        repr,
        Disposer::new(move |_| d.set(d.get() + 1)),
    );
    let mut model: Vec<i32> = Vec::new();
    let mut expected_disposed = 0usize;

    for op in ops {
        match op {
            OpI::PushFront(v) => {
                sut.push_front(v).expect("plain facade");
                model.insert(0, v);
            }
            OpI::PushBack(v) => {
                sut.push_back(v).expect("plain facade");
                model.push(v);
            }
            OpI::InsertAt(v, i) => match sut.insert_at(v, i) {
                Ok(()) => {
                    prop_assert!(i <= model.len(), "accepted index must be in range");
                    model.insert(i, v);
                }
                Err(e) => {
                    prop_assert_eq!(e, ListError::OutOfRange);
                    prop_assert!(i > model.len(), "in-range insert must succeed");
                }
            },
            OpI::Get(i) => {
                prop_assert_eq!(sut.get(i).expect("plain facade"), model.get(i));
            }
            OpI::PopFront => {
                let got = sut.pop_front().expect("plain facade");
                let want = if model.is_empty() {
                    None
                } else {
                    Some(model.remove(0))
                };
                prop_assert_eq!(got, want);
            }
            OpI::PopBack => {
                prop_assert_eq!(sut.pop_back().expect("plain facade"), model.pop());
            }
            OpI::RemoveAt(i) => {
                let got = sut.remove_at(i).expect("plain facade");
                let want = if i < model.len() {
                    Some(model.remove(i))
                } else {
                    None
                };
                prop_assert_eq!(got, want);
            }
            OpI::Contains(v) => {
                prop_assert_eq!(sut.contains(&v).expect("plain facade"), model.contains(&v));
            }
            OpI::RemoveValue(v) => {
                let got = sut.remove_value(&v).expect("plain facade");
                let pos = model.iter().position(|&m| m == v);
                prop_assert_eq!(got, pos.is_some());
                if let Some(p) = pos {
                    model.remove(p);
                    expected_disposed += 1;
                }
            }
            OpI::Clear => {
                expected_disposed += model.len();
                sut.clear().expect("plain facade");
                model.clear();
            }
            OpI::Iterate => {
                for (i, v) in model.iter().enumerate() {
                    prop_assert_eq!(sut.get(i).expect("plain facade"), Some(v));
                }
                prop_assert_eq!(sut.get(model.len()).expect("plain facade"), None);
            }
        }

        // Post-conditions after each op
        prop_assert_eq!(sut.len().expect("plain facade"), model.len());
        prop_assert_eq!(sut.is_empty().expect("plain facade"), model.is_empty());
        prop_assert_eq!(disposed.get(), expected_disposed);
    }

    // Dropping the facade disposes everything still held.
    let remaining = model.len();
    drop(sut);
    prop_assert_eq!(disposed.get(), expected_disposed + remaining);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_contiguous_matches_model(ops in arb_ops()) {
        run_against_model(Repr::Contiguous, ops)?;
    }

    #[test]
    fn prop_linked_matches_model(ops in arb_ops()) {
        run_against_model(Repr::Linked, ops)?;
    }
}
