//! Out-of-memory handler contract. One test in its own binary: the
//! handler is process-wide, so nothing else may run while a
//! non-panicking one is installed.

use adt_kit::alloc::{grow, set_oom_handler};
use adt_kit::{Disposer, SlotArray};
use std::sync::atomic::{AtomicUsize, Ordering};

static CALLS: AtomicUsize = AtomicUsize::new(0);

// Impossible u8 demand with a recognizable value, so the counter only
// sees this test's own probe reservations.
const HUGE: usize = usize::MAX - 0x5eed;

fn counting_handler(bytes: usize) {
    if bytes == HUGE {
        CALLS.fetch_add(1, Ordering::SeqCst);
    }
}

/// Invariant: a failed reservation invokes the handler exactly once
/// and retries exactly once; the failure then surfaces as `false` from
/// `grow` and as a rejected `put` that leaves the array untouched.
#[test]
fn handler_runs_once_and_put_fails_soft() {
    set_oom_handler(counting_handler);

    let mut v: Vec<u8> = Vec::new();
    assert!(!grow(&mut v, HUGE));
    assert_eq!(CALLS.load(Ordering::SeqCst), 1, "one call, one retry");
    assert_eq!(v.capacity(), 0);
    assert!(!grow(&mut v, HUGE));
    assert_eq!(CALLS.load(Ordering::SeqCst), 2);
    assert!(grow(&mut v, 16), "a sane demand still succeeds");

    let mut a: SlotArray<i32> = SlotArray::new(Disposer::none());
    assert!(a.put(0, 1));
    let before = a.items();
    assert!(!a.put(usize::MAX - 1, 9), "unreservable growth is rejected");
    assert_eq!(a.items(), before, "rejected put mutates nothing");
    assert_eq!(a.get(0), Some(&1));
}
