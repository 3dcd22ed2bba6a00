//! Allocator front end: fallible buffer growth with an injectable
//! out-of-memory handler.
//!
//! Containers that grow a backing `Vec` reserve the room through
//! [`grow`] instead of letting the infallible `Vec` machinery abort
//! the process. A failed reservation invokes the process-wide handler
//! exactly once and retries the reservation exactly once; the handler
//! is expected to release memory (drop caches, flush pools) so the
//! retry can succeed. The default handler panics with a diagnostic.
//! Callers that install a non-panicking handler get the fail-soft
//! contract instead: the second failure surfaces as `false` and the
//! operation that needed the memory reports failure with no partial
//! mutation.

use std::mem::size_of;
use std::sync::{Mutex, OnceLock};

/// Out-of-memory callback. The argument is the byte demand of the
/// failed reservation.
pub type OomHandler = fn(bytes: usize);

fn default_handler(bytes: usize) {
    panic!("allocation of {bytes} bytes failed");
}

fn handler_slot() -> &'static Mutex<OomHandler> {
    static HANDLER: OnceLock<Mutex<OomHandler>> = OnceLock::new();
    HANDLER.get_or_init(|| Mutex::new(default_handler))
}

/// Install a new out-of-memory handler, returning the previous one.
pub fn set_oom_handler(handler: OomHandler) -> OomHandler {
    let mut slot = handler_slot().lock().unwrap_or_else(|e| e.into_inner());
    std::mem::replace(&mut *slot, handler)
}

fn current_handler() -> OomHandler {
    *handler_slot().lock().unwrap_or_else(|e| e.into_inner())
}

/// Reserve room for `additional` more elements in `vec`. On failure
/// the handler runs once and the reservation is retried once; a second
/// failure returns `false` with `vec` untouched.
pub fn grow<T>(vec: &mut Vec<T>, additional: usize) -> bool {
    if vec.try_reserve(additional).is_ok() {
        return true;
    }
    current_handler()(additional.saturating_mul(size_of::<T>()));
    vec.try_reserve(additional).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Failure-path tests (which must install a non-panicking handler)
    // live in their own integration binary so the process-wide handler
    // is never mutated while other tests in this binary run.

    /// Invariant: a satisfiable reservation succeeds without touching
    /// the handler, and the capacity really is there afterwards.
    #[test]
    fn grow_reserves_capacity() {
        let mut v: Vec<u64> = Vec::new();
        assert!(grow(&mut v, 32));
        assert!(v.capacity() >= 32);
        assert!(grow(&mut v, 0));
    }
}
