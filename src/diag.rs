//! Debug-only consistency checks.
//!
//! `debug_invariant!` is loud in debug builds and compiles to nothing
//! in release builds: consistency violations (count mismatches,
//! malformed linkage, runaway probe loops) abort development runs but
//! cost nothing in production, where the defensive `Option`/`bool`
//! returns on the public surface are the only guard.

/// Assert an internal invariant in debug builds; no-op in release.
#[macro_export]
macro_rules! debug_invariant {
    ($cond:expr, $($arg:tt)+) => {
        #[cfg(debug_assertions)]
        {
            assert!($cond, $($arg)+);
        }
    };
}

#[cfg(test)]
mod tests {
    /// Invariant: a satisfied condition passes silently.
    #[test]
    fn satisfied_condition_is_silent() {
        debug_invariant!(1 + 1 == 2, "arithmetic holds");
    }

    /// Invariant (debug-only): a violated condition panics in debug builds.
    #[cfg(debug_assertions)]
    #[test]
    fn violation_panics_in_debug() {
        let res = std::panic::catch_unwind(|| {
            debug_invariant!(false, "forced violation");
        });
        assert!(res.is_err());
    }
}
