//! Disposal protocol: the callback owning containers run on elements
//! they discard.
//!
//! Every owning container in this crate holds a `Disposer<T>` and runs
//! it exactly once on each element it discards: an overwrite, a
//! by-value removal, a `clear`, or teardown in `Drop`. It is never run
//! on an element the caller explicitly retrieved-and-removed (the
//! `pop_*`/`take`/`remove_at` family returns ownership instead).
//!
//! `Drop` already frees, so `Disposer::none()` is the common case: the
//! element is simply dropped. `Disposer::new` installs a hook that
//! runs on the element just before the drop, which is how callers
//! observe or release out-of-band resources.

use std::rc::Rc;

/// Optional pre-drop hook run on discarded elements.
///
/// Cloning a `Disposer` is cheap (it shares the hook via `Rc`), which
/// is what lets a container run its hook during its own `Drop`.
pub struct Disposer<T> {
    hook: Option<Rc<dyn Fn(&mut T)>>,
}

impl<T> Disposer<T> {
    /// No hook: discarded elements are dropped without further action.
    pub fn none() -> Self {
        Self { hook: None }
    }

    /// Install a hook run on each discarded element before it drops.
    pub fn new<F>(hook: F) -> Self
    where
        F: Fn(&mut T) + 'static,
    {
        Self {
            hook: Some(Rc::new(hook)),
        }
    }

    /// Whether a hook is installed.
    pub fn has_hook(&self) -> bool {
        self.hook.is_some()
    }

    /// Run the hook (if any) on `value`, then drop it.
    pub fn dispose(&self, mut value: T) {
        if let Some(hook) = &self.hook {
            hook(&mut value);
        }
        drop(value);
    }

    /// Run the hook (if any) without consuming the value. Used by the
    /// cursor `remove` operations, which dispose the occupant and still
    /// hand the payload back.
    pub(crate) fn run_hook(&self, value: &mut T) {
        if let Some(hook) = &self.hook {
            hook(value);
        }
    }
}

impl<T> Clone for Disposer<T> {
    fn clone(&self) -> Self {
        Self {
            hook: self.hook.clone(),
        }
    }
}

impl<T> Default for Disposer<T> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T> std::fmt::Debug for Disposer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Disposer")
            .field("hook", &self.hook.is_some())
            .finish()
    }
}
