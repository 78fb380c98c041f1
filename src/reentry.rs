//! Debug-only reentrancy check.
//!
//! Table operations run user code while probing (`HashPolicy::hash`/`eq`).
//! If that user code calls back into the same table through a smuggled
//! pointer, internal state may be observed mid-update. In debug builds the
//! check panics on nested entry; in release builds it compiles away.
//!
//! The check uses a `Cell`, so a guarded structure stays `Send` (it can be
//! handed to an external lock wrapper) while remaining `!Sync`.

use core::cell::Cell;

/// Per-instance reentry tracker. Guard entry points with
/// `let _g = self.reentry.enter();`.
#[derive(Debug, Default)]
pub(crate) struct ReentryCheck {
    #[cfg(debug_assertions)]
    depth: Cell<u32>,
}

impl ReentryCheck {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            depth: Cell::new(0),
        }
    }

    #[inline]
    pub(crate) fn enter(&self) -> ReentryGuard<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                self.depth.get() == 0,
                "reentrant call into a probe table from policy code"
            );
            self.depth.set(1);
        }
        ReentryGuard { owner: self }
    }
}

impl Clone for ReentryCheck {
    // A cloned table starts outside any guarded section.
    fn clone(&self) -> Self {
        Self::new()
    }
}

/// RAII guard returned by [`ReentryCheck::enter`].
pub(crate) struct ReentryGuard<'a> {
    owner: &'a ReentryCheck,
}

impl Drop for ReentryGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.owner.depth.set(0);
        #[cfg(not(debug_assertions))]
        let _ = self.owner;
    }
}
