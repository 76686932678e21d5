#![forbid(unsafe_code)]

//! Reference-counted background-scroll suppression.
//!
//! One `ScrollLock` is shared by every controller in the process (via
//! [`crate::modal::OverlayServices`]); it is an explicit service object
//! rather than static state so tests can isolate and reset it.
//!
//! # Invariants
//!
//! - Scroll is suppressed iff the net `lock`/`unlock` count is > 0.
//! - The 0→1 transition captures the root's inline `overflow` and
//!   `padding-right` exactly as found; the →0 transition restores them
//!   exactly (absent values are removed, not set to empty strings).
//! - If a vertical scrollbar was visible at lock time (viewport width
//!   exceeds content width), compensating right padding equal to the
//!   scrollbar width is applied so layout does not shift.
//! - `unlock` beyond the floor is a no-op.

use std::cell::{Cell, RefCell};

use scrim_host::HostSurface;

#[derive(Debug, Clone, Default)]
struct SavedStyles {
    overflow: Option<String>,
    padding_right: Option<String>,
}

/// Shared scroll suppression counter.
#[derive(Debug, Default)]
pub struct ScrollLock {
    count: Cell<u32>,
    saved: RefCell<Option<SavedStyles>>,
}

impl ScrollLock {
    /// Create an unlocked service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current net lock count.
    #[must_use]
    pub fn lock_count(&self) -> u32 {
        self.count.get()
    }

    /// Whether background scroll is currently suppressed.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.count.get() > 0
    }

    /// Increment the lock count, suppressing scroll on the first
    /// increment.
    pub fn lock(&self, host: &mut dyn HostSurface) {
        if self.count.get() == 0 {
            let root = host.root();
            let saved = SavedStyles {
                overflow: host.style(root, "overflow"),
                padding_right: host.style(root, "padding-right"),
            };
            *self.saved.borrow_mut() = Some(saved);

            let scrollbar = host.viewport_width().saturating_sub(host.content_width());
            host.set_style(root, "overflow", "hidden");
            if scrollbar > 0 {
                host.set_style(root, "padding-right", &format!("{scrollbar}px"));
            }
            tracing::debug!(scrollbar, "scroll lock engaged");
        }
        self.count.set(self.count.get() + 1);
    }

    /// Decrement the lock count (floored at 0), restoring the captured
    /// styles on the transition to 0.
    pub fn unlock(&self, host: &mut dyn HostSurface) {
        if self.count.get() == 0 {
            return;
        }
        self.count.set(self.count.get() - 1);
        if self.count.get() > 0 {
            return;
        }

        let root = host.root();
        if let Some(saved) = self.saved.borrow_mut().take() {
            match saved.overflow {
                Some(value) => host.set_style(root, "overflow", &value),
                None => host.remove_style(root, "overflow"),
            }
            match saved.padding_right {
                Some(value) => host.set_style(root, "padding-right", &value),
                None => host.remove_style(root, "padding-right"),
            }
        }
        tracing::debug!("scroll lock released");
    }

    /// Drop all state without touching the host. Test isolation only; a
    /// lock released this way never restores styles.
    pub fn reset(&self) {
        self.count.set(0);
        *self.saved.borrow_mut() = None;
    }
}
