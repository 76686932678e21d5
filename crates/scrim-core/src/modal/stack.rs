#![forbid(unsafe_code)]

//! Shared registry of open overlays, plus the service bundle handed to
//! every controller.
//!
//! Instead of each controller registering its own document-level escape
//! listener, controllers announce themselves on one shared [`OverlayStack`]
//! while open, and Escape is answered only by the topmost instance. This
//! keeps input priority well defined for nested modals and avoids O(n)
//! listener fan-out.
//!
//! # Invariants
//!
//! - Stack order is insertion order; later opens are on top.
//! - An instance appears at most once.
//! - Removal from any position is allowed (out-of-order closes).

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::scroll_lock::ScrollLock;

/// Global counter for unique controller instance ids.
static INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identity of a controller within the process, used for stack
/// ordering. Distinct from the string id a controller exposes to the host
/// for label association.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(u64);

impl InstanceId {
    pub(crate) fn next() -> Self {
        Self(INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Stack of currently open overlay instances, bottom to top.
#[derive(Debug, Default)]
pub struct OverlayStack {
    open: RefCell<Vec<InstanceId>>,
}

impl OverlayStack {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&self, id: InstanceId) {
        let mut open = self.open.borrow_mut();
        open.retain(|&other| other != id);
        open.push(id);
    }

    pub(crate) fn remove(&self, id: InstanceId) {
        self.open.borrow_mut().retain(|&other| other != id);
    }

    /// The topmost open instance, if any.
    #[must_use]
    pub fn top(&self) -> Option<InstanceId> {
        self.open.borrow().last().copied()
    }

    /// Whether `id` is currently the topmost open instance.
    #[must_use]
    pub fn is_top(&self, id: InstanceId) -> bool {
        self.top() == Some(id)
    }

    /// Whether `id` is anywhere in the stack.
    #[must_use]
    pub fn contains(&self, id: InstanceId) -> bool {
        self.open.borrow().contains(&id)
    }

    /// Number of open instances.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.borrow().len()
    }

    /// Whether no instance is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open.borrow().is_empty()
    }

    /// Forget all registrations. Test isolation only.
    pub fn reset(&self) {
        self.open.borrow_mut().clear();
    }
}

/// The process-shared services every controller needs: the scroll lock
/// counter and the open-overlay stack. Clones share the same underlying
/// services.
#[derive(Debug, Clone, Default)]
pub struct OverlayServices {
    /// Shared background-scroll suppression.
    pub scroll_lock: Rc<ScrollLock>,
    /// Shared open-overlay registry.
    pub stack: Rc<OverlayStack>,
}

impl OverlayServices {
    /// Create a fresh, unshared service bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset both services. Test isolation only; does not touch any host.
    pub fn reset(&self) {
        self.scroll_lock.reset();
        self.stack.reset();
    }
}
