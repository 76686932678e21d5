#![forbid(unsafe_code)]

//! Lifecycle hook callbacks.
//!
//! The `before_*` hooks gate a transition: they are awaited, and a
//! rejection aborts the transition before any visible side effect. The
//! `after_*` hooks are notifications: fired after the transition commits,
//! never awaited. Hooks may be synchronous or asynchronous; both are
//! modeled as one awaitable type ([`BoxHookFuture`]) so the controller
//! awaits them uniformly.
//!
//! There is no cancellation: a gate hook that never resolves stalls that
//! transition (hooks are caller-supplied UI confirmations and expected to
//! be fast).

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::error::HookError;

/// Outcome of a gate hook.
pub type HookResult = Result<(), HookError>;

/// The uniform awaitable produced by gate hooks.
pub type BoxHookFuture = Pin<Box<dyn Future<Output = HookResult>>>;

type GateHook = Box<dyn FnMut() -> BoxHookFuture>;
type NotifyHook = Box<dyn FnMut()>;

/// Optional callbacks around open/close transitions.
#[derive(Default)]
pub struct LifecycleHooks {
    before_open: Option<GateHook>,
    after_open: Option<NotifyHook>,
    before_close: Option<GateHook>,
    after_close: Option<NotifyHook>,
}

impl LifecycleHooks {
    /// No hooks.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gate hook awaited before an open commits.
    #[must_use]
    pub fn before_open<F, Fut>(mut self, mut hook: F) -> Self
    where
        F: FnMut() -> Fut + 'static,
        Fut: Future<Output = HookResult> + 'static,
    {
        self.before_open = Some(Box::new(move || -> BoxHookFuture { Box::pin(hook()) }));
        self
    }

    /// Synchronous convenience for [`Self::before_open`].
    #[must_use]
    pub fn before_open_sync<F>(self, mut hook: F) -> Self
    where
        F: FnMut() -> HookResult + 'static,
    {
        self.before_open(move || std::future::ready(hook()))
    }

    /// Gate hook awaited before a close commits.
    #[must_use]
    pub fn before_close<F, Fut>(mut self, mut hook: F) -> Self
    where
        F: FnMut() -> Fut + 'static,
        Fut: Future<Output = HookResult> + 'static,
    {
        self.before_close = Some(Box::new(move || -> BoxHookFuture { Box::pin(hook()) }));
        self
    }

    /// Synchronous convenience for [`Self::before_close`].
    #[must_use]
    pub fn before_close_sync<F>(self, mut hook: F) -> Self
    where
        F: FnMut() -> HookResult + 'static,
    {
        self.before_close(move || std::future::ready(hook()))
    }

    /// Notification fired after an open commits.
    #[must_use]
    pub fn after_open<F>(mut self, hook: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.after_open = Some(Box::new(hook));
        self
    }

    /// Notification fired after a close commits.
    #[must_use]
    pub fn after_close<F>(mut self, hook: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.after_close = Some(Box::new(hook));
        self
    }

    pub(crate) async fn gate_before_open(&mut self) -> HookResult {
        match self.before_open.as_mut() {
            Some(hook) => hook().await,
            None => Ok(()),
        }
    }

    pub(crate) async fn gate_before_close(&mut self) -> HookResult {
        match self.before_close.as_mut() {
            Some(hook) => hook().await,
            None => Ok(()),
        }
    }

    pub(crate) fn notify_after_open(&mut self) {
        if let Some(hook) = self.after_open.as_mut() {
            hook();
        }
    }

    pub(crate) fn notify_after_close(&mut self) {
        if let Some(hook) = self.after_close.as_mut() {
            hook();
        }
    }
}

impl fmt::Debug for LifecycleHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleHooks")
            .field("before_open", &self.before_open.is_some())
            .field("after_open", &self.after_open.is_some())
            .field("before_close", &self.before_close.is_some())
            .field("after_close", &self.after_close.is_some())
            .finish()
    }
}
