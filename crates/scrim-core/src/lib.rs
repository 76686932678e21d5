#![forbid(unsafe_code)]

//! Behavioral core of the scrim overlay-dialog primitive.
//!
//! This crate owns the hard part of a modal: coordinating three
//! cross-cutting, globally shared concerns — focus containment, background
//! scroll suppression, and accessibility state — around a small
//! asynchronous open/close lifecycle that stays correct when instances are
//! nested or rapidly toggled. Rendering is someone else's problem: all host
//! interaction goes through [`scrim_host::HostSurface`].
//!
//! Architecture, leaf first:
//!
//! - [`a11y`]: stateless annotation helpers (dialog role, label wiring,
//!   collision-resistant ids, screen-reader hiding).
//! - [`scroll_lock`]: a shared reference-counted service suppressing
//!   background scroll while any overlay is open.
//! - [`focus`]: per-instance focus trap with wrap-around Tab handling and
//!   focus restoration.
//! - [`modal`]: the [`modal::ModalController`] lifecycle state machine
//!   orchestrating the above, plus the shared open-overlay stack that
//!   routes Escape to the topmost instance.
//!
//! Single-threaded, cooperative model: controllers share services via
//! `Rc`, suspension happens only while awaiting the caller-supplied
//! `before_open`/`before_close` hooks, and no interior borrow is held
//! across an await.

pub mod a11y;
pub mod error;
pub mod focus;
pub mod hooks;
pub mod modal;
pub mod scroll_lock;

pub use a11y::AriaAnnotations;
pub use error::{HookError, ModalError};
pub use focus::{FOCUSABLE_SELECTORS, FocusTrap};
pub use hooks::{BoxHookFuture, HookResult, LifecycleHooks};
pub use modal::{
    ClassNames, InitialFocus, ModalAction, ModalConfig, ModalContent, ModalController, ModalState,
    OverlayServices, OverlayStack,
};
pub use scroll_lock::ScrollLock;
