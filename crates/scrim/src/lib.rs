#![forbid(unsafe_code)]

//! Public facade for the scrim overlay-dialog primitive.
//!
//! Re-exports the behavioral core ([`scrim_core`]) and the host surface
//! abstraction ([`scrim_host`]) under one roof. Most applications only
//! need the [`prelude`].
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use scrim::prelude::*;
//!
//! let host = Rc::new(RefCell::new(MemoryHost::new()));
//! let services = OverlayServices::new();
//! let mut modal = ModalController::new(
//!     Rc::clone(&host),
//!     services,
//!     ModalConfig::default().aria_label("Settings"),
//!     LifecycleHooks::new(),
//! );
//! modal.set_content("<p>All systems nominal.</p>").unwrap();
//! pollster::block_on(modal.open()).unwrap();
//! assert!(modal.is_open());
//! ```

pub use scrim_core::{
    AriaAnnotations, BoxHookFuture, ClassNames, FOCUSABLE_SELECTORS, FocusTrap, HookError,
    HookResult, InitialFocus, LifecycleHooks, ModalAction, ModalConfig, ModalContent,
    ModalController, ModalError, ModalState, OverlayServices, OverlayStack, ScrollLock,
};

pub use scrim_host::{
    HostSurface, InputEvent, KeyCode, KeyEvent, MemoryHost, Modifiers, NodeId, PointerEvent,
};

/// One-stop imports for typical usage.
pub mod prelude {
    pub use scrim_core::{
        HookError, InitialFocus, LifecycleHooks, ModalAction, ModalConfig, ModalContent,
        ModalController, ModalError, OverlayServices,
    };
    pub use scrim_host::{HostSurface, InputEvent, MemoryHost, NodeId};
}
