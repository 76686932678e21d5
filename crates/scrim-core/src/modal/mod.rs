#![forbid(unsafe_code)]

//! The modal overlay: configuration, surface management, the shared
//! open-overlay stack, and the lifecycle controller that ties the scroll
//! lock, focus trap, and accessibility annotations together.
//!
//! Entry point is [`ModalController`]; everything else in this module is
//! its supporting cast.

mod config;
mod controller;
mod stack;
mod surface;

pub use config::{ClassNames, ModalConfig, ModalContent};
pub use controller::{ModalAction, ModalController, ModalState};
pub use stack::{InstanceId, OverlayServices, OverlayStack};

pub use crate::focus::InitialFocus;
