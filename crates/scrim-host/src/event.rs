#![forbid(unsafe_code)]

//! Canonical input event types.
//!
//! Hosts translate their native input into these before handing events to
//! the overlay core. All types derive `Clone`, `PartialEq`, and `Eq` for
//! use in tests and pattern matching. Only presses are modeled; the core
//! has no use for repeat/release distinctions.

use bitflags::bitflags;

use crate::NodeId;

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A keyboard event.
    Key(KeyEvent),
    /// A pointer-down event (mouse button or touch).
    PointerDown(PointerEvent),
}

impl InputEvent {
    /// A bare Escape keypress.
    #[must_use]
    pub const fn escape() -> Self {
        Self::Key(KeyEvent::new(KeyCode::Escape))
    }

    /// A bare Tab keypress.
    #[must_use]
    pub const fn tab() -> Self {
        Self::Key(KeyEvent::new(KeyCode::Tab))
    }

    /// Shift+Tab.
    #[must_use]
    pub const fn shift_tab() -> Self {
        Self::Key(KeyEvent::new(KeyCode::Tab).with_modifiers(Modifiers::SHIFT))
    }

    /// A pointer-down whose target is `node`.
    #[must_use]
    pub const fn pointer_down(node: NodeId) -> Self {
        Self::PointerDown(PointerEvent { target: node })
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a key event with no modifiers.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
        }
    }

    /// Attach modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if Shift is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Key codes the overlay core reacts to. `Char` carries everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Escape key.
    Escape,
    /// Tab key.
    Tab,
    /// Enter/Return key.
    Enter,
    /// A printable character.
    Char(char),
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A pointer-down event with the node it landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// The exact node hit, before any bubbling.
    pub target: NodeId,
}
