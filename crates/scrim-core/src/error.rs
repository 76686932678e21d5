#![forbid(unsafe_code)]

//! Error types for lifecycle transitions.
//!
//! The failure surface is deliberately small: the only runtime failures
//! are caller-supplied `before_open`/`before_close` hooks rejecting, and
//! use of an instance after `destroy()`. Everything else (unresolvable
//! initial focus, no focusable descendants, double open/close) is a
//! defined fallback or no-op, not an error.

use thiserror::Error;

/// Rejection raised by a lifecycle hook.
///
/// Hooks are UI confirmations supplied by the embedder; a message is all
/// the core needs to carry back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct HookError(String);

impl HookError {
    /// Create a hook rejection with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The rejection message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Errors surfaced by [`crate::modal::ModalController`] transitions.
#[derive(Debug, Error)]
pub enum ModalError {
    /// The `before_open` hook rejected; the open was aborted with no side
    /// effects.
    #[error("before-open hook rejected the transition")]
    BeforeOpen(#[source] HookError),

    /// The `before_close` hook rejected; the close was aborted with no
    /// side effects.
    #[error("before-close hook rejected the transition")]
    BeforeClose(#[source] HookError),

    /// The controller was destroyed and must not be reused.
    #[error("modal controller has been destroyed")]
    Destroyed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hook_error_preserves_message() {
        let err = HookError::new("user cancelled");
        assert_eq!(err.message(), "user cancelled");
        assert_eq!(err.to_string(), "user cancelled");
    }

    #[test]
    fn modal_error_sources_the_hook() {
        use std::error::Error as _;
        let err = ModalError::BeforeOpen(HookError::new("nope"));
        let source = err.source().map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("nope"));
    }
}
