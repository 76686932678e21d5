#![forbid(unsafe_code)]

//! Modal configuration.
//!
//! All options are fixed at controller construction; there is no
//! reconfiguration path. The four behavior switches default to on.

use scrim_host::NodeId;

use crate::a11y::AriaAnnotations;
use crate::focus::InitialFocus;

/// Class names assigned to the three surface nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassNames {
    /// Backdrop class. Defaults to `scrim-backdrop`.
    pub backdrop: Option<String>,
    /// Container class. Defaults to `scrim-container`.
    pub container: Option<String>,
    /// Content region class. Defaults to `scrim-content`.
    pub content: Option<String>,
}

/// Content handed to [`crate::modal::ModalController::set_content`]:
/// either a host node to adopt or raw markup for the host to interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalContent {
    /// A node moved into the content region.
    Node(NodeId),
    /// Raw markup replacing the content region's children.
    Markup(String),
}

impl From<NodeId> for ModalContent {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

impl From<&str> for ModalContent {
    fn from(markup: &str) -> Self {
        Self::Markup(markup.to_string())
    }
}

impl From<String> for ModalContent {
    fn from(markup: String) -> Self {
        Self::Markup(markup)
    }
}

/// Modal behavior configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalConfig {
    /// Close when a pointer-down lands exactly on the backdrop.
    pub close_on_backdrop_click: bool,
    /// Close on Escape while topmost.
    pub close_on_escape: bool,
    /// Suppress background scroll while open.
    pub lock_scroll: bool,
    /// Contain Tab navigation while open.
    pub trap_focus: bool,
    /// Where initial focus lands on open.
    pub initial_focus: Option<InitialFocus>,
    /// Element to receive focus on close, overriding the recorded
    /// previously-focused element.
    pub return_focus: Option<NodeId>,
    /// Surface node class names.
    pub class_names: ClassNames,
    /// ARIA labeling for the container.
    pub aria: AriaAnnotations,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            close_on_backdrop_click: true,
            close_on_escape: true,
            lock_scroll: true,
            trap_focus: true,
            initial_focus: None,
            return_focus: None,
            class_names: ClassNames::default(),
            aria: AriaAnnotations::default(),
        }
    }
}

impl ModalConfig {
    /// Set close-on-backdrop behavior.
    #[must_use]
    pub fn close_on_backdrop_click(mut self, close: bool) -> Self {
        self.close_on_backdrop_click = close;
        self
    }

    /// Set close-on-escape behavior.
    #[must_use]
    pub fn close_on_escape(mut self, close: bool) -> Self {
        self.close_on_escape = close;
        self
    }

    /// Set scroll suppression.
    #[must_use]
    pub fn lock_scroll(mut self, lock: bool) -> Self {
        self.lock_scroll = lock;
        self
    }

    /// Set focus containment.
    #[must_use]
    pub fn trap_focus(mut self, trap: bool) -> Self {
        self.trap_focus = trap;
        self
    }

    /// Set the initial focus target.
    #[must_use]
    pub fn initial_focus(mut self, target: InitialFocus) -> Self {
        self.initial_focus = Some(target);
        self
    }

    /// Set the element focus returns to on close.
    #[must_use]
    pub fn return_focus(mut self, node: NodeId) -> Self {
        self.return_focus = Some(node);
        self
    }

    /// Set surface class names.
    #[must_use]
    pub fn class_names(mut self, class_names: ClassNames) -> Self {
        self.class_names = class_names;
        self
    }

    /// Set `aria-label`.
    #[must_use]
    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria.label = Some(label.into());
        self
    }

    /// Set `aria-labelledby`.
    #[must_use]
    pub fn aria_labelled_by(mut self, id: impl Into<String>) -> Self {
        self.aria.labelled_by = Some(id.into());
        self
    }

    /// Set `aria-describedby`.
    #[must_use]
    pub fn aria_described_by(mut self, id: impl Into<String>) -> Self {
        self.aria.described_by = Some(id.into());
        self
    }
}
