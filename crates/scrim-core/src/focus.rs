#![forbid(unsafe_code)]

//! Per-instance focus containment.
//!
//! While a trap is active, Tab navigation wraps at the edges of the
//! container's focusable descendants, so keyboard users can never leave
//! the dialog region; deactivation hands focus back to where it came from.
//! Both halves are WCAG dialog requirements.
//!
//! # Invariants
//!
//! - Only the first/last-edge Tab presses are consumed; interior Tab
//!   presses fall through to the host's default order.
//! - Restoration only targets elements that are still attached and still
//!   focusable; otherwise focus is left where it is.

use scrim_host::{HostSurface, KeyCode, KeyEvent, NodeId};

/// The fixed selector set defining focusable descendants: links with an
/// href, non-disabled form controls, embedded contexts, editable regions,
/// and explicitly tab-reachable elements. Matches are further filtered to
/// those with non-zero rendered size.
pub const FOCUSABLE_SELECTORS: &str = "a[href], area[href], input:not([disabled]), \
     select:not([disabled]), textarea:not([disabled]), button:not([disabled]), \
     iframe, object, embed, [contenteditable], [tabindex]:not([tabindex^=\"-\"])";

/// Where initial focus should land when a trap activates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitialFocus {
    /// A specific element.
    Node(NodeId),
    /// A selector resolved within the container. Resolving to nothing
    /// silently falls back to the first focusable descendant.
    Selector(String),
}

/// A focus containment session scoped to one container.
#[derive(Debug)]
pub struct FocusTrap {
    container: NodeId,
    previously_focused: Option<NodeId>,
    active: bool,
}

impl FocusTrap {
    /// Create an inactive trap for `container`.
    #[must_use]
    pub fn new(container: NodeId) -> Self {
        Self {
            container,
            previously_focused: None,
            active: false,
        }
    }

    /// The container this trap is scoped to.
    #[must_use]
    pub fn container(&self) -> NodeId {
        self.container
    }

    /// Whether the trap is currently active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Record the current focus and move it into the container.
    ///
    /// Initial focus resolution order: the hint (node, or selector queried
    /// within the container) → the first focusable descendant → the
    /// container itself, made focusable with `tabindex="-1"`.
    pub fn activate(&mut self, host: &mut dyn HostSurface, initial: Option<&InitialFocus>) {
        self.previously_focused = host.active_element();
        self.active = true;

        let hinted = initial.and_then(|hint| match hint {
            InitialFocus::Node(node) => Some(*node),
            InitialFocus::Selector(selector) => host.query_selector(self.container, selector),
        });
        if let Some(target) = hinted {
            host.focus(target);
            return;
        }

        if let Some(&first) = self.focusable_elements(host).first() {
            host.focus(first);
        } else {
            host.set_attribute(self.container, "tabindex", "-1");
            host.focus(self.container);
        }
    }

    /// Release the trap and restore focus.
    ///
    /// `return_focus` overrides the recorded previous element; either way
    /// the target must still be attached and focusable to receive focus.
    pub fn deactivate(&mut self, host: &mut dyn HostSurface, return_focus: Option<NodeId>) {
        self.active = false;
        let target = return_focus.or(self.previously_focused.take());
        self.previously_focused = None;

        if let Some(node) = target
            && host.is_attached(node)
            && host.is_focusable(node)
        {
            host.focus(node);
        }
    }

    /// Handle a key event while trapped. Returns `true` when the event was
    /// consumed (focus wrapped); `false` lets the host's default tab order
    /// proceed.
    pub fn handle_key(&self, host: &mut dyn HostSurface, key: &KeyEvent) -> bool {
        if !self.active || key.code != KeyCode::Tab {
            return false;
        }

        let focusable = self.focusable_elements(host);
        let (Some(&first), Some(&last)) = (focusable.first(), focusable.last()) else {
            return false;
        };

        let active = host.active_element();
        if key.shift() && active == Some(first) {
            host.focus(last);
            tracing::trace!(?last, "focus wrapped backward");
            true
        } else if !key.shift() && active == Some(last) {
            host.focus(first);
            tracing::trace!(?first, "focus wrapped forward");
            true
        } else {
            false
        }
    }

    /// The container's focusable descendants, in tree order, filtered to
    /// those with rendered size.
    #[must_use]
    pub fn focusable_elements(&self, host: &dyn HostSurface) -> Vec<NodeId> {
        host.query_all(self.container, FOCUSABLE_SELECTORS)
            .into_iter()
            .filter(|&node| host.has_rendered_size(node))
            .collect()
    }
}
