#![forbid(unsafe_code)]

//! Host surface abstraction for the scrim overlay core.
//!
//! The overlay lifecycle never touches a rendering environment directly.
//! Everything it needs from the host — element creation, tree mutation,
//! attributes, inline styles, focus, viewport metrics, selector queries —
//! goes through the [`HostSurface`] trait, so the state machine itself is
//! portable and testable without a real DOM.
//!
//! Two things live in this crate:
//!
//! - [`HostSurface`] plus the [`NodeId`] handle and canonical input events
//!   ([`event`]).
//! - [`MemoryHost`], a complete in-memory implementation used as the test
//!   vehicle and as a reference host for headless embedding.
//!
//! # Invariants
//!
//! - `NodeId`s are never reused for the lifetime of a host.
//! - Removing a node detaches its whole subtree; handles stay valid but
//!   `is_attached` reports `false`.
//! - `active_element` only ever reports an attached node.

pub mod event;
pub mod memory;
mod selector;

pub use event::{InputEvent, KeyCode, KeyEvent, Modifiers, PointerEvent};
pub use memory::MemoryHost;

/// Handle to a node owned by the host surface.
///
/// Handles are cheap, copyable, and remain valid after the node is
/// detached; operations on detached nodes are defined (they mutate the
/// detached subtree) rather than errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// Construct a handle from a raw value. Hosts hand these out; callers
    /// normally never need this.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Get the raw handle value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Capabilities the overlay core consumes from the host platform.
///
/// The trait is object safe; helpers in the core take `&mut dyn
/// HostSurface` so a single code path serves every host.
///
/// # Failure modes
///
/// None of these operations report errors. Operations on unknown or
/// detached handles are no-ops (mutation) or `None`/`false`/empty
/// (queries), matching how a browser surface degrades.
pub trait HostSurface {
    /// The root container node (the "body"). Always attached.
    fn root(&self) -> NodeId;

    /// Create a detached element with the given tag name.
    fn create_element(&mut self, tag: &str) -> NodeId;

    /// Append `child` as the last child of `parent`, detaching it from any
    /// previous parent first.
    fn append_child(&mut self, parent: NodeId, child: NodeId);

    /// Detach `node` from its parent. The subtree stays intact.
    fn remove_node(&mut self, node: NodeId);

    /// Detach all children of `node`.
    fn clear_children(&mut self, node: NodeId);

    /// Replace the children of `node` with raw markup. The host is free to
    /// parse or store it opaquely; the core never inspects it.
    fn set_markup(&mut self, node: NodeId, markup: &str);

    /// Set an attribute.
    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str);

    /// Remove an attribute if present.
    fn remove_attribute(&mut self, node: NodeId, name: &str);

    /// Read an attribute.
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Assign the full class string of a node.
    fn set_class_name(&mut self, node: NodeId, class: &str);

    /// Set an inline style property.
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    /// Remove an inline style property if present.
    fn remove_style(&mut self, node: NodeId, property: &str);

    /// Read an inline style property. `None` means the property was never
    /// set inline (distinct from an explicit empty value).
    fn style(&self, node: NodeId, property: &str) -> Option<String>;

    /// Width of the host viewport, including any scrollbar gutter.
    fn viewport_width(&self) -> u32;

    /// Width available to content (viewport minus scrollbar, if visible).
    fn content_width(&self) -> u32;

    /// Move focus to `node`. Ignored unless the node is attached and
    /// focusable.
    fn focus(&mut self, node: NodeId);

    /// The currently focused node, if any attached node holds focus.
    fn active_element(&self) -> Option<NodeId>;

    /// Whether `node` is connected to the root.
    fn is_attached(&self, node: NodeId) -> bool;

    /// Whether `node` is `ancestor` or a descendant of it.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool;

    /// Whether the node occupies rendered space (not hidden by itself or an
    /// ancestor).
    fn has_rendered_size(&self, node: NodeId) -> bool;

    /// Whether the host would accept focus on this node (intrinsically
    /// focusable, or carrying any `tabindex`).
    fn is_focusable(&self, node: NodeId) -> bool;

    /// All descendants of `root` (tree order, excluding `root`) matching
    /// the selector list.
    fn query_all(&self, root: NodeId, selector: &str) -> Vec<NodeId>;

    /// First descendant of `root` matching the selector list.
    fn query_selector(&self, root: NodeId, selector: &str) -> Option<NodeId> {
        self.query_all(root, selector).into_iter().next()
    }
}
