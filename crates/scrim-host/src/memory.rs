#![forbid(unsafe_code)]

//! In-memory reference implementation of [`HostSurface`].
//!
//! `MemoryHost` models just enough of a rendering environment for the
//! overlay core to be exercised end to end: an element tree rooted at a
//! "body" node, attributes, inline styles, a focus model, rendered-size
//! visibility (a node hidden by `display: none` on itself or an ancestor
//! has no rendered size), and viewport/content width knobs for simulating
//! a visible scrollbar.
//!
//! It is the unit-test vehicle for the core and a workable host for fully
//! headless embedding.
//!
//! # Invariants
//!
//! - Node storage is an append-only arena; `NodeId`s are indices and are
//!   never reused.
//! - `active_element` never reports a detached node.
//! - `append_child` refuses to create cycles (no-op).

use ahash::AHashMap;

use crate::selector::{Element, SelectorList};
use crate::{HostSurface, NodeId};

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    attrs: AHashMap<String, String>,
    styles: AHashMap<String, String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    markup: Option<String>,
    rendered: bool,
}

struct ElementView<'a>(&'a NodeData);

impl Element for ElementView<'_> {
    fn tag(&self) -> &str {
        &self.0.tag
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.0.attrs.get(name).map(String::as_str)
    }
}

/// An in-memory host surface.
#[derive(Debug)]
pub struct MemoryHost {
    nodes: Vec<NodeData>,
    root: NodeId,
    active: Option<NodeId>,
    viewport_width: u32,
    content_width: u32,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// Create a host with an empty body and no visible scrollbar.
    #[must_use]
    pub fn new() -> Self {
        let body = NodeData {
            tag: "body".to_string(),
            rendered: true,
            ..NodeData::default()
        };
        Self {
            nodes: vec![body],
            root: NodeId::from_raw(0),
            active: None,
            viewport_width: 1024,
            content_width: 1024,
        }
    }

    /// Set the viewport width reported to the core.
    pub fn set_viewport_width(&mut self, width: u32) {
        self.viewport_width = width;
    }

    /// Set the content width reported to the core. A value below the
    /// viewport width simulates a visible vertical scrollbar.
    pub fn set_content_width(&mut self, width: u32) {
        self.content_width = width;
    }

    /// Mark a node as occupying rendered space or not, independent of
    /// inline styles. Useful for modeling stylesheet-hidden elements.
    pub fn set_rendered(&mut self, node: NodeId, rendered: bool) {
        if let Some(data) = self.node_mut(node) {
            data.rendered = rendered;
        }
    }

    /// The tag a node was created with.
    #[must_use]
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|d| d.tag.as_str())
    }

    /// Children of a node, in tree order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node).map_or(&[], |d| d.children.as_slice())
    }

    /// Opaque markup last assigned via `set_markup`, if any.
    #[must_use]
    pub fn markup(&self, node: NodeId) -> Option<&str> {
        self.node(node).and_then(|d| d.markup.as_deref())
    }

    fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.raw() as usize)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id.raw() as usize)
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.node(node).and_then(|d| d.parent) else {
            return;
        };
        if let Some(pdata) = self.node_mut(parent) {
            pdata.children.retain(|&c| c != node);
        }
        if let Some(data) = self.node_mut(node) {
            data.parent = None;
        }
    }

    fn intrinsically_focusable(data: &NodeData) -> bool {
        match data.tag.as_str() {
            "a" | "area" => data.attrs.contains_key("href"),
            "input" | "select" | "textarea" | "button" => !data.attrs.contains_key("disabled"),
            "iframe" | "object" | "embed" => true,
            _ => data.attrs.contains_key("contenteditable"),
        }
    }

    fn hidden_by_style(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            let Some(data) = self.node(id) else {
                return true;
            };
            if data.styles.get("display").is_some_and(|v| v == "none") {
                return true;
            }
            current = data.parent;
        }
        false
    }

    fn collect_matches(&self, node: NodeId, selector: &SelectorList, out: &mut Vec<NodeId>) {
        let Some(data) = self.node(node) else {
            return;
        };
        for &child in &data.children {
            if let Some(cdata) = self.node(child) {
                if selector.matches(&ElementView(cdata)) {
                    out.push(child);
                }
                self.collect_matches(child, selector, out);
            }
        }
    }
}

impl HostSurface for MemoryHost {
    fn root(&self) -> NodeId {
        self.root
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId::from_raw(self.nodes.len() as u64);
        self.nodes.push(NodeData {
            tag: tag.to_ascii_lowercase(),
            rendered: true,
            ..NodeData::default()
        });
        id
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if parent == child || self.contains(child, parent) {
            return;
        }
        if self.node(parent).is_none() || self.node(child).is_none() {
            return;
        }
        self.detach(child);
        if let Some(data) = self.node_mut(child) {
            data.parent = Some(parent);
        }
        if let Some(data) = self.node_mut(parent) {
            data.children.push(child);
        }
    }

    fn remove_node(&mut self, node: NodeId) {
        if node == self.root {
            return;
        }
        self.detach(node);
    }

    fn clear_children(&mut self, node: NodeId) {
        let children = self.node(node).map(|d| d.children.clone()).unwrap_or_default();
        for child in children {
            self.detach(child);
        }
        if let Some(data) = self.node_mut(node) {
            data.markup = None;
        }
    }

    fn set_markup(&mut self, node: NodeId, markup: &str) {
        self.clear_children(node);
        if let Some(data) = self.node_mut(node) {
            data.markup = Some(markup.to_string());
        }
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(data) = self.node_mut(node) {
            data.attrs.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(data) = self.node_mut(node) {
            data.attrs.remove(name);
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.node(node).and_then(|d| d.attrs.get(name).cloned())
    }

    fn set_class_name(&mut self, node: NodeId, class: &str) {
        self.set_attribute(node, "class", class);
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(data) = self.node_mut(node) {
            data.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn remove_style(&mut self, node: NodeId, property: &str) {
        if let Some(data) = self.node_mut(node) {
            data.styles.remove(property);
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.node(node).and_then(|d| d.styles.get(property).cloned())
    }

    fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    fn content_width(&self) -> u32 {
        self.content_width
    }

    fn focus(&mut self, node: NodeId) {
        if self.is_attached(node) && self.is_focusable(node) && self.has_rendered_size(node) {
            self.active = Some(node);
        }
    }

    fn active_element(&self) -> Option<NodeId> {
        self.active.filter(|&n| self.is_attached(n))
    }

    fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.root {
                return true;
            }
            current = self.node(id).and_then(|d| d.parent);
        }
        false
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.node(id).and_then(|d| d.parent);
        }
        false
    }

    fn has_rendered_size(&self, node: NodeId) -> bool {
        self.is_attached(node)
            && self.node(node).is_some_and(|d| d.rendered)
            && !self.hidden_by_style(node)
    }

    fn is_focusable(&self, node: NodeId) -> bool {
        self.node(node).is_some_and(|data| {
            Self::intrinsically_focusable(data) || data.attrs.contains_key("tabindex")
        })
    }

    fn query_all(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let Some(parsed) = SelectorList::parse(selector) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        self.collect_matches(root, &parsed, &mut out);
        out
    }
}
