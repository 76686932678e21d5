#![forbid(unsafe_code)]

//! The host-visible surface: backdrop, container, content region.
//!
//! Built lazily on first `set_content` or first `open`, hidden until an
//! open commits, and removed wholesale on destroy. Wrapping the three
//! handles in one struct (held as `Option<Surface>` by the controller)
//! enforces the all-or-none invariant.

use scrim_host::{HostSurface, NodeId};

use crate::a11y;
use crate::modal::config::{ModalConfig, ModalContent};

const DEFAULT_BACKDROP_CLASS: &str = "scrim-backdrop";
const DEFAULT_CONTAINER_CLASS: &str = "scrim-container";
const DEFAULT_CONTENT_CLASS: &str = "scrim-content";

#[derive(Debug)]
pub(crate) struct Surface {
    pub(crate) backdrop: NodeId,
    pub(crate) container: NodeId,
    pub(crate) content: NodeId,
}

impl Surface {
    /// Build the three nodes, annotate them, and attach them to the host
    /// root, hidden.
    pub(crate) fn build(host: &mut dyn HostSurface, dom_id: &str, config: &ModalConfig) -> Self {
        let backdrop = host.create_element("div");
        host.set_class_name(
            backdrop,
            config
                .class_names
                .backdrop
                .as_deref()
                .unwrap_or(DEFAULT_BACKDROP_CLASS),
        );
        a11y::hide_from_screen_readers(host, backdrop);
        host.set_style(backdrop, "display", "none");

        let container = host.create_element("div");
        host.set_class_name(
            container,
            config
                .class_names
                .container
                .as_deref()
                .unwrap_or(DEFAULT_CONTAINER_CLASS),
        );
        host.set_attribute(container, "id", dom_id);
        a11y::set_modal_attributes(host, container, &config.aria);
        host.set_style(container, "display", "none");

        let content = host.create_element("div");
        host.set_class_name(
            content,
            config
                .class_names
                .content
                .as_deref()
                .unwrap_or(DEFAULT_CONTENT_CLASS),
        );

        host.append_child(container, content);
        let root = host.root();
        host.append_child(root, backdrop);
        host.append_child(root, container);

        Self {
            backdrop,
            container,
            content,
        }
    }

    pub(crate) fn show(&self, host: &mut dyn HostSurface) {
        host.set_style(self.backdrop, "display", "block");
        host.set_style(self.container, "display", "block");
    }

    pub(crate) fn hide(&self, host: &mut dyn HostSurface) {
        host.set_style(self.backdrop, "display", "none");
        host.set_style(self.container, "display", "none");
    }

    /// Replace the content region's children.
    pub(crate) fn set_content(&self, host: &mut dyn HostSurface, content: &ModalContent) {
        match content {
            ModalContent::Node(node) => {
                host.clear_children(self.content);
                host.append_child(self.content, *node);
            }
            ModalContent::Markup(markup) => host.set_markup(self.content, markup),
        }
    }

    /// Detach every surface node from the host.
    pub(crate) fn remove(&self, host: &mut dyn HostSurface) {
        host.remove_node(self.backdrop);
        host.remove_node(self.container);
    }
}
