#![forbid(unsafe_code)]

//! Stateless accessibility annotation helpers.
//!
//! A dialog container gets `role="dialog"` and `aria-modal="true"`
//! unconditionally; whichever labeling attributes the caller supplied are
//! applied as-is (at most one labeling strategy is meaningful, but that is
//! the caller's call — no validation here). The backdrop is decorative and
//! gets hidden from assistive tech.

use rand::Rng;
use rand::distributions::Alphanumeric;
use scrim_host::{HostSurface, NodeId};

/// Length of the random id suffix. Nine alphanumerics give ~53 bits, far
/// beyond what a bounded population of dialogs can collide on.
const ID_SUFFIX_LEN: usize = 9;

/// Optional ARIA labeling for a dialog container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AriaAnnotations {
    /// `aria-label` text.
    pub label: Option<String>,
    /// `aria-labelledby` id reference.
    pub labelled_by: Option<String>,
    /// `aria-describedby` id reference.
    pub described_by: Option<String>,
}

/// Mark `container` as a modal dialog and wire up supplied labels.
pub fn set_modal_attributes(
    host: &mut dyn HostSurface,
    container: NodeId,
    aria: &AriaAnnotations,
) {
    host.set_attribute(container, "role", "dialog");
    host.set_attribute(container, "aria-modal", "true");

    if let Some(label) = &aria.label {
        host.set_attribute(container, "aria-label", label);
    }
    if let Some(labelled_by) = &aria.labelled_by {
        host.set_attribute(container, "aria-labelledby", labelled_by);
    }
    if let Some(described_by) = &aria.described_by {
        host.set_attribute(container, "aria-describedby", described_by);
    }
}

/// Generate a practically-unique id of the form `prefix-s7ks02bfq`.
#[must_use]
pub fn generate_id(prefix: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_SUFFIX_LEN)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect();
    format!("{prefix}-{suffix}")
}

/// Hide a decorative element from screen readers.
pub fn hide_from_screen_readers(host: &mut dyn HostSurface, element: NodeId) {
    host.set_attribute(element, "aria-hidden", "true");
}
