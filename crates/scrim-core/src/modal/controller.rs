#![forbid(unsafe_code)]

//! The modal lifecycle state machine.
//!
//! A [`ModalController`] owns one overlay's state (`Closed`/`Open`), its
//! lazily built surface, and the wiring between the shared services and
//! the per-instance focus trap. Transitions are async only because the
//! caller-supplied `before_open`/`before_close` gates may be; every await
//! happens before any visible side effect, so a rejecting gate aborts
//! with the world untouched.
//!
//! # Invariants
//!
//! - The surface exists from the first `set_content` or `open` until
//!   `destroy`, and is built at most once.
//! - Scroll lock and focus trap are engaged iff the state is `Open` (and
//!   the corresponding config switch is on).
//! - After `destroy`, the instance is terminal: surface gone, stack
//!   deregistered, `open`/`set_content` refused.
//!
//! # Failure modes
//!
//! - A gate hook rejecting surfaces as [`ModalError`] and leaves the state
//!   machine exactly where it was.
//! - Double `open`/`close` are defined no-ops.

use std::cell::RefCell;
use std::rc::Rc;

use scrim_host::{HostSurface, InputEvent, KeyCode, Modifiers, NodeId};

use crate::a11y;
use crate::error::ModalError;
use crate::focus::FocusTrap;
use crate::hooks::LifecycleHooks;
use crate::modal::config::{ModalConfig, ModalContent};
use crate::modal::stack::{InstanceId, OverlayServices};
use crate::modal::surface::Surface;

/// Immutable snapshot of a controller's runtime state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalState {
    /// Whether the overlay is currently open.
    pub is_open: bool,
    /// The stable, collision-resistant id assigned at construction (also
    /// the container's host id, for label association).
    pub id: String,
}

/// What a routed input event asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    /// Escape was pressed while this instance was topmost.
    EscapePressed,
    /// A pointer-down landed exactly on this instance's backdrop.
    BackdropClicked,
    /// Tab navigation wrapped inside the focus trap.
    FocusWrapped,
}

impl ModalAction {
    /// Whether this action should result in a `close()`.
    #[must_use]
    pub const fn requests_close(self) -> bool {
        matches!(self, Self::EscapePressed | Self::BackdropClicked)
    }
}

/// Lifecycle controller for one overlay instance.
pub struct ModalController<H: HostSurface> {
    host: Rc<RefCell<H>>,
    services: OverlayServices,
    config: ModalConfig,
    hooks: LifecycleHooks,
    state: ModalState,
    instance: InstanceId,
    surface: Option<Surface>,
    trap: Option<FocusTrap>,
    destroyed: bool,
}

impl<H: HostSurface> ModalController<H> {
    /// Construct a closed controller with no surface yet.
    pub fn new(
        host: Rc<RefCell<H>>,
        services: OverlayServices,
        config: ModalConfig,
        hooks: LifecycleHooks,
    ) -> Self {
        Self {
            host,
            services,
            config,
            hooks,
            state: ModalState {
                is_open: false,
                id: a11y::generate_id("modal"),
            },
            instance: InstanceId::next(),
            surface: None,
            trap: None,
            destroyed: false,
        }
    }

    /// Snapshot of the runtime state. A copy, never a live reference.
    #[must_use]
    pub fn state(&self) -> ModalState {
        self.state.clone()
    }

    /// Whether the overlay is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    /// The instance's stable string id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.state.id
    }

    /// Whether `destroy()` has completed.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// The backdrop node, once the surface exists.
    #[must_use]
    pub fn backdrop(&self) -> Option<NodeId> {
        self.surface.as_ref().map(|s| s.backdrop)
    }

    /// The container node, once the surface exists.
    #[must_use]
    pub fn container(&self) -> Option<NodeId> {
        self.surface.as_ref().map(|s| s.container)
    }

    /// The content region node, once the surface exists.
    #[must_use]
    pub fn content(&self) -> Option<NodeId> {
        self.surface.as_ref().map(|s| s.content)
    }

    /// Replace the content region's children with a node or raw markup,
    /// building the surface if it does not exist yet. Does not change the
    /// open/closed state.
    pub fn set_content(&mut self, content: impl Into<ModalContent>) -> Result<(), ModalError> {
        if self.destroyed {
            return Err(ModalError::Destroyed);
        }
        let content = content.into();
        let host_rc = Rc::clone(&self.host);
        let mut host = host_rc.borrow_mut();
        if self.surface.is_none() {
            self.surface = Some(Surface::build(&mut *host, &self.state.id, &self.config));
        }
        if let Some(surface) = &self.surface {
            surface.set_content(&mut *host, &content);
        }
        Ok(())
    }

    /// Open the overlay. No-op when already open.
    ///
    /// Awaits the `before_open` gate first; rejection aborts the open with
    /// no side effects and propagates as [`ModalError::BeforeOpen`].
    pub async fn open(&mut self) -> Result<(), ModalError> {
        if self.destroyed {
            return Err(ModalError::Destroyed);
        }
        if self.state.is_open {
            return Ok(());
        }

        self.hooks
            .gate_before_open()
            .await
            .map_err(ModalError::BeforeOpen)?;
        // Other event-loop work ran while the gate was pending; commit
        // only if still closed.
        if self.state.is_open {
            return Ok(());
        }

        let host_rc = Rc::clone(&self.host);
        {
            let mut host = host_rc.borrow_mut();
            if self.surface.is_none() {
                self.surface = Some(Surface::build(&mut *host, &self.state.id, &self.config));
            }
            if let Some(surface) = &self.surface {
                if self.config.lock_scroll {
                    self.services.scroll_lock.lock(&mut *host);
                }
                surface.show(&mut *host);
                if self.config.trap_focus {
                    let mut trap = FocusTrap::new(surface.container);
                    trap.activate(&mut *host, self.config.initial_focus.as_ref());
                    self.trap = Some(trap);
                }
            }
        }

        self.state.is_open = true;
        self.services.stack.push(self.instance);
        tracing::debug!(id = %self.state.id, depth = self.services.stack.depth(), "modal opened");
        self.hooks.notify_after_open();
        Ok(())
    }

    /// Close the overlay. No-op when already closed.
    ///
    /// Awaits the `before_close` gate first; rejection aborts the close
    /// with no side effects and propagates as [`ModalError::BeforeClose`].
    pub async fn close(&mut self) -> Result<(), ModalError> {
        if !self.state.is_open {
            return Ok(());
        }

        self.hooks
            .gate_before_close()
            .await
            .map_err(ModalError::BeforeClose)?;
        if !self.state.is_open {
            return Ok(());
        }

        let host_rc = Rc::clone(&self.host);
        {
            let mut host = host_rc.borrow_mut();
            if let Some(mut trap) = self.trap.take() {
                trap.deactivate(&mut *host, self.config.return_focus);
            }
            if self.config.lock_scroll {
                self.services.scroll_lock.unlock(&mut *host);
            }
            if let Some(surface) = &self.surface {
                surface.hide(&mut *host);
            }
        }

        self.state.is_open = false;
        self.services.stack.remove(self.instance);
        tracing::debug!(id = %self.state.id, "modal closed");
        self.hooks.notify_after_close();
        Ok(())
    }

    /// Open or close based on the current state.
    pub async fn toggle(&mut self) -> Result<(), ModalError> {
        if self.state.is_open {
            self.close().await
        } else {
            self.open().await
        }
    }

    /// Tear the instance down: full close first when open (gate awaited;
    /// rejection aborts the destroy), then surface removal. Terminal;
    /// repeated calls are no-ops.
    pub async fn destroy(&mut self) -> Result<(), ModalError> {
        if self.destroyed {
            return Ok(());
        }
        if self.state.is_open {
            self.close().await?;
        }

        if let Some(surface) = self.surface.take() {
            let mut host = self.host.borrow_mut();
            surface.remove(&mut *host);
        }
        self.trap = None;
        self.services.stack.remove(self.instance);
        self.destroyed = true;
        tracing::debug!(id = %self.state.id, "modal destroyed");
        Ok(())
    }

    /// Route an input event to this instance.
    ///
    /// Escape answers only while this instance is topmost on the shared
    /// stack (and `close_on_escape` is set); a pointer-down answers only
    /// when its target is exactly this instance's backdrop (and
    /// `close_on_backdrop_click` is set); Tab goes to the focus trap.
    /// Returns what the event asked for — the caller decides when to act,
    /// or uses [`Self::dispatch`] to act immediately.
    pub fn handle_event(&mut self, event: &InputEvent) -> Option<ModalAction> {
        if self.destroyed || !self.state.is_open {
            return None;
        }

        match event {
            InputEvent::Key(key) => match key.code {
                KeyCode::Escape => (self.config.close_on_escape
                    && key.modifiers == Modifiers::NONE
                    && self.services.stack.is_top(self.instance))
                .then_some(ModalAction::EscapePressed),
                KeyCode::Tab => {
                    let trap = self.trap.as_ref()?;
                    let mut host = self.host.borrow_mut();
                    trap.handle_key(&mut *host, key)
                        .then_some(ModalAction::FocusWrapped)
                }
                _ => None,
            },
            InputEvent::PointerDown(pointer) => {
                let backdrop = self.surface.as_ref()?.backdrop;
                (self.config.close_on_backdrop_click && pointer.target == backdrop)
                    .then_some(ModalAction::BackdropClicked)
            }
        }
    }

    /// [`Self::handle_event`] plus the resulting `close()` when the event
    /// requested one.
    pub async fn dispatch(&mut self, event: &InputEvent) -> Result<Option<ModalAction>, ModalError> {
        let action = self.handle_event(event);
        if let Some(action) = action
            && action.requests_close()
        {
            self.close().await?;
        }
        Ok(action)
    }
}

impl<H: HostSurface> std::fmt::Debug for ModalController<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalController")
            .field("state", &self.state)
            .field("instance", &self.instance)
            .field("has_surface", &self.surface.is_some())
            .field("trapped", &self.trap.is_some())
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollster::block_on;
    use scrim_host::MemoryHost;

    fn controller(config: ModalConfig) -> (Rc<RefCell<MemoryHost>>, ModalController<MemoryHost>) {
        let host = Rc::new(RefCell::new(MemoryHost::new()));
        let ctl = ModalController::new(
            Rc::clone(&host),
            OverlayServices::new(),
            config,
            LifecycleHooks::new(),
        );
        (host, ctl)
    }

    #[test]
    fn starts_closed_without_surface() {
        let (_host, ctl) = controller(ModalConfig::default());
        assert!(!ctl.is_open());
        assert!(ctl.container().is_none());
        let state = ctl.state();
        assert!(!state.is_open);
        assert!(state.id.starts_with("modal-"));
    }

    #[test]
    fn open_builds_surface_and_shows_it() {
        let (host, mut ctl) = controller(ModalConfig::default());
        block_on(ctl.open()).unwrap();

        assert!(ctl.is_open());
        let container = ctl.container().unwrap();
        let backdrop = ctl.backdrop().unwrap();
        let host = host.borrow();
        assert_eq!(host.style(container, "display").as_deref(), Some("block"));
        assert_eq!(host.style(backdrop, "display").as_deref(), Some("block"));
        assert_eq!(
            host.attribute(container, "id").as_deref(),
            Some(ctl.id())
        );
    }

    #[test]
    fn open_twice_is_idempotent() {
        let (host, mut ctl) = controller(ModalConfig::default());
        block_on(ctl.open()).unwrap();
        let container = ctl.container();
        block_on(ctl.open()).unwrap();

        assert!(ctl.is_open());
        assert_eq!(ctl.container(), container);
        // Only one lock was taken even though open() ran twice.
        block_on(ctl.close()).unwrap();
        assert_eq!(host.borrow().style(host.borrow().root(), "overflow"), None);
    }

    #[test]
    fn close_twice_is_idempotent() {
        let (_host, mut ctl) = controller(ModalConfig::default());
        block_on(ctl.open()).unwrap();
        block_on(ctl.close()).unwrap();
        block_on(ctl.close()).unwrap();
        assert!(!ctl.is_open());
    }

    #[test]
    fn toggle_alternates() {
        let (_host, mut ctl) = controller(ModalConfig::default());
        block_on(ctl.toggle()).unwrap();
        assert!(ctl.is_open());
        block_on(ctl.toggle()).unwrap();
        assert!(!ctl.is_open());
    }

    #[test]
    fn set_content_before_open_builds_surface_hidden() {
        let (host, mut ctl) = controller(ModalConfig::default());
        ctl.set_content("<p>hello</p>").unwrap();

        assert!(!ctl.is_open());
        let container = ctl.container().unwrap();
        let content = ctl.content().unwrap();
        let host = host.borrow();
        assert_eq!(host.style(container, "display").as_deref(), Some("none"));
        assert_eq!(host.markup(content), Some("<p>hello</p>"));
    }

    #[test]
    fn set_content_accepts_nodes() {
        let (host, mut ctl) = controller(ModalConfig::default());
        let para = host.borrow_mut().create_element("p");
        ctl.set_content(para).unwrap();
        let content = ctl.content().unwrap();
        assert_eq!(host.borrow().children(content), &[para]);
    }

    #[test]
    fn destroy_removes_surface_and_is_terminal() {
        let (host, mut ctl) = controller(ModalConfig::default());
        block_on(ctl.open()).unwrap();
        let container = ctl.container().unwrap();

        block_on(ctl.destroy()).unwrap();
        assert!(ctl.is_destroyed());
        assert!(!ctl.is_open());
        assert!(!host.borrow().is_attached(container));
        // Close ran first: scroll restored.
        assert_eq!(host.borrow().style(host.borrow().root(), "overflow"), None);

        // Terminal: repeated destroy fine, reuse refused.
        block_on(ctl.destroy()).unwrap();
        assert!(matches!(block_on(ctl.open()), Err(ModalError::Destroyed)));
        assert!(matches!(
            ctl.set_content("<p>x</p>"),
            Err(ModalError::Destroyed)
        ));
        assert!(block_on(ctl.close()).is_ok());
    }

    #[test]
    fn escape_is_ignored_with_modifiers() {
        let (_host, mut ctl) = controller(ModalConfig::default());
        block_on(ctl.open()).unwrap();

        use scrim_host::KeyEvent;
        let ctrl_escape =
            InputEvent::Key(KeyEvent::new(KeyCode::Escape).with_modifiers(Modifiers::CTRL));
        assert_eq!(ctl.handle_event(&ctrl_escape), None);
        assert_eq!(
            ctl.handle_event(&InputEvent::escape()),
            Some(ModalAction::EscapePressed)
        );
    }

    #[test]
    fn events_are_ignored_while_closed() {
        let (host, mut ctl) = controller(ModalConfig::default());
        ctl.set_content("<p>x</p>").unwrap();
        let backdrop = ctl.backdrop().unwrap();
        assert_eq!(ctl.handle_event(&InputEvent::escape()), None);
        assert_eq!(ctl.handle_event(&InputEvent::pointer_down(backdrop)), None);
        drop(host);
    }
}
