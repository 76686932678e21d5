#![forbid(unsafe_code)]

//! End-to-end lifecycle scenarios: controllers driving a real in-memory
//! host, with the shared services exactly as an application would wire
//! them.

use std::cell::RefCell;
use std::rc::Rc;

use pollster::block_on;
use scrim_core::{
    HookError, LifecycleHooks, ModalAction, ModalConfig, ModalController, ModalError,
    OverlayServices,
};
use scrim_host::{HostSurface, InputEvent, MemoryHost, NodeId};

struct World {
    host: Rc<RefCell<MemoryHost>>,
    services: OverlayServices,
    trigger: NodeId,
}

/// A host with one focused trigger button, as if the user just activated
/// the control that opens the dialog.
fn world() -> World {
    let host = Rc::new(RefCell::new(MemoryHost::new()));
    let trigger = {
        let mut h = host.borrow_mut();
        let root = h.root();
        let b = h.create_element("button");
        h.append_child(root, b);
        h.focus(b);
        b
    };
    World {
        host,
        services: OverlayServices::new(),
        trigger,
    }
}

impl World {
    fn controller(&self, config: ModalConfig) -> ModalController<MemoryHost> {
        ModalController::new(
            Rc::clone(&self.host),
            self.services.clone(),
            config,
            LifecycleHooks::new(),
        )
    }

    fn controller_with_hooks(
        &self,
        config: ModalConfig,
        hooks: LifecycleHooks,
    ) -> ModalController<MemoryHost> {
        ModalController::new(Rc::clone(&self.host), self.services.clone(), config, hooks)
    }

    /// A panel with two buttons, for content that is actually focusable.
    fn panel(&self) -> (NodeId, Vec<NodeId>) {
        let mut h = self.host.borrow_mut();
        let panel = h.create_element("div");
        let buttons = (0..2)
            .map(|_| {
                let b = h.create_element("button");
                h.append_child(panel, b);
                b
            })
            .collect();
        (panel, buttons)
    }

    fn root_style(&self, property: &str) -> Option<String> {
        let h = self.host.borrow();
        h.style(h.root(), property)
    }

    fn active(&self) -> Option<NodeId> {
        self.host.borrow().active_element()
    }
}

#[test]
fn default_open_locks_traps_and_escape_restores_everything() {
    let w = world();
    let (panel, buttons) = w.panel();
    let mut modal = w.controller(ModalConfig::default());
    modal.set_content(panel).unwrap();

    block_on(modal.open()).unwrap();
    assert!(modal.is_open());
    assert_eq!(w.root_style("overflow").as_deref(), Some("hidden"));
    assert_eq!(w.active(), Some(buttons[0]));

    let action = block_on(modal.dispatch(&InputEvent::escape())).unwrap();
    assert_eq!(action, Some(ModalAction::EscapePressed));
    assert!(!modal.is_open());
    assert_eq!(w.root_style("overflow"), None);
    assert_eq!(w.active(), Some(w.trigger));
    assert!(w.services.stack.is_empty());
}

#[test]
fn backdrop_click_closes_by_default() {
    let w = world();
    let mut modal = w.controller(ModalConfig::default());
    block_on(modal.open()).unwrap();
    let backdrop = modal.backdrop().unwrap();

    let action = block_on(modal.dispatch(&InputEvent::pointer_down(backdrop))).unwrap();
    assert_eq!(action, Some(ModalAction::BackdropClicked));
    assert!(!modal.is_open());
}

#[test]
fn backdrop_click_can_be_disabled_independently_of_escape() {
    let w = world();
    let mut modal = w.controller(ModalConfig::default().close_on_backdrop_click(false));
    block_on(modal.open()).unwrap();
    let backdrop = modal.backdrop().unwrap();

    assert_eq!(
        block_on(modal.dispatch(&InputEvent::pointer_down(backdrop))).unwrap(),
        None
    );
    assert!(modal.is_open());

    // Escape is governed by its own switch and still works.
    block_on(modal.dispatch(&InputEvent::escape())).unwrap();
    assert!(!modal.is_open());
}

#[test]
fn pointer_down_inside_container_does_not_close() {
    let w = world();
    let mut modal = w.controller(ModalConfig::default());
    block_on(modal.open()).unwrap();
    let container = modal.container().unwrap();

    assert_eq!(
        block_on(modal.dispatch(&InputEvent::pointer_down(container))).unwrap(),
        None
    );
    assert!(modal.is_open());
}

#[test]
fn nested_modals_keep_scroll_locked_until_the_last_close() {
    let w = world();
    let mut a = w.controller(ModalConfig::default());
    let mut b = w.controller(ModalConfig::default());

    block_on(a.open()).unwrap();
    block_on(b.open()).unwrap();
    assert_eq!(w.services.stack.depth(), 2);
    assert_eq!(w.root_style("overflow").as_deref(), Some("hidden"));

    block_on(b.close()).unwrap();
    assert_eq!(w.root_style("overflow").as_deref(), Some("hidden"));

    block_on(a.close()).unwrap();
    assert_eq!(w.root_style("overflow"), None);
}

#[test]
fn escape_reaches_only_the_topmost_modal() {
    let w = world();
    let mut a = w.controller(ModalConfig::default());
    let mut b = w.controller(ModalConfig::default());
    block_on(a.open()).unwrap();
    block_on(b.open()).unwrap();

    // The lower modal declines while covered.
    assert_eq!(block_on(a.dispatch(&InputEvent::escape())).unwrap(), None);
    assert!(a.is_open());

    assert_eq!(
        block_on(b.dispatch(&InputEvent::escape())).unwrap(),
        Some(ModalAction::EscapePressed)
    );
    assert!(!b.is_open());

    // Now the lower one is topmost again.
    assert_eq!(
        block_on(a.dispatch(&InputEvent::escape())).unwrap(),
        Some(ModalAction::EscapePressed)
    );
    assert!(!a.is_open());
}

#[test]
fn scrollbar_width_is_compensated_and_restored() {
    let w = world();
    {
        let mut h = w.host.borrow_mut();
        h.set_viewport_width(1040);
        h.set_content_width(1024);
        let root = h.root();
        h.set_style(root, "padding-right", "5px");
    }

    let mut modal = w.controller(ModalConfig::default());
    block_on(modal.open()).unwrap();
    assert_eq!(w.root_style("padding-right").as_deref(), Some("16px"));

    block_on(modal.close()).unwrap();
    assert_eq!(w.root_style("padding-right").as_deref(), Some("5px"));
}

#[test]
fn rejected_before_open_leaves_no_trace() {
    let w = world();
    let hooks = LifecycleHooks::new().before_open_sync(|| Err(HookError::new("not signed in")));
    let mut modal = w.controller_with_hooks(ModalConfig::default(), hooks);

    let err = block_on(modal.open()).unwrap_err();
    assert!(matches!(err, ModalError::BeforeOpen(_)));
    assert!(!modal.is_open());
    assert!(modal.container().is_none());
    assert_eq!(w.root_style("overflow"), None);
    assert_eq!(w.active(), Some(w.trigger));
    assert!(w.services.stack.is_empty());
}

#[test]
fn rejected_before_close_keeps_the_modal_open() {
    let w = world();
    let hooks = LifecycleHooks::new().before_close_sync(|| Err(HookError::new("unsaved changes")));
    let mut modal = w.controller_with_hooks(ModalConfig::default(), hooks);
    block_on(modal.open()).unwrap();

    let err = block_on(modal.close()).unwrap_err();
    assert!(matches!(err, ModalError::BeforeClose(_)));
    assert!(modal.is_open());
    assert_eq!(w.root_style("overflow").as_deref(), Some("hidden"));
    assert_eq!(w.services.stack.depth(), 1);
}

#[test]
fn rejected_before_close_also_blocks_destroy() {
    let w = world();
    let hooks = LifecycleHooks::new().before_close_sync(|| Err(HookError::new("busy")));
    let mut modal = w.controller_with_hooks(ModalConfig::default(), hooks);
    block_on(modal.open()).unwrap();

    assert!(block_on(modal.destroy()).is_err());
    assert!(!modal.is_destroyed());
    assert!(modal.is_open());
}

#[test]
fn async_gates_run_in_order_with_notifications() {
    let w = world();
    let log: Rc<RefCell<Vec<&'static str>>> = Rc::default();
    let (open_gate, open_note, close_gate, close_note) = (
        Rc::clone(&log),
        Rc::clone(&log),
        Rc::clone(&log),
        Rc::clone(&log),
    );
    let hooks = LifecycleHooks::new()
        .before_open(move || {
            let log = Rc::clone(&open_gate);
            async move {
                log.borrow_mut().push("before_open");
                Ok(())
            }
        })
        .after_open(move || open_note.borrow_mut().push("after_open"))
        .before_close(move || {
            let log = Rc::clone(&close_gate);
            async move {
                log.borrow_mut().push("before_close");
                Ok(())
            }
        })
        .after_close(move || close_note.borrow_mut().push("after_close"));

    let mut modal = w.controller_with_hooks(ModalConfig::default(), hooks);
    block_on(modal.open()).unwrap();
    block_on(modal.close()).unwrap();

    assert_eq!(
        *log.borrow(),
        vec!["before_open", "after_open", "before_close", "after_close"]
    );
}

#[test]
fn toggle_round_trip_restores_focus() {
    let w = world();
    let (panel, _buttons) = w.panel();
    let mut modal = w.controller(ModalConfig::default());
    modal.set_content(panel).unwrap();

    block_on(modal.toggle()).unwrap();
    assert!(modal.is_open());
    block_on(modal.toggle()).unwrap();
    assert!(!modal.is_open());
    assert_eq!(w.active(), Some(w.trigger));
}

#[test]
fn return_focus_overrides_the_recorded_element() {
    let w = world();
    let other = {
        let mut h = w.host.borrow_mut();
        let root = h.root();
        let b = h.create_element("button");
        h.append_child(root, b);
        b
    };

    let mut modal = w.controller(ModalConfig::default().return_focus(other));
    block_on(modal.open()).unwrap();
    block_on(modal.close()).unwrap();
    assert_eq!(w.active(), Some(other));
}

#[test]
fn destroy_full_cycle() {
    let w = world();
    let (panel, _buttons) = w.panel();
    let mut modal = w.controller(ModalConfig::default());
    modal.set_content(panel).unwrap();
    block_on(modal.open()).unwrap();
    let container = modal.container().unwrap();
    let backdrop = modal.backdrop().unwrap();

    block_on(modal.destroy()).unwrap();
    let h = w.host.borrow();
    assert!(!h.is_attached(container));
    assert!(!h.is_attached(backdrop));
    drop(h);
    assert_eq!(w.root_style("overflow"), None);
    assert_eq!(w.active(), Some(w.trigger));
    assert!(w.services.stack.is_empty());

    assert!(matches!(block_on(modal.open()), Err(ModalError::Destroyed)));
}

#[test]
fn services_reset_clears_shared_state_between_scenarios() {
    let w = world();
    let mut modal = w.controller(ModalConfig::default());
    block_on(modal.open()).unwrap();
    assert_eq!(w.services.scroll_lock.lock_count(), 1);

    w.services.reset();
    assert!(w.services.stack.is_empty());
    assert_eq!(w.services.scroll_lock.lock_count(), 0);
}
