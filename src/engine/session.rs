//! Start/stop lifecycle of a cursor on a host container.
//!
//! A session owns the engine, the listener subscription and the pending
//! frame. Listener sinks and frame callbacks only hold weak references and
//! check the `active` flag, so anything already queued when [`stop`] runs
//! becomes a no-op.
//!
//! [`stop`]: CursorHandle::stop

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use super::CursorEngine;
use crate::animation::CursorState;
use crate::error::CursorError;
use crate::host::{Host, PointerSink};
use crate::input::PointerInput;
use crate::options::CursorOptions;

struct Session<H: Host> {
    host: H,
    target: H::Element,
    engine: RefCell<CursorEngine<H::Proxy>>,
    subscription: RefCell<Option<H::Subscription>>,
    frame: RefCell<Option<H::Frame>>,
    active: Cell<bool>,
}

impl<H: Host> Session<H> {
    fn dispatch(&self, input: PointerInput<H::Element>) {
        if !self.active.get() {
            return;
        }
        self.engine
            .borrow_mut()
            .handle_input(&self.host, &self.target, input);
    }

    fn schedule(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        let frame = self.host.request_frame(Box::new(move |now| {
            if let Some(session) = weak.upgrade() {
                session.on_frame(now);
            }
        }));
        *self.frame.borrow_mut() = Some(frame);
    }

    fn on_frame(self: &Rc<Self>, now: f64) {
        if !self.active.get() {
            return;
        }
        self.engine.borrow_mut().frame(now);
        self.schedule();
    }

    fn shutdown(&self) {
        if !self.active.replace(false) {
            return;
        }
        if let Some(frame) = self.frame.borrow_mut().take() {
            self.host.cancel_frame(frame);
        }
        if let Some(subscription) = self.subscription.borrow_mut().take() {
            self.host.unsubscribe(subscription);
        }
        let removed = self
            .host
            .unmount_proxy(&self.target, self.engine.borrow().proxy());
        log::debug!("cursor stopped (overlay removed: {removed})");
    }
}

/// Handle to a running cursor. Stops the cursor when dropped.
pub struct CursorHandle<H: Host> {
    session: Rc<Session<H>>,
}

impl<H: Host> CursorHandle<H> {
    /// Cancel the frame loop, remove the listeners and remove the overlay.
    ///
    /// Safe to call any number of times, and after the overlay or the
    /// container was removed by someone else.
    pub fn stop(&self) {
        self.session.shutdown();
    }

    /// Whether [`stop`](Self::stop) has not been called yet.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.active.get()
    }

    /// Snapshot of the cursor state.
    #[must_use]
    pub fn state(&self) -> CursorState {
        self.session.engine.borrow().state().clone()
    }

    /// Options the cursor was started with.
    #[must_use]
    pub fn options(&self) -> CursorOptions {
        self.session.engine.borrow().options().clone()
    }

    /// The container the cursor is bound to.
    #[must_use]
    pub fn target(&self) -> &H::Element {
        &self.session.target
    }
}

impl<H: Host> Drop for CursorHandle<H> {
    fn drop(&mut self) {
        self.session.shutdown();
    }
}

/// Start a cursor on `target`.
///
/// Options and target are checked before anything is created; on error the
/// container is left untouched. On success the overlay is appended as the
/// last child of `target`, the five pointer listeners are registered and
/// the first frame is requested.
pub fn start<H: Host>(
    host: H,
    target: H::Element,
    options: CursorOptions,
) -> Result<CursorHandle<H>, CursorError> {
    options.validate()?;
    if !host.is_valid_target(&target) {
        log::warn!("cursor target rejected: not an attached element");
        return Err(CursorError::InvalidTarget(
            "target must be an element attached to the document".to_owned(),
        ));
    }

    let proxy = host.mount_proxy(&target, &options.proxy_declarations())?;
    let engine = CursorEngine::new(options, proxy, host.now());
    log::debug!("cursor started with {:?}", engine.options());

    let session = Rc::new(Session {
        host,
        target,
        engine: RefCell::new(engine),
        subscription: RefCell::new(None),
        frame: RefCell::new(None),
        active: Cell::new(true),
    });

    let weak: Weak<Session<H>> = Rc::downgrade(&session);
    let sink: PointerSink<H::Element> = Rc::new(move |input| {
        if let Some(session) = weak.upgrade() {
            session.dispatch(input);
        }
    });
    let subscription = match session.host.subscribe(&session.target, sink) {
        Ok(subscription) => subscription,
        Err(e) => {
            session.shutdown();
            return Err(e);
        }
    };
    *session.subscription.borrow_mut() = Some(subscription);
    session.schedule();

    Ok(CursorHandle { session })
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::host::headless::{HeadlessEvent, HeadlessHost, NodeId};
    use crate::host::Rect;
    use crate::input::PointerKind;

    fn container(host: &HeadlessHost, origin: Vec2) -> NodeId {
        let node = host.create_element("div");
        host.append_child(host.body(), node);
        host.set_bounding_box(node, Rect::new(origin, Vec2::new(400.0, 300.0)));
        node
    }

    fn scenario_options() -> CursorOptions {
        CursorOptions {
            base_size: 20.0,
            follow_speed: 0.1,
            hover_size: 35.0,
            max_velocity_size: 40.0,
            ..CursorOptions::default()
        }
    }

    #[test]
    fn start_mounts_proxy_and_listeners() {
        let host = HeadlessHost::new();
        let c = container(&host, Vec2::ZERO);
        let existing = host.create_element("p");
        host.append_child(c, existing);

        let handle = start(host.clone(), c, scenario_options()).unwrap();
        assert!(handle.is_active());
        let proxy = host.last_child(c).unwrap();
        assert_ne!(proxy, existing);
        assert_eq!(host.tag(proxy).as_deref(), Some("div"));
        assert_eq!(host.style(proxy, "width").as_deref(), Some("20px"));
        assert_eq!(host.style(proxy, "opacity").as_deref(), Some("0"));
        assert_eq!(host.listener_count(c), 5);
        assert_eq!(host.pending_frames(), 1);
    }

    #[test]
    fn detached_target_is_rejected_without_side_effects() {
        let host = HeadlessHost::new();
        let orphan = host.create_element("div");
        let result = start(host.clone(), orphan, CursorOptions::default());
        assert!(matches!(result, Err(CursorError::InvalidTarget(_))));
        assert!(host.children(orphan).is_empty());
        assert_eq!(host.listener_count(orphan), 0);
        assert_eq!(host.pending_frames(), 0);
    }

    #[test]
    fn unknown_target_is_rejected() {
        let host = HeadlessHost::new();
        // Node ids from another document do not exist in this one.
        let foreign = HeadlessHost::new().create_element("div");
        let result = start(host, foreign, CursorOptions::default());
        assert!(matches!(result, Err(CursorError::InvalidTarget(_))));
    }

    #[test]
    fn invalid_options_fail_before_mounting() {
        let host = HeadlessHost::new();
        let c = container(&host, Vec2::ZERO);
        let opts = CursorOptions {
            follow_speed: 0.0,
            ..CursorOptions::default()
        };
        let result = start(host.clone(), c, opts);
        assert!(matches!(result, Err(CursorError::InvalidOptions(_))));
        assert!(host.children(c).is_empty());
    }

    #[test]
    fn follows_pointer_and_converges() {
        let host = HeadlessHost::new();
        let c = container(&host, Vec2::new(30.0, 70.0));
        let handle = start(host.clone(), c, scenario_options()).unwrap();
        let proxy = host.last_child(c).unwrap();

        host.dispatch(c, HeadlessEvent::Move(Vec2::new(130.0, 120.0)));
        assert_eq!(handle.state().target(), Vec2::new(90.0, 40.0));
        assert_eq!(handle.state().current(), Vec2::ZERO);

        assert_eq!(host.run_frame(16.0), 1);
        let current = handle.state().current();
        assert!((current - Vec2::new(9.0, 4.0)).length() < 1e-4);
        assert_eq!(
            host.style(proxy, "transform").as_deref(),
            Some(format!("translate({}px, {}px)", current.x, current.y).as_str())
        );

        for frame in 2..200 {
            let _ = host.run_frame(f64::from(frame) * 16.0);
        }
        let current = handle.state().current();
        assert!((current - Vec2::new(90.0, 40.0)).length() < 1.0);
        // Pointer is still: size back at rest.
        assert_eq!(host.style(proxy, "width").as_deref(), Some("20px"));
    }

    #[test]
    fn enter_and_leave_toggle_visibility() {
        let host = HeadlessHost::new();
        let c = container(&host, Vec2::ZERO);
        let handle = start(host.clone(), c, scenario_options()).unwrap();
        let proxy = host.last_child(c).unwrap();

        host.dispatch(c, HeadlessEvent::Enter);
        assert_eq!(host.style(proxy, "opacity").as_deref(), Some("1"));
        assert!(handle.state().is_visible());

        host.dispatch(c, HeadlessEvent::Leave);
        assert_eq!(host.style(proxy, "opacity").as_deref(), Some("0"));
    }

    #[test]
    fn enter_on_child_does_not_reach_container() {
        let host = HeadlessHost::new();
        let c = container(&host, Vec2::ZERO);
        let child = host.create_element("span");
        host.append_child(c, child);
        let handle = start(host.clone(), c, scenario_options()).unwrap();

        host.dispatch(child, HeadlessEvent::Enter);
        assert!(!handle.state().is_visible());
    }

    #[test]
    fn hover_over_button_pins_size_until_out() {
        let host = HeadlessHost::new();
        let c = container(&host, Vec2::ZERO);
        let button = host.create_element("button");
        host.append_child(c, button);
        let handle = start(host.clone(), c, scenario_options()).unwrap();
        let proxy = host.last_child(c).unwrap();

        host.dispatch(button, HeadlessEvent::Over);
        assert!(handle.state().is_hovering());
        assert_eq!(host.style(proxy, "width").as_deref(), Some("35px"));
        assert_eq!(host.style(proxy, "height").as_deref(), Some("35px"));

        // Fast movement does not resize while hovering.
        for frame in 1..10 {
            host.dispatch(
                button,
                HeadlessEvent::Move(Vec2::splat(frame as f32 * 120.0)),
            );
            let _ = host.run_frame(f64::from(frame) * 16.0);
            assert_eq!(host.style(proxy, "width").as_deref(), Some("35px"));
        }

        host.dispatch(button, HeadlessEvent::Out);
        assert!(!handle.state().is_hovering());
        assert_eq!(host.style(proxy, "width").as_deref(), Some("35px"));

        let _ = host.run_frame(1000.0);
        assert_ne!(host.style(proxy, "width").as_deref(), Some("35px"));
    }

    #[test]
    fn pointer_cursor_style_counts_as_interactive() {
        let host = HeadlessHost::new();
        let c = container(&host, Vec2::ZERO);
        let card = host.create_element("div");
        host.append_child(c, card);
        host.set_cursor(card, "pointer");
        let handle = start(host.clone(), c, scenario_options()).unwrap();

        host.dispatch(card, HeadlessEvent::Over);
        assert!(handle.state().is_hovering());
    }

    #[test]
    fn stop_is_idempotent_and_cleans_up() {
        let host = HeadlessHost::new();
        let c = container(&host, Vec2::ZERO);
        let handle = start(host.clone(), c, scenario_options()).unwrap();

        handle.stop();
        handle.stop();
        assert!(!handle.is_active());
        assert!(host.children(c).is_empty());
        assert_eq!(host.listener_count(c), 0);
        assert_eq!(host.pending_frames(), 0);
        assert_eq!(host.removal_count(), 1);

        let before = handle.state();
        host.dispatch(c, HeadlessEvent::Move(Vec2::new(100.0, 50.0)));
        assert_eq!(host.run_frame(16.0), 0);
        assert_eq!(handle.state(), before);
    }

    #[test]
    fn stop_tolerates_externally_removed_overlay() {
        let host = HeadlessHost::new();
        let c = container(&host, Vec2::ZERO);
        let handle = start(host.clone(), c, scenario_options()).unwrap();
        let proxy = host.last_child(c).unwrap();

        host.detach(proxy);
        handle.stop();
        handle.stop();
        assert_eq!(host.removal_count(), 0);
        assert!(host.children(c).is_empty());
        assert_eq!(host.listener_count(c), 0);
        assert!(!handle.is_active());
    }

    #[test]
    fn stop_tolerates_detached_container() {
        let host = HeadlessHost::new();
        let c = container(&host, Vec2::ZERO);
        let handle = start(host.clone(), c, scenario_options()).unwrap();

        host.detach(c);
        handle.stop();
        assert!(host.children(c).is_empty());
    }

    #[test]
    fn drop_stops_the_cursor() {
        let host = HeadlessHost::new();
        let c = container(&host, Vec2::ZERO);
        let handle = start(host.clone(), c, scenario_options()).unwrap();
        drop(handle);
        assert!(host.children(c).is_empty());
        assert_eq!(host.listener_count(c), 0);
        assert_eq!(host.pending_frames(), 0);
    }

    #[test]
    fn event_already_dispatching_when_stopped_is_ignored() {
        let host = HeadlessHost::new();
        let c = container(&host, Vec2::ZERO);
        let slot: Rc<RefCell<Option<CursorHandle<HeadlessHost>>>> =
            Rc::default();

        // Registered ahead of the cursor's own listeners, so it stops the
        // cursor while the same move event is still being delivered.
        let stopper = Rc::clone(&slot);
        host.add_listener(c, PointerKind::Move, move |_| {
            if let Some(handle) = stopper.borrow().as_ref() {
                handle.stop();
            }
        });
        *slot.borrow_mut() =
            Some(start(host.clone(), c, scenario_options()).unwrap());

        host.dispatch(c, HeadlessEvent::Move(Vec2::new(100.0, 50.0)));
        let handle = slot.borrow_mut().take().unwrap();
        assert!(!handle.is_active());
        assert_eq!(handle.state().target(), Vec2::ZERO);
        assert_eq!(host.listener_count(c), 1);
    }

    #[test]
    fn frame_already_queued_when_stopped_is_ignored() {
        let host = HeadlessHost::new();
        let c = container(&host, Vec2::ZERO);
        let slot: Rc<RefCell<Option<CursorHandle<HeadlessHost>>>> =
            Rc::default();

        // Queued ahead of the cursor's first frame: stops the cursor while
        // its frame is already part of the batch being run.
        let stopper = Rc::clone(&slot);
        host.queue_frame(move |_| {
            if let Some(handle) = stopper.borrow().as_ref() {
                handle.stop();
            }
        });
        *slot.borrow_mut() =
            Some(start(host.clone(), c, scenario_options()).unwrap());
        host.dispatch(c, HeadlessEvent::Move(Vec2::new(100.0, 50.0)));

        assert_eq!(host.run_frame(16.0), 2);
        let handle = slot.borrow_mut().take().unwrap();
        assert!(!handle.is_active());
        assert_eq!(handle.state().current(), Vec2::ZERO);
        assert_eq!(host.pending_frames(), 0);
    }

    #[test]
    fn two_cursors_keep_independent_state() {
        let host = HeadlessHost::new();
        let left = container(&host, Vec2::ZERO);
        let right = container(&host, Vec2::new(500.0, 0.0));
        let a = start(host.clone(), left, scenario_options()).unwrap();
        let b = start(
            host.clone(),
            right,
            CursorOptions {
                hover_size: 60.0,
                ..scenario_options()
            },
        )
        .unwrap();
        let link = host.create_element("a");
        host.append_child(right, link);

        host.dispatch(left, HeadlessEvent::Move(Vec2::new(50.0, 50.0)));
        host.dispatch(link, HeadlessEvent::Over);
        host.dispatch(right, HeadlessEvent::Move(Vec2::new(910.0, 210.0)));
        assert_eq!(host.run_frame(16.0), 2);

        assert_eq!(a.state().target(), Vec2::new(40.0, 40.0));
        assert_eq!(b.state().target(), Vec2::new(400.0, 200.0));
        assert!(!a.state().is_hovering());
        assert!(b.state().is_hovering());
        assert_eq!(b.state().size(), 60.0);
        assert_ne!(a.state().size(), 60.0);

        a.stop();
        assert_eq!(host.listener_count(right), 5);
        assert_eq!(host.run_frame(32.0), 1);
        assert!(b.is_active());
    }
}
