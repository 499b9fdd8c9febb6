//! The cursor engine and its start/stop lifecycle.
//!
//! [`CursorEngine`] owns one cursor's state and overlay and is driven by two
//! sources: pointer input and animation frames. [`session::start`] wires an
//! engine to a [`Host`](crate::host::Host) and returns the
//! [`CursorHandle`] that stops it.

pub mod session;

pub use session::{start, CursorHandle};

use crate::animation::{CursorState, MotionIntegrator};
use crate::host::{Layout, ProxySurface};
use crate::input::{InteractionTracker, PointerInput, ProxyUpdate};
use crate::options::CursorOptions;

/// One cursor: options, state, integrator, tracker and overlay.
///
/// Pointer input only updates state (plus immediate opacity and hover-size
/// writes); the frame step is the only writer of position and of the
/// velocity-based size.
pub struct CursorEngine<P> {
    options: CursorOptions,
    state: CursorState,
    motion: MotionIntegrator,
    tracker: InteractionTracker,
    proxy: P,
}

impl<P: ProxySurface> CursorEngine<P> {
    /// Create an engine around an already mounted overlay, starting the
    /// frame clock at `now`.
    #[must_use]
    pub fn new(options: CursorOptions, proxy: P, now: f64) -> Self {
        Self {
            state: CursorState::new(options.base_size, now),
            motion: MotionIntegrator::new(&options),
            tracker: InteractionTracker::new(&options),
            options,
            proxy,
        }
    }

    /// Apply one pointer event received on `target`.
    pub fn handle_input<L: Layout>(
        &mut self,
        layout: &L,
        target: &L::Element,
        input: PointerInput<L::Element>,
    ) {
        match self.tracker.handle(&mut self.state, layout, target, input) {
            Some(ProxyUpdate::Size(size)) => self.proxy.set_size(size),
            Some(ProxyUpdate::Opacity(opacity)) => {
                self.proxy.set_opacity(opacity);
            }
            None => {}
        }
    }

    /// Run one animation frame at host timestamp `now`.
    pub fn frame(&mut self, now: f64) {
        let output = self.motion.step(&mut self.state, now);
        if let Some(size) = output.size {
            self.proxy.set_size(size);
        }
        self.proxy.set_translation(output.position);
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &CursorState {
        &self.state
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &CursorOptions {
        &self.options
    }

    /// The overlay.
    #[must_use]
    pub fn proxy(&self) -> &P {
        &self.proxy
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use glam::Vec2;

    use super::*;
    use crate::host::Rect;

    #[derive(Debug, Clone, PartialEq)]
    enum Write {
        Size(f32),
        Translate(Vec2),
        Opacity(f32),
    }

    #[derive(Default)]
    struct RecordingProxy {
        writes: RefCell<Vec<Write>>,
    }

    impl ProxySurface for RecordingProxy {
        fn set_size(&self, size: f32) {
            self.writes.borrow_mut().push(Write::Size(size));
        }

        fn set_translation(&self, position: Vec2) {
            self.writes.borrow_mut().push(Write::Translate(position));
        }

        fn set_opacity(&self, opacity: f32) {
            self.writes.borrow_mut().push(Write::Opacity(opacity));
        }
    }

    struct OriginLayout;

    impl Layout for OriginLayout {
        type Element = &'static str;

        fn bounding_box(&self, _element: &Self::Element) -> Rect {
            Rect::default()
        }

        fn tag_name(&self, element: &Self::Element) -> String {
            (*element).to_owned()
        }

        fn computed_cursor(&self, _element: &Self::Element) -> Option<String> {
            None
        }
    }

    fn engine() -> CursorEngine<RecordingProxy> {
        CursorEngine::new(
            CursorOptions::default(),
            RecordingProxy::default(),
            0.0,
        )
    }

    fn take_writes(engine: &CursorEngine<RecordingProxy>) -> Vec<Write> {
        engine.proxy().writes.borrow_mut().drain(..).collect()
    }

    #[test]
    fn move_writes_nothing_until_frame() {
        let mut engine = engine();
        engine.handle_input(
            &OriginLayout,
            &"div",
            PointerInput::Move {
                client: Vec2::new(100.0, 50.0),
            },
        );
        assert!(take_writes(&engine).is_empty());

        engine.frame(16.0);
        let writes = take_writes(&engine);
        assert_eq!(writes.len(), 2);
        assert!(matches!(writes[0], Write::Size(s) if s == 40.0));
        assert!(matches!(
            writes[1],
            Write::Translate(pos) if (pos - Vec2::new(9.0, 4.0)).length() < 1e-4
        ));
    }

    #[test]
    fn hover_size_holds_while_moving_fast() {
        let mut engine = engine();
        engine.handle_input(&OriginLayout, &"div", PointerInput::Over("button"));
        assert_eq!(take_writes(&engine), vec![Write::Size(35.0)]);

        for frame in 1..20 {
            engine.handle_input(
                &OriginLayout,
                &"div",
                PointerInput::Move {
                    client: Vec2::splat(frame as f32 * 80.0),
                },
            );
            engine.frame(f64::from(frame) * 16.0);
        }
        let writes = take_writes(&engine);
        assert!(writes.iter().all(|w| matches!(w, Write::Translate(_))));
        assert_eq!(engine.state().size(), 35.0);

        engine.handle_input(&OriginLayout, &"div", PointerInput::Out("button"));
        assert!(!engine.state().is_hovering());
        assert!(take_writes(&engine).is_empty());

        engine.frame(400.0);
        assert!(matches!(take_writes(&engine)[0], Write::Size(_)));
    }

    #[test]
    fn enter_leave_write_opacity() {
        let mut engine = engine();
        engine.handle_input(&OriginLayout, &"div", PointerInput::Enter);
        engine.handle_input(&OriginLayout, &"div", PointerInput::Leave);
        assert_eq!(
            take_writes(&engine),
            vec![Write::Opacity(1.0), Write::Opacity(0.0)]
        );
    }
}
