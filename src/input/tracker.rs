//! Pointer handlers: turn [`PointerInput`] into state changes and the
//! overlay write (if any) they require.

use super::event::PointerInput;
use super::interactive::classify;
use crate::animation::CursorState;
use crate::host::Layout;
use crate::options::CursorOptions;

/// An overlay write requested by a pointer handler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProxyUpdate {
    /// Set width and height.
    Size(f32),
    /// Set opacity.
    Opacity(f32),
}

/// Applies pointer events to a [`CursorState`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionTracker {
    /// Offset that centres the overlay on the pointer.
    half_size: f32,
    hover_size: f32,
}

impl InteractionTracker {
    /// Build from validated options.
    #[must_use]
    pub fn new(options: &CursorOptions) -> Self {
        Self {
            half_size: options.base_size / 2.0,
            hover_size: options.hover_size,
        }
    }

    /// Handle one event on `target`.
    ///
    /// Move only updates the target position; the frame step picks it up.
    /// Over/out classify the originating element each time.
    pub fn handle<L: Layout>(
        &self,
        state: &mut CursorState,
        layout: &L,
        target: &L::Element,
        input: PointerInput<L::Element>,
    ) -> Option<ProxyUpdate> {
        match input {
            PointerInput::Move { client } => {
                let origin = layout.bounding_box(target).origin;
                state.target = client - origin - self.half_size;
                None
            }
            PointerInput::Enter => {
                state.visible = true;
                Some(ProxyUpdate::Opacity(1.0))
            }
            PointerInput::Leave => {
                state.visible = false;
                Some(ProxyUpdate::Opacity(0.0))
            }
            PointerInput::Over(element) => {
                if !classify(layout, &element) {
                    return None;
                }
                state.hovering = true;
                state.size = self.hover_size;
                Some(ProxyUpdate::Size(self.hover_size))
            }
            PointerInput::Out(element) => {
                if classify(layout, &element) {
                    state.hovering = false;
                }
                None
            }
        }
    }
}
