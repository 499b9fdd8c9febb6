//! Per-cursor state record updated by the tracker and the integrator.

use glam::Vec2;

use crate::util::frame_timing::FrameTiming;

/// Mutable state of one cursor overlay.
///
/// Owned by exactly one [`CursorEngine`](crate::engine::CursorEngine).
/// The target only moves in response to pointer-move input; the smoothed
/// position only moves inside a frame step.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorState {
    /// Desired position in container-local pixels.
    pub(crate) target: Vec2,
    /// Smoothed position written to the overlay transform.
    pub(crate) current: Vec2,
    /// Target at the previous frame, for velocity.
    pub(crate) previous: Vec2,
    /// Frame clock for velocity.
    pub(crate) timing: FrameTiming,
    /// Pointer is over an interactive element.
    pub(crate) hovering: bool,
    /// Pointer is inside the container.
    pub(crate) visible: bool,
    /// Diameter last written to the overlay.
    pub(crate) size: f32,
}

impl CursorState {
    /// Fresh state at the container origin, started at `now`.
    #[must_use]
    pub fn new(base_size: f32, now: f64) -> Self {
        Self {
            target: Vec2::ZERO,
            current: Vec2::ZERO,
            previous: Vec2::ZERO,
            timing: FrameTiming::new(now),
            hovering: false,
            visible: false,
            size: base_size,
        }
    }

    /// Latest desired position.
    #[must_use]
    pub fn target(&self) -> Vec2 {
        self.target
    }

    /// Smoothed position.
    #[must_use]
    pub fn current(&self) -> Vec2 {
        self.current
    }

    /// Target as of the previous frame.
    #[must_use]
    pub fn previous(&self) -> Vec2 {
        self.previous
    }

    /// Timestamp of the previous frame (or of start).
    #[must_use]
    pub fn previous_timestamp(&self) -> f64 {
        self.timing.last_frame()
    }

    /// Whether an interactive element is hovered.
    #[must_use]
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Whether the overlay is shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Diameter currently displayed.
    #[must_use]
    pub fn size(&self) -> f32 {
        self.size
    }
}
