//! Per-frame motion step: exponential smoothing toward the pointer and
//! velocity-driven sizing.

use glam::Vec2;

use super::state::CursorState;
use crate::options::CursorOptions;

/// Visual output of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    /// New diameter, or `None` while hovering (hover size is held).
    pub size: Option<f32>,
    /// New overlay translation.
    pub position: Vec2,
}

/// Advances a [`CursorState`] once per animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionIntegrator {
    base_size: f32,
    max_size: f32,
    follow_speed: f32,
    velocity_scale: f32,
}

impl MotionIntegrator {
    /// Build from validated options.
    #[must_use]
    pub fn new(options: &CursorOptions) -> Self {
        Self {
            base_size: options.base_size,
            max_size: options.max_velocity_size,
            follow_speed: options.follow_speed,
            velocity_scale: options.velocity_scale,
        }
    }

    /// Diameter for a pointer velocity in px/ms, clamped to
    /// `[base_size, max_velocity_size]`.
    #[must_use]
    pub fn velocity_size(&self, velocity: f32) -> f32 {
        (self.base_size + velocity.max(0.0) * self.velocity_scale)
            .min(self.max_size)
            .max(self.base_size)
    }

    /// Run one frame at host timestamp `now` (milliseconds).
    pub fn step(&self, state: &mut CursorState, now: f64) -> FrameOutput {
        let velocity = match state.timing.advance(now) {
            Some(elapsed) => {
                (f64::from(state.target.distance(state.previous)) / elapsed) as f32
            }
            None => {
                log::trace!("zero-duration frame at {now}, velocity skipped");
                0.0
            }
        };

        let size = if state.hovering {
            None
        } else {
            let size = self.velocity_size(velocity);
            state.size = size;
            Some(size)
        };

        state.current = Vec2::new(
            approach(state.current.x, state.target.x, self.follow_speed),
            approach(state.current.y, state.target.y, self.follow_speed),
        );
        state.previous = state.target;

        FrameOutput {
            size,
            position: state.current,
        }
    }
}

/// Move `current` by `fraction` of the way to `target`, never past it.
fn approach(current: f32, target: f32, fraction: f32) -> f32 {
    let next = current + (target - current) * fraction;
    next.clamp(current.min(target), current.max(target))
}
