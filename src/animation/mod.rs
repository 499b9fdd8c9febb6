//! Cursor motion: the state record and the per-frame integrator.

pub mod motion;
pub mod state;

pub use motion::{FrameOutput, MotionIntegrator};
pub use state::CursorState;
