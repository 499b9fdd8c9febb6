//! Shared utilities: CSS value helpers and frame timestamp bookkeeping.

pub mod css;
pub mod frame_timing;
