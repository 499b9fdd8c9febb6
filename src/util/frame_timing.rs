//! Frame timestamp bookkeeping.

/// Timestamp bookkeeping for the per-frame loop.
///
/// Timestamps are host milliseconds (`performance.now()` in the browser,
/// synthetic values in the headless host). Only strictly positive deltas
/// are reported; a repeated or backwards timestamp leaves the previous
/// frame time in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTiming {
    /// Timestamp of the last frame that advanced the clock.
    last_frame: f64,
}

impl FrameTiming {
    /// Start timing from the given timestamp.
    #[must_use]
    pub fn new(start: f64) -> Self {
        Self { last_frame: start }
    }

    /// Record a frame at `now`, returning the elapsed milliseconds.
    ///
    /// Returns `None` for a zero-duration or backwards frame.
    pub fn advance(&mut self, now: f64) -> Option<f64> {
        let elapsed = now - self.last_frame;
        if elapsed > 0.0 {
            self.last_frame = now;
            Some(elapsed)
        } else {
            None
        }
    }

    /// Timestamp of the last accepted frame.
    #[must_use]
    pub fn last_frame(&self) -> f64 {
        self.last_frame
    }
}
