//! Input handling: pointer event types, interactive-element classification,
//! and the tracker that applies events to cursor state.

/// Host-normalised pointer events.
pub mod event;
/// Tag allow-list and computed-cursor classification.
pub mod interactive;
/// Pointer handlers.
pub mod tracker;

pub use event::{PointerInput, PointerKind};
pub use interactive::{classify, is_interactive};
pub use tracker::{InteractionTracker, ProxyUpdate};
