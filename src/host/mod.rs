//! Host environment capabilities.
//!
//! The cursor never touches a DOM global directly. Everything it needs from
//! its environment (element geometry and style queries, the overlay element,
//! listener registration and the per-frame scheduler) goes through the traits
//! here, so the same engine runs in the browser ([`web`], behind the `web`
//! feature) and in the deterministic [`headless`] host used by tests.

pub mod headless;
#[cfg(feature = "web")]
pub mod web;

use std::rc::Rc;

use glam::Vec2;

use crate::error::CursorError;
use crate::input::PointerInput;

/// Axis-aligned box in viewport (client) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Vec2,
    /// Width and height.
    pub size: Vec2,
}

impl Rect {
    /// Create a rect from its top-left corner and size.
    #[must_use]
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }
}

/// Callback run on the next animation frame with the frame timestamp (ms).
pub type FrameCallback = Box<dyn FnOnce(f64)>;

/// Receiver for normalised pointer events on a container.
pub type PointerSink<E> = Rc<dyn Fn(PointerInput<E>)>;

/// Geometry and style queries.
pub trait Layout {
    /// Element handle.
    type Element;

    /// Bounding box of an element in client coordinates.
    fn bounding_box(&self, element: &Self::Element) -> Rect;

    /// Tag name as reported by the host (case is not normalised).
    fn tag_name(&self, element: &Self::Element) -> String;

    /// Computed `cursor` style, if the host can resolve one.
    fn computed_cursor(&self, element: &Self::Element) -> Option<String>;
}

/// The overlay element. Writes never fail from the caller's point of view.
pub trait ProxySurface {
    /// Set width and height to `size` pixels.
    fn set_size(&self, size: f32);

    /// Translate to `position` (container-local pixels).
    fn set_translation(&self, position: Vec2);

    /// Set opacity in `[0, 1]`.
    fn set_opacity(&self, opacity: f32);
}

/// Everything a running cursor needs from its environment.
pub trait Host: Layout + 'static {
    /// Mounted overlay element.
    type Proxy: ProxySurface;
    /// Registration of the pointer listeners on one container.
    type Subscription;
    /// Pending frame request.
    type Frame;

    /// Current high-resolution timestamp in milliseconds.
    fn now(&self) -> f64;

    /// Whether `target` exists, is an element, and is attached.
    fn is_valid_target(&self, target: &Self::Element) -> bool;

    /// Create the overlay with the given inline declarations and append it
    /// as the last child of `target`.
    fn mount_proxy(
        &self,
        target: &Self::Element,
        declarations: &[(&'static str, String)],
    ) -> Result<Self::Proxy, CursorError>;

    /// Remove the overlay from `target` if it is still a child of it.
    ///
    /// Returns whether a removal happened.
    fn unmount_proxy(&self, target: &Self::Element, proxy: &Self::Proxy) -> bool;

    /// Register the move/enter/leave/over/out listeners on `target`.
    fn subscribe(
        &self,
        target: &Self::Element,
        sink: PointerSink<Self::Element>,
    ) -> Result<Self::Subscription, CursorError>;

    /// Remove every listener of a subscription.
    fn unsubscribe(&self, subscription: Self::Subscription);

    /// Schedule `callback` for the next animation frame.
    fn request_frame(&self, callback: FrameCallback) -> Self::Frame;

    /// Cancel a pending frame; a no-op if it already ran.
    fn cancel_frame(&self, frame: Self::Frame);
}
