//! Browser host over web-sys.
//!
//! Listeners are `gloo` [`EventListener`]s and frames are `gloo`
//! [`AnimationFrame`]s; dropping either unregisters it, which is all
//! unsubscribe and cancel need to do.

use std::rc::Rc;

use gloo::events::EventListener;
use gloo::render::{request_animation_frame, AnimationFrame};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Node, PointerEvent, Window};

use super::{FrameCallback, Host, Layout, PointerSink, ProxySurface, Rect};
use crate::error::CursorError;
use crate::input::{PointerInput, PointerKind};
use crate::util::css;

/// Host backed by the page's `window` and `document`.
#[derive(Clone)]
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    /// Bind to the global `window`.
    pub fn new() -> Result<Self, CursorError> {
        let window = web_sys::window()
            .ok_or_else(|| CursorError::Host("no global window".to_owned()))?;
        let document = window
            .document()
            .ok_or_else(|| CursorError::Host("window has no document".to_owned()))?;
        Ok(Self { window, document })
    }
}

impl Layout for WebHost {
    type Element = Element;

    fn bounding_box(&self, element: &Element) -> Rect {
        let rect = element.get_bounding_client_rect();
        Rect::new(
            Vec2::new(rect.left() as f32, rect.top() as f32),
            Vec2::new(rect.width() as f32, rect.height() as f32),
        )
    }

    fn tag_name(&self, element: &Element) -> String {
        element.tag_name()
    }

    fn computed_cursor(&self, element: &Element) -> Option<String> {
        self.window
            .get_computed_style(element)
            .ok()
            .flatten()
            .and_then(|style| style.get_property_value("cursor").ok())
    }
}

/// The overlay `<div>`.
pub struct WebProxy {
    element: HtmlElement,
}

impl WebProxy {
    fn set(&self, property: &str, value: &str) {
        let _ = self.element.style().set_property(property, value);
    }
}

impl ProxySurface for WebProxy {
    fn set_size(&self, size: f32) {
        let value = css::px(size);
        self.set("width", &value);
        self.set("height", &value);
    }

    fn set_translation(&self, position: Vec2) {
        self.set("transform", &css::translate(position));
    }

    fn set_opacity(&self, opacity: f32) {
        self.set("opacity", &css::opacity(opacity));
    }
}

fn listen(
    target: &Element,
    kind: PointerKind,
    sink: PointerSink<Element>,
) -> EventListener {
    EventListener::new(target, kind.event_type(), move |event| {
        let input = match kind {
            PointerKind::Move => {
                let Some(event) = event.dyn_ref::<PointerEvent>() else {
                    return;
                };
                PointerInput::Move {
                    client: Vec2::new(
                        event.client_x() as f32,
                        event.client_y() as f32,
                    ),
                }
            }
            PointerKind::Enter => PointerInput::Enter,
            PointerKind::Leave => PointerInput::Leave,
            PointerKind::Over | PointerKind::Out => {
                let Some(origin) = event
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                else {
                    return;
                };
                if kind == PointerKind::Over {
                    PointerInput::Over(origin)
                } else {
                    PointerInput::Out(origin)
                }
            }
        };
        sink(input);
    })
}

impl Host for WebHost {
    type Proxy = WebProxy;
    type Subscription = Vec<EventListener>;
    type Frame = AnimationFrame;

    fn now(&self) -> f64 {
        self.window.performance().map_or(0.0, |p| p.now())
    }

    fn is_valid_target(&self, target: &Element) -> bool {
        target.is_connected() && target.dyn_ref::<HtmlElement>().is_some()
    }

    fn mount_proxy(
        &self,
        target: &Element,
        declarations: &[(&'static str, String)],
    ) -> Result<WebProxy, CursorError> {
        let element = self
            .document
            .create_element("div")
            .map_err(|e| CursorError::Host(format!("createElement: {e:?}")))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| CursorError::Host("div is not an HtmlElement".to_owned()))?;
        let style = element.style();
        for (property, value) in declarations {
            style
                .set_property(property, value)
                .map_err(|e| CursorError::Host(format!("{property}: {e:?}")))?;
        }
        let _ = target
            .append_child(&element)
            .map_err(|e| CursorError::Host(format!("appendChild: {e:?}")))?;
        Ok(WebProxy { element })
    }

    fn unmount_proxy(&self, target: &Element, proxy: &WebProxy) -> bool {
        let node: &Node = proxy.element.as_ref();
        target.contains(Some(node)) && target.remove_child(node).is_ok()
    }

    fn subscribe(
        &self,
        target: &Element,
        sink: PointerSink<Element>,
    ) -> Result<Vec<EventListener>, CursorError> {
        Ok(PointerKind::ALL
            .into_iter()
            .map(|kind| listen(target, kind, Rc::clone(&sink)))
            .collect())
    }

    fn unsubscribe(&self, subscription: Vec<EventListener>) {
        drop(subscription);
    }

    fn request_frame(&self, callback: FrameCallback) -> AnimationFrame {
        request_animation_frame(callback)
    }

    fn cancel_frame(&self, frame: AnimationFrame) {
        drop(frame);
    }
}
