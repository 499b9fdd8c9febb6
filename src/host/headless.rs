//! In-memory host with a tiny element tree and a manual frame queue.
//!
//! Nothing runs on its own: pointer events are delivered with
//! [`HeadlessHost::dispatch`] and frames with [`HeadlessHost::run_frame`],
//! each taking the synthetic timestamp to report. The host is a cheap
//! `Rc` handle; clones share one document.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use glam::Vec2;

use super::{FrameCallback, Host, Layout, PointerSink, ProxySurface, Rect};
use crate::error::CursorError;
use crate::input::{PointerInput, PointerKind};
use crate::util::css;

/// Element handle within one [`HeadlessHost`] document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

const BODY: NodeId = NodeId(0);

/// Pointer events a test can dispatch at an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeadlessEvent {
    /// `pointermove` at a client position.
    Move(Vec2),
    /// `pointerenter`
    Enter,
    /// `pointerleave`
    Leave,
    /// `pointerover`
    Over,
    /// `pointerout`
    Out,
}

impl HeadlessEvent {
    fn into_input(self, origin: NodeId) -> PointerInput<NodeId> {
        match self {
            Self::Move(client) => PointerInput::Move { client },
            Self::Enter => PointerInput::Enter,
            Self::Leave => PointerInput::Leave,
            Self::Over => PointerInput::Over(origin),
            Self::Out => PointerInput::Out(origin),
        }
    }
}

struct Listener {
    id: u64,
    kind: PointerKind,
    sink: PointerSink<NodeId>,
}

struct Node {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    cursor: Option<String>,
    rect: Rect,
    style: BTreeMap<String, String>,
    listeners: Vec<Listener>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            parent: None,
            children: Vec::new(),
            cursor: None,
            rect: Rect::default(),
            style: BTreeMap::new(),
            listeners: Vec::new(),
        }
    }
}

struct Document {
    nodes: Vec<Node>,
    frames: Vec<(u64, FrameCallback)>,
    last_id: u64,
    now: f64,
    removals: usize,
}

impl Document {
    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node_mut(id).and_then(|n| n.parent.take())
        else {
            return;
        };
        if let Some(parent) = self.node_mut(parent) {
            parent.children.retain(|&child| child != id);
        }
    }

    fn is_connected(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if current == BODY {
                return true;
            }
            cursor = self.node(current).and_then(|n| n.parent);
        }
        false
    }

    /// `id` followed by its ancestors, innermost first.
    fn propagation_path(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut cursor = self.node(id).map(|_| id);
        while let Some(current) = cursor {
            path.push(current);
            cursor = self.node(current).and_then(|n| n.parent);
        }
        path
    }
}

/// Deterministic host for tests and native embedding.
#[derive(Clone)]
pub struct HeadlessHost {
    doc: Rc<RefCell<Document>>,
}

impl Default for HeadlessHost {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessHost {
    /// New document containing only `<body>`.
    #[must_use]
    pub fn new() -> Self {
        let doc = Document {
            nodes: vec![Node::new("body")],
            frames: Vec::new(),
            last_id: 0,
            now: 0.0,
            removals: 0,
        };
        Self {
            doc: Rc::new(RefCell::new(doc)),
        }
    }

    /// The document body, always connected.
    #[must_use]
    pub fn body(&self) -> NodeId {
        BODY
    }

    /// Create a detached element.
    #[must_use]
    pub fn create_element(&self, tag: &str) -> NodeId {
        let mut doc = self.doc.borrow_mut();
        doc.nodes.push(Node::new(tag));
        NodeId(doc.nodes.len() - 1)
    }

    /// Append `child` as the last child of `parent`, moving it if needed.
    ///
    /// Appending an element into its own subtree is ignored.
    pub fn append_child(&self, parent: NodeId, child: NodeId) {
        let mut doc = self.doc.borrow_mut();
        if doc.node(child).is_none()
            || doc.propagation_path(parent).is_empty()
            || doc.propagation_path(parent).contains(&child)
        {
            return;
        }
        doc.detach(child);
        if let Some(node) = doc.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = doc.node_mut(parent) {
            node.children.push(child);
        }
    }

    /// Remove an element from its parent.
    pub fn detach(&self, node: NodeId) {
        self.doc.borrow_mut().detach(node);
    }

    /// Set the client-space bounding box reported for an element.
    pub fn set_bounding_box(&self, node: NodeId, rect: Rect) {
        if let Some(node) = self.doc.borrow_mut().node_mut(node) {
            node.rect = rect;
        }
    }

    /// Set an element's own `cursor` style; descendants inherit it.
    pub fn set_cursor(&self, node: NodeId, cursor: &str) {
        if let Some(node) = self.doc.borrow_mut().node_mut(node) {
            node.cursor = Some(cursor.to_owned());
        }
    }

    /// Lowercase tag of an element.
    #[must_use]
    pub fn tag(&self, node: NodeId) -> Option<String> {
        self.doc.borrow().node(node).map(|n| n.tag.clone())
    }

    /// Inline style property of an element.
    #[must_use]
    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.doc
            .borrow()
            .node(node)
            .and_then(|n| n.style.get(property).cloned())
    }

    /// Children of an element, in order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.doc
            .borrow()
            .node(node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Last child of an element.
    #[must_use]
    pub fn last_child(&self, node: NodeId) -> Option<NodeId> {
        self.doc
            .borrow()
            .node(node)
            .and_then(|n| n.children.last().copied())
    }

    /// Whether an element is in the document tree.
    #[must_use]
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.doc.borrow().is_connected(node)
    }

    /// Number of listeners registered directly on an element.
    #[must_use]
    pub fn listener_count(&self, node: NodeId) -> usize {
        self.doc.borrow().node(node).map_or(0, |n| n.listeners.len())
    }

    /// Number of overlays removed through [`Host::unmount_proxy`].
    #[must_use]
    pub fn removal_count(&self) -> usize {
        self.doc.borrow().removals
    }

    /// Register an extra listener, as page code sharing the container would.
    pub fn add_listener<F>(&self, node: NodeId, kind: PointerKind, listener: F)
    where
        F: Fn(PointerInput<NodeId>) + 'static,
    {
        let _id = self.register(node, kind, Rc::new(listener));
    }

    fn register(
        &self,
        node: NodeId,
        kind: PointerKind,
        sink: PointerSink<NodeId>,
    ) -> Option<u64> {
        let mut doc = self.doc.borrow_mut();
        let id = doc.next_id();
        let node = doc.node_mut(node)?;
        node.listeners.push(Listener { id, kind, sink });
        Some(id)
    }

    /// Dispatch a pointer event originating at `origin`.
    ///
    /// Move/over/out bubble through the ancestors; enter/leave are only
    /// delivered to `origin`. Listeners are collected per element before
    /// any of them runs.
    pub fn dispatch(&self, origin: NodeId, event: HeadlessEvent) {
        let input = event.into_input(origin);
        let kind = input.kind();
        let path = if kind.bubbles() {
            self.doc.borrow().propagation_path(origin)
        } else {
            vec![origin]
        };
        for node in path {
            let sinks: Vec<PointerSink<NodeId>> = self
                .doc
                .borrow()
                .node(node)
                .map(|n| {
                    n.listeners
                        .iter()
                        .filter(|l| l.kind == kind)
                        .map(|l| Rc::clone(&l.sink))
                        .collect()
                })
                .unwrap_or_default();
            for sink in sinks {
                sink(input.clone());
            }
        }
    }

    /// Queue a raw frame callback, as page code sharing the scheduler would.
    pub fn queue_frame<F>(&self, callback: F)
    where
        F: FnOnce(f64) + 'static,
    {
        let _id = self.push_frame(Box::new(callback));
    }

    fn push_frame(&self, callback: FrameCallback) -> u64 {
        let mut doc = self.doc.borrow_mut();
        let id = doc.next_id();
        doc.frames.push((id, callback));
        id
    }

    /// Run every frame callback queued so far at timestamp `now`.
    ///
    /// Callbacks requested while running wait for the next call. Returns
    /// how many callbacks ran.
    pub fn run_frame(&self, now: f64) -> usize {
        let batch = {
            let mut doc = self.doc.borrow_mut();
            doc.now = now;
            std::mem::take(&mut doc.frames)
        };
        let count = batch.len();
        for (_, callback) in batch {
            callback(now);
        }
        count
    }

    /// Number of queued frame callbacks.
    #[must_use]
    pub fn pending_frames(&self) -> usize {
        self.doc.borrow().frames.len()
    }

    /// Set the clock reported by [`Host::now`].
    pub fn set_now(&self, now: f64) {
        self.doc.borrow_mut().now = now;
    }

    fn set_style(&self, node: NodeId, property: &str, value: String) {
        if let Some(node) = self.doc.borrow_mut().node_mut(node) {
            let _previous = node.style.insert(property.to_owned(), value);
        }
    }
}

impl Layout for HeadlessHost {
    type Element = NodeId;

    fn bounding_box(&self, element: &NodeId) -> Rect {
        self.doc
            .borrow()
            .node(*element)
            .map(|n| n.rect)
            .unwrap_or_default()
    }

    fn tag_name(&self, element: &NodeId) -> String {
        self.doc
            .borrow()
            .node(*element)
            .map(|n| n.tag.to_ascii_uppercase())
            .unwrap_or_default()
    }

    fn computed_cursor(&self, element: &NodeId) -> Option<String> {
        let doc = self.doc.borrow();
        let inherited = doc
            .propagation_path(*element)
            .into_iter()
            .find_map(|id| doc.node(id).and_then(|n| n.cursor.clone()));
        doc.node(*element)
            .map(|_| inherited.unwrap_or_else(|| "auto".to_owned()))
    }
}

/// Overlay element in a [`HeadlessHost`] document.
pub struct HeadlessProxy {
    host: HeadlessHost,
    node: NodeId,
}

impl HeadlessProxy {
    /// The overlay's element.
    #[must_use]
    pub fn node(&self) -> NodeId {
        self.node
    }
}

impl ProxySurface for HeadlessProxy {
    fn set_size(&self, size: f32) {
        let value = css::px(size);
        self.host.set_style(self.node, "width", value.clone());
        self.host.set_style(self.node, "height", value);
    }

    fn set_translation(&self, position: Vec2) {
        self.host
            .set_style(self.node, "transform", css::translate(position));
    }

    fn set_opacity(&self, opacity: f32) {
        self.host
            .set_style(self.node, "opacity", css::opacity(opacity));
    }
}

/// Listener ids registered for one cursor.
pub struct HeadlessSubscription {
    target: NodeId,
    ids: Vec<u64>,
}

impl Host for HeadlessHost {
    type Proxy = HeadlessProxy;
    type Subscription = HeadlessSubscription;
    type Frame = u64;

    fn now(&self) -> f64 {
        self.doc.borrow().now
    }

    fn is_valid_target(&self, target: &NodeId) -> bool {
        self.is_connected(*target)
    }

    fn mount_proxy(
        &self,
        target: &NodeId,
        declarations: &[(&'static str, String)],
    ) -> Result<HeadlessProxy, CursorError> {
        if self.tag(*target).is_none() {
            return Err(CursorError::Host(format!(
                "no element {target:?} to mount into"
            )));
        }
        let node = self.create_element("div");
        for (property, value) in declarations {
            self.set_style(node, property, value.clone());
        }
        self.append_child(*target, node);
        Ok(HeadlessProxy {
            host: self.clone(),
            node,
        })
    }

    fn unmount_proxy(&self, target: &NodeId, proxy: &HeadlessProxy) -> bool {
        let mut doc = self.doc.borrow_mut();
        let is_child = doc
            .node(proxy.node)
            .is_some_and(|n| n.parent == Some(*target));
        if is_child {
            doc.detach(proxy.node);
            doc.removals += 1;
        }
        is_child
    }

    fn subscribe(
        &self,
        target: &NodeId,
        sink: PointerSink<NodeId>,
    ) -> Result<HeadlessSubscription, CursorError> {
        let ids = PointerKind::ALL
            .into_iter()
            .map(|kind| self.register(*target, kind, Rc::clone(&sink)))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| {
                CursorError::Host(format!("no element {target:?} to listen on"))
            })?;
        Ok(HeadlessSubscription {
            target: *target,
            ids,
        })
    }

    fn unsubscribe(&self, subscription: HeadlessSubscription) {
        let mut doc = self.doc.borrow_mut();
        if let Some(node) = doc.node_mut(subscription.target) {
            node.listeners.retain(|l| !subscription.ids.contains(&l.id));
        }
    }

    fn request_frame(&self, callback: FrameCallback) -> u64 {
        self.push_frame(callback)
    }

    fn cancel_frame(&self, frame: u64) {
        self.doc.borrow_mut().frames.retain(|(id, _)| *id != frame);
    }
}
