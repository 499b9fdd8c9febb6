use glam::Vec2;

/// Host-normalised pointer events delivered to a cursor.
///
/// `E` is the host's element handle; over/out carry the element the event
/// originated from so it can be classified.
///
/// # Example
///
/// ```ignore
/// engine.handle_input(
///     &host,
///     &container,
///     PointerInput::Move { client: Vec2::new(140.0, 92.0) },
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PointerInput<E> {
    /// Pointer moved over the container.
    Move {
        /// Position in viewport (client) coordinates.
        client: Vec2,
    },
    /// Pointer entered the container.
    Enter,
    /// Pointer left the container.
    Leave,
    /// Pointer moved onto an element inside the container.
    Over(E),
    /// Pointer moved off an element inside the container.
    Out(E),
}

/// Listener kinds a host registers on the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// `pointermove`
    Move,
    /// `pointerenter`
    Enter,
    /// `pointerleave`
    Leave,
    /// `pointerover`
    Over,
    /// `pointerout`
    Out,
}

impl PointerKind {
    /// All five kinds, in registration order.
    pub const ALL: [Self; 5] =
        [Self::Move, Self::Enter, Self::Leave, Self::Over, Self::Out];

    /// DOM event type name.
    #[must_use]
    pub fn event_type(self) -> &'static str {
        match self {
            Self::Move => "pointermove",
            Self::Enter => "pointerenter",
            Self::Leave => "pointerleave",
            Self::Over => "pointerover",
            Self::Out => "pointerout",
        }
    }

    /// Whether the DOM event bubbles from descendants to the container.
    #[must_use]
    pub fn bubbles(self) -> bool {
        !matches!(self, Self::Enter | Self::Leave)
    }
}

impl<E> PointerInput<E> {
    /// The listener kind this input is delivered through.
    #[must_use]
    pub fn kind(&self) -> PointerKind {
        match self {
            Self::Move { .. } => PointerKind::Move,
            Self::Enter => PointerKind::Enter,
            Self::Leave => PointerKind::Leave,
            Self::Over(_) => PointerKind::Over,
            Self::Out(_) => PointerKind::Out,
        }
    }
}
