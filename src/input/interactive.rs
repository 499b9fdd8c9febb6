//! Interactive-element classification.
//!
//! An element is interactive when its tag is in a fixed allow-list or its
//! computed `cursor` style is `pointer`. Nothing is cached: each over/out
//! event re-queries the host.

use crate::host::Layout;

/// Tags that always count as interactive (lowercase).
pub const INTERACTIVE_TAGS: [&str; 6] =
    ["a", "button", "input", "textarea", "select", "label"];

/// Classify from a tag name and a computed cursor value.
#[must_use]
pub fn is_interactive(tag: &str, cursor: Option<&str>) -> bool {
    let tag = tag.trim();
    INTERACTIVE_TAGS
        .iter()
        .any(|allowed| tag.eq_ignore_ascii_case(allowed))
        || cursor.is_some_and(|c| c.trim().eq_ignore_ascii_case("pointer"))
}

/// Classify an element through the host's layout queries.
pub fn classify<L: Layout>(layout: &L, element: &L::Element) -> bool {
    let tag = layout.tag_name(element);
    let cursor = layout.computed_cursor(element);
    is_interactive(&tag, cursor.as_deref())
}
