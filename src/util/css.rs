//! CSS pixel lengths: parsing option values and formatting inline styles.

use glam::Vec2;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

/// Parse a pixel length such as `"20px"`, `"20"` or `" 12.5px "`.
///
/// Returns `None` for anything that is not a finite number with an
/// optional `px` suffix.
#[must_use]
pub fn parse_px(text: &str) -> Option<f32> {
    let trimmed = text.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim_end();
    number.parse::<f32>().ok().filter(|v| v.is_finite())
}

/// Format a length for an inline style: `35.0` becomes `"35px"`.
#[must_use]
pub fn px(value: f32) -> String {
    format!("{value}px")
}

/// Format a 2D translation transform.
#[must_use]
pub fn translate(position: Vec2) -> String {
    format!("translate({}px, {}px)", position.x, position.y)
}

/// Format an opacity value.
#[must_use]
pub fn opacity(value: f32) -> String {
    format!("{value}")
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PxRepr {
    Number(f32),
    Text(String),
}

/// Serde helper accepting either a bare number or a pixel string.
pub fn deserialize_px<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    match PxRepr::deserialize(deserializer)? {
        PxRepr::Number(value) => Ok(value),
        PxRepr::Text(text) => parse_px(&text).ok_or_else(|| {
            D::Error::custom(format!("invalid pixel length `{text}`"))
        }),
    }
}
