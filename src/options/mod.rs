//! Cursor configuration with TOML preset and JSON support.
//!
//! Every field has a default and the struct uses `#[serde(default)]`, so a
//! partial document (e.g. only `color = "tomato"`) works. Size fields accept
//! either numbers or CSS pixel strings (`"20px"`), and the camelCase names
//! used by the JavaScript entry point are accepted as aliases.

mod style;

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use style::ProxyStyle;

use crate::error::CursorError;
use crate::util::css::deserialize_px;

/// Configuration for one cursor overlay.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Cursor")]
#[serde(default)]
pub struct CursorOptions {
    /// Fill color of the overlay (any CSS color).
    #[schemars(title = "Color")]
    pub color: String,
    /// Resting diameter in pixels.
    #[serde(alias = "baseSize", alias = "size", deserialize_with = "deserialize_px")]
    #[schemars(with = "f32", title = "Base Size", range(min = 1.0, max = 200.0))]
    pub base_size: f32,
    /// Fraction of the remaining distance covered per frame, in (0, 1].
    ///
    /// The schema range is a slider hint for option editors; [`validate`]
    /// accepts any value in (0, 1].
    ///
    /// [`validate`]: Self::validate
    #[serde(alias = "followSpeed", alias = "speed")]
    #[schemars(title = "Follow Speed", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub follow_speed: f32,
    /// Diameter while hovering an interactive element.
    #[serde(alias = "hoverSize", deserialize_with = "deserialize_px")]
    #[schemars(with = "f32", title = "Hover Size", range(min = 1.0, max = 200.0))]
    pub hover_size: f32,
    /// Upper clamp on the velocity-scaled diameter.
    #[serde(
        alias = "maxVelocitySize",
        alias = "maxSpeedSize",
        deserialize_with = "deserialize_px"
    )]
    #[schemars(with = "f32", title = "Max Velocity Size", range(min = 1.0, max = 400.0))]
    pub max_velocity_size: f32,
    /// Pixels of growth per unit of velocity (px/ms).
    #[serde(alias = "velocityScale")]
    #[schemars(title = "Velocity Scale", range(min = 0.0, max = 200.0))]
    pub velocity_scale: f32,
    /// Static overlay styling.
    pub style: ProxyStyle,
}

impl Default for CursorOptions {
    fn default() -> Self {
        Self {
            color: "aqua".to_owned(),
            base_size: 20.0,
            follow_speed: 0.1,
            hover_size: 35.0,
            max_velocity_size: 40.0,
            velocity_scale: 50.0,
            style: ProxyStyle::default(),
        }
    }
}

impl CursorOptions {
    /// Generate JSON Schema describing the options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(CursorOptions)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), CursorError> {
        let invalid = |msg: String| Err(CursorError::InvalidOptions(msg));

        if self.color.trim().is_empty() {
            return invalid("color must not be empty".to_owned());
        }
        if !(self.follow_speed > 0.0 && self.follow_speed <= 1.0) {
            return invalid(format!(
                "follow_speed must be in (0, 1], got {}",
                self.follow_speed
            ));
        }
        for (name, value) in [
            ("base_size", self.base_size),
            ("hover_size", self.hover_size),
            ("max_velocity_size", self.max_velocity_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return invalid(format!(
                    "{name} must be a positive length, got {value}"
                ));
            }
        }
        if self.max_velocity_size < self.base_size {
            return invalid(format!(
                "max_velocity_size ({}) is smaller than base_size ({})",
                self.max_velocity_size, self.base_size
            ));
        }
        if !self.velocity_scale.is_finite() || self.velocity_scale < 0.0 {
            return invalid(format!(
                "velocity_scale must be non-negative, got {}",
                self.velocity_scale
            ));
        }
        Ok(())
    }

    /// Parse options from a JSON document. Missing fields use defaults.
    pub fn from_json(json: &str) -> Result<Self, CursorError> {
        serde_json::from_str(json)
            .map_err(|e| CursorError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, CursorError> {
        let content = std::fs::read_to_string(path).map_err(CursorError::Io)?;
        toml::from_str(&content)
            .map_err(|e| CursorError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), CursorError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CursorError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(CursorError::Io)?;
        }
        std::fs::write(path, content).map_err(CursorError::Io)
    }

    /// Inline declarations for a freshly mounted overlay.
    #[must_use]
    pub fn proxy_declarations(&self) -> Vec<(&'static str, String)> {
        self.style.declarations(&self.color, self.base_size)
    }
}
