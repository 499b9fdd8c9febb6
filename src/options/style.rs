use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::css;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Proxy Style", inline)]
#[serde(default)]
/// Static look of the overlay element, applied once when it is mounted.
pub struct ProxyStyle {
    /// CSS `border-radius` of the overlay.
    #[schemars(title = "Border Radius")]
    pub border_radius: String,
    /// CSS `z-index` of the overlay.
    #[schemars(title = "Z Index")]
    pub z_index: i32,
    /// CSS `mix-blend-mode` of the overlay.
    #[schemars(title = "Blend Mode")]
    pub blend_mode: String,
    /// CSS `transition` smoothing size and opacity changes.
    #[schemars(skip)]
    pub transition: String,
}

impl Default for ProxyStyle {
    fn default() -> Self {
        Self {
            border_radius: "50%".to_owned(),
            z_index: 1000,
            blend_mode: "difference".to_owned(),
            transition: "width 0.1s ease, height 0.1s ease, opacity 0.3s ease"
                .to_owned(),
        }
    }
}

impl ProxyStyle {
    /// Inline declarations for a freshly created overlay.
    ///
    /// The overlay starts hidden at the container origin; opacity is
    /// raised by the pointer-enter handler.
    #[must_use]
    pub fn declarations(
        &self,
        color: &str,
        base_size: f32,
    ) -> Vec<(&'static str, String)> {
        let size = css::px(base_size);
        vec![
            ("position", "absolute".to_owned()),
            ("width", size.clone()),
            ("height", size),
            ("border-radius", self.border_radius.clone()),
            ("background-color", color.to_owned()),
            ("pointer-events", "none".to_owned()),
            ("transition", self.transition.clone()),
            ("z-index", self.z_index.to_string()),
            ("left", "0".to_owned()),
            ("top", "0".to_owned()),
            ("mix-blend-mode", self.blend_mode.clone()),
            ("opacity", "0".to_owned()),
        ]
    }
}
