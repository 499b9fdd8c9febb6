//! JavaScript entry points.
//!
//! ```js
//! import init, { initLogging, initCursor } from "./cursor_glide.js";
//! await init();
//! initLogging();
//! const cursor = initCursor(document.querySelector("#stage"), {
//!   color: "hotpink",
//!   hoverSize: "48px",
//! });
//! // later
//! cursor.stop();
//! ```

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::engine::{start, CursorHandle};
use crate::error::CursorError;
use crate::host::web::WebHost;
use crate::options::CursorOptions;

/// Install the console logger and panic hook. Safe to call repeatedly.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// A running cursor, returned to JavaScript.
#[wasm_bindgen]
pub struct Cursor {
    handle: CursorHandle<WebHost>,
}

#[wasm_bindgen]
impl Cursor {
    /// Stop the cursor and remove its overlay. Idempotent.
    pub fn stop(&self) {
        self.handle.stop();
    }

    /// Whether `stop` has not been called yet.
    #[wasm_bindgen(getter, js_name = isActive)]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.handle.is_active()
    }
}

/// Start a cursor on `target`.
///
/// `options` may be `undefined`/`null`, a JSON string, or a plain object;
/// size fields accept numbers or `"NNpx"` strings.
#[wasm_bindgen(js_name = initCursor)]
pub fn init_cursor(target: JsValue, options: JsValue) -> Result<Cursor, JsError> {
    let options = options_from_js(&options)?;
    let target = target.dyn_into::<Element>().map_err(|_| {
        CursorError::InvalidTarget("target must be an HTMLElement".to_owned())
    })?;
    let handle = start(WebHost::new()?, target, options)?;
    Ok(Cursor { handle })
}

fn options_from_js(value: &JsValue) -> Result<CursorOptions, CursorError> {
    if value.is_undefined() || value.is_null() {
        return Ok(CursorOptions::default());
    }
    let json = match value.as_string() {
        Some(json) => json,
        None => js_sys::JSON::stringify(value)
            .ok()
            .map(String::from)
            .ok_or_else(|| {
                CursorError::OptionsParse(
                    "options are not JSON-serializable".to_owned(),
                )
            })?,
    };
    CursorOptions::from_json(&json)
}
