// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Clone / pass-by-value hygiene
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Animated cursor overlay bound to a container element.
//!
//! The overlay follows the pointer with per-frame exponential smoothing,
//! grows with pointer velocity, and switches to a fixed size while an
//! interactive element (links, buttons, form controls, anything with
//! `cursor: pointer`) is hovered.
//!
//! # Key entry points
//!
//! - [`engine::start`] - bind a cursor to a container on some
//!   [`host::Host`], returning an [`engine::CursorHandle`] that stops it
//! - [`options::CursorOptions`] - colors, sizes, follow speed, velocity
//!   scaling, with TOML presets
//! - [`host::headless::HeadlessHost`] - deterministic in-memory host with
//!   synthetic frame timestamps
//! - `host::web::WebHost` and the `initCursor` JavaScript export - the
//!   browser host, behind the `web` feature
//!
//! # Architecture
//!
//! Pointer events and animation frames are two independent sources driving
//! one [`engine::CursorEngine`] on a single thread. Events only update the
//! [`animation::CursorState`] (plus immediate opacity and hover-size writes);
//! the frame step is the sole writer of the smoothed position and of the
//! velocity-based size.

pub mod animation;
pub mod engine;
pub mod error;
pub mod host;
pub mod input;
pub mod options;
pub mod util;
#[cfg(feature = "web")]
pub mod wasm;

pub use engine::{start, CursorEngine, CursorHandle};
pub use error::CursorError;
pub use options::CursorOptions;
