//! Crate-level error types.

use std::fmt;

/// Errors produced by the cursor-glide crate.
#[derive(Debug)]
pub enum CursorError {
    /// The target container is missing, detached, or not an element.
    InvalidTarget(String),
    /// An option value is outside its accepted range.
    InvalidOptions(String),
    /// TOML/JSON options parsing or serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// The host environment refused a DOM operation.
    Host(String),
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTarget(msg) => write!(f, "invalid target: {msg}"),
            Self::InvalidOptions(msg) => {
                write!(f, "invalid cursor options: {msg}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Host(msg) => write!(f, "host error: {msg}"),
        }
    }
}

impl std::error::Error for CursorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CursorError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
