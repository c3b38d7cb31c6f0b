//! Error types for theme parsing.
//!
//! Parsing is the only fallible step of a conversion. Resolution and
//! serialization recover locally by emitting placeholder tokens, so they have
//! no error type of their own.

use serde_json::error::Category;

/// Error returned when a theme document cannot be decoded.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The input is not valid JSON.
    #[error("Malformed JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    /// The input is valid JSON but a known field has the wrong shape.
    #[error("Invalid theme structure: {0}")]
    Structure(#[source] serde_json::Error),

    /// The top-level value is valid JSON but not an object.
    #[error("Theme must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },
}

impl ParseError {
    /// Line of the offending input, when the underlying decoder reported one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::Syntax(err) | ParseError::Structure(err) => Some(err.line()),
            ParseError::NotAnObject { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        match err.classify() {
            Category::Data => ParseError::Structure(err),
            Category::Io | Category::Syntax | Category::Eof => ParseError::Syntax(err),
        }
    }
}
