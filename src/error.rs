//! Error types for the docblock library.
//!
//! Parsing is total and never fails; these errors only come from misuse of
//! the element model or from an invalid [`ParserConfig`](crate::parser::ParserConfig).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocBlockError {
    #[error("{element} elements do not support {operation}")]
    Unsupported {
        operation: &'static str,
        element: &'static str,
    },

    #[error("invalid annotation marker {marker:?}: must be a single punctuation character other than '*' or '/'")]
    InvalidMarker { marker: char },
}

pub type Result<T> = std::result::Result<T, DocBlockError>;
