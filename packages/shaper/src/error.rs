//! Error types for the shaper.
//!
//! Uses the dual-error pattern: `ShaperError` for failures that stop a run
//! (I/O, XML syntax, serialization, malformed elements), and `ParseFailure`
//! for tag values that do not match any expected grammar. A `ParseFailure`
//! never aborts an element; the caller logs it and keeps the cleaned string.

use thiserror::Error;

use crate::tags::KeyClass;

/// Main error type for the shaper library.
#[derive(Debug, Error)]
pub enum ShaperError {
    /// A mandatory attribute is missing on an element.
    #[error("Missing attribute '{attribute}' on <{element}>{}", .id.as_ref().map(|id| format!(" {id}")).unwrap_or_default())]
    MissingAttribute {
        attribute: String,
        element: String,
        id: Option<String>,
    },

    /// An attribute is present but cannot be interpreted.
    #[error("Invalid value '{value}' for attribute '{attribute}' on <{element}>")]
    InvalidAttribute {
        attribute: String,
        element: String,
        value: String,
    },

    /// Input file or directory is unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV report writing error.
    #[error("CSV writing failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for shaper operations.
pub type Result<T> = std::result::Result<T, ShaperError>;

/// A tag value that could not be parsed for its value class.
///
/// `cleaned` holds the value after whatever normalization succeeded
/// (whitespace, separators, unit markers removed).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse '{raw}' as {}", .class.name())]
pub struct ParseFailure {
    pub class: KeyClass,
    pub raw: String,
    pub cleaned: String,
}

impl ParseFailure {
    pub(crate) fn new(class: KeyClass, raw: &str, cleaned: impl Into<String>) -> Self {
        Self {
            class,
            raw: raw.to_string(),
            cleaned: cleaned.into(),
        }
    }
}
