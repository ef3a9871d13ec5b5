//! Error types for styles-part import/export

use style_model::StyleError;
use thiserror::Error;

/// Errors that can occur while reading, writing, or loading styles
#[derive(Debug, Error)]
pub enum StoreError {
    /// Payload is not a well-formed styles part
    #[error("Malformed styles markup: {0}")]
    MalformedMarkup(String),

    /// IO error (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Style(#[from] StyleError),
}

impl From<quick_xml::Error> for StoreError {
    fn from(err: quick_xml::Error) -> Self {
        StoreError::MalformedMarkup(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for StoreError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        StoreError::MalformedMarkup(format!("Attribute error: {}", err))
    }
}

impl From<std::str::Utf8Error> for StoreError {
    fn from(err: std::str::Utf8Error) -> Self {
        StoreError::MalformedMarkup(format!("Invalid UTF-8: {}", err))
    }
}

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;
