//! Error types for style registry operations

use crate::StyleId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StyleError {
    #[error("Style not found: {0}")]
    NotFound(StyleId),

    #[error("Style ID already exists: {0}")]
    DuplicateIdentifier(StyleId),

    #[error("Style ID must not be empty")]
    MissingIdentifier,

    #[error("Invalid value for {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, StyleError>;
