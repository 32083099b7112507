//! Error types for field processing and validation
//!
//! Malformed user input is never an error: it degrades to empty or neutral
//! output. The variants here describe configuration mistakes made by the
//! integrating code, plus the outcome of the field validation step.

use thiserror::Error;

/// Configuration errors raised while resolving or processing a field
#[derive(Error, Debug)]
pub enum FieldError {
    #[error("Mask mode selected but no mask pattern is configured")]
    MissingMask,

    #[error("Unknown preset '{0}'")]
    UnknownPreset(String),

    #[error("Unknown validator '{0}'")]
    UnknownValidator(String),

    #[error("Field '{0}' is not defined in the schema")]
    UnknownField(String),

    #[error("Invalid character pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A raw value that did not pass its field validator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationFailure {
    pub message: String,
}

impl ValidationFailure {
    pub const DEFAULT_MESSAGE: &'static str = "Invalid value";

    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for ValidationFailure {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MESSAGE)
    }
}

pub type Result<T> = std::result::Result<T, FieldError>;
