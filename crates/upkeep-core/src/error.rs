//! # Error Types — Structured Error Taxonomy
//!
//! Defines the errors raised by the validation contract and the entity
//! stores. All errors use `thiserror` for derive-based `Display` and
//! `Error` implementations.
//!
//! ## Design
//!
//! - Validation errors carry exactly one short corrective phrase. Callers
//!   show it to the end user verbatim.
//! - Not-found errors name the entity kind and nothing else.
//! - Everything else is an internal fault. Its detail is logged, never shown;
//!   users see a generic message and the action is not applied.

use thiserror::Error;

use crate::kind::EntityKind;

/// Generic message shown for internal faults.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Fault classification, mirroring the status codes an HTTP surface would use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The caller sent bad input.
    BadRequest,
    /// The referenced record does not exist.
    NotFound,
    /// Anything else.
    Internal,
}

impl ErrorClass {
    /// The HTTP-style status code for this class.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::NotFound => 404,
            Self::Internal => 500,
        }
    }
}

/// A payload failed its schema. Carries the first violated rule's message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    /// Create a validation error with a corrective message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The corrective message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Validation failures are always client-input faults.
    pub fn class(&self) -> ErrorClass {
        ErrorClass::BadRequest
    }
}

/// Top-level error type for store operations.
#[derive(Error, Debug)]
pub enum UpkeepError {
    /// The payload did not satisfy its schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No record of this kind has the requested id.
    #[error("{} not found", .0.label())]
    NotFound(EntityKind),

    /// The backing store could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other internal fault.
    #[error("internal error: {0}")]
    Internal(String),
}

impl UpkeepError {
    /// Shorthand for a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(ValidationError::new(message))
    }

    /// Classify the error.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Validation(_) => ErrorClass::BadRequest,
            Self::NotFound(_) => ErrorClass::NotFound,
            Self::Storage(_) | Self::Serialization(_) | Self::Io(_) | Self::Internal(_) => {
                ErrorClass::Internal
            }
        }
    }

    /// The message an end user should see.
    ///
    /// Validation and not-found messages are returned verbatim; internal
    /// faults collapse to [`UNKNOWN_ERROR_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self.class() {
            ErrorClass::BadRequest | ErrorClass::NotFound => self.to_string(),
            ErrorClass::Internal => UNKNOWN_ERROR_MESSAGE.to_string(),
        }
    }
}
