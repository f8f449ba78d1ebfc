//! Domain-level error types.
//!
//! These errors are transport agnostic. The inbound HTTP adapter maps them to
//! status codes and response bodies; validators and services construct them.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single validation rule failure tied to a request property.
///
/// The JSON keys are camelCase, while the `propertyName` value carries the
/// entity property name as validators spell it (`Username`, `OwnerId`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    /// Name of the offending entity property.
    #[schema(example = "Username")]
    pub property_name: String,
    /// Human-readable description of the violated rule.
    #[schema(example = "'usr4' is already taken")]
    pub message: String,
}

impl ValidationFailure {
    /// Create a failure for the given property.
    pub fn new(property_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
            message: message.into(),
        }
    }
}

/// Domain failure raised by validators and services.
///
/// Mutating operations evaluate every rule and carry the complete failure
/// list, so one response reports all violations at once.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// One or more validation rules failed.
    #[error("validation failed with {} failure(s)", failures.len())]
    Validation { failures: Vec<ValidationFailure> },
    /// The addressed entity does not exist.
    #[error("not found")]
    NotFound,
    /// Unexpected failure inside the domain or an adapter.
    #[error("internal error: {message}")]
    Internal { message: String },
}

impl Error {
    /// Wrap a collected failure list.
    pub fn validation(failures: Vec<ValidationFailure>) -> Self {
        Self::Validation { failures }
    }

    /// Shorthand for a single-failure validation error.
    pub fn single(property_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            failures: vec![ValidationFailure::new(property_name, message)],
        }
    }

    /// The addressed entity does not exist.
    pub fn not_found() -> Self {
        Self::NotFound
    }

    /// Create an internal error with the given message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Validation failures carried by this error, if any.
    pub fn failures(&self) -> Option<&[ValidationFailure]> {
        match self {
            Self::Validation { failures } => Some(failures),
            _ => None,
        }
    }
}
