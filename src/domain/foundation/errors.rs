//! Error types for the domain layer.

use thiserror::Error;

/// Errors raised while validating user input before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Fields '{first}' and '{second}' are both required")]
    MissingPair { first: String, second: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i64,
        max: i64,
        actual: i64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField {
            field: field.into(),
        }
    }

    /// Creates an error for a pair of fields that must both be filled in.
    pub fn missing_pair(first: impl Into<String>, second: impl Into<String>) -> Self {
        ValidationError::MissingPair {
            first: first.into(),
            second: second.into(),
        }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i64, max: i64, actual: i64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Message shown to the operator in the admin console.
    pub fn user_message(&self) -> String {
        match self {
            ValidationError::EmptyField { field } => format!("{} harus diisi", capitalize(field)),
            ValidationError::MissingPair { first, second } => {
                format!("{} dan {} harus diisi", capitalize(first), capitalize(second))
            }
            ValidationError::OutOfRange {
                field, min, max, ..
            } => format!("{} harus antara {} dan {}", capitalize(field), min, max),
            ValidationError::InvalidFormat { field, reason } => {
                format!("{} tidak valid: {}", capitalize(field), reason)
            }
        }
    }
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>().replace('_', " "),
        None => String::new(),
    }
}
