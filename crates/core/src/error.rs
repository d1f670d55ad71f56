//! Error types shared across the funnel crates.

use std::fmt;

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types.
///
/// Validation failures are recovered locally by the caller (inline
/// message, no state change); nothing here is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required field is empty or malformed.
    MissingField { field: String },
    /// The mobile number does not match the accepted local format.
    InvalidMobile { value: String },
    /// Serialization error.
    Serialization { reason: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => {
                write!(f, "required field '{field}' is missing")
            }
            Self::InvalidMobile { value } => {
                write!(f, "'{value}' is not a valid mobile number")
            }
            Self::Serialization { reason } => {
                write!(f, "serialization error: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Create a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid mobile error.
    pub fn invalid_mobile(value: impl Into<String>) -> Self {
        Self::InvalidMobile {
            value: value.into(),
        }
    }

    /// Create a serialization error.
    pub fn serialization(reason: impl Into<String>) -> Self {
        Self::Serialization {
            reason: reason.into(),
        }
    }

    /// Whether this error should surface as a field-level phone message.
    pub const fn is_phone_error(&self) -> bool {
        matches!(self, Self::InvalidMobile { .. })
    }
}
