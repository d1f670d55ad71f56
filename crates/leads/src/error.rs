//! Error types for the lead submission flow.

use thiserror::Error;

/// Result type alias for lead operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Lead submission error types.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport-level failure talking to the leads API.
    #[error("leads API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL (or a joined endpoint) is invalid.
    #[error("invalid leads API URL: {0}")]
    Url(#[from] url::ParseError),

    /// The API answered with a non-success HTTP status.
    #[error("leads API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The API answered 200 but rejected the lead.
    #[error("lead rejected: {message}")]
    Rejected { message: String },

    /// The API accepted the lead but returned no identifier.
    #[error("lead response carried no lead id")]
    MissingLeadId,

    /// Contact validation failed before any network call.
    #[error(transparent)]
    Validation(#[from] valform_core::Error),

    /// An operation was requested in a state that does not allow it.
    #[error("submission flow is in state '{state}', cannot {operation}")]
    InvalidState {
        state: &'static str,
        operation: &'static str,
    },
}

impl Error {
    /// Create an API status error.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::Api {
            status,
            body: body.into(),
        }
    }

    /// Create a rejection error from the API's error message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    /// Create an invalid state error.
    pub const fn invalid_state(state: &'static str, operation: &'static str) -> Self {
        Self::InvalidState { state, operation }
    }

    /// Whether this failure should surface as a field-level phone error
    /// rather than a generic alert.
    pub fn is_phone_error(&self) -> bool {
        matches!(self, Self::Validation(inner) if inner.is_phone_error())
    }
}
