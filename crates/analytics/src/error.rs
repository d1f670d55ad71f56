//! Error types for the analytics crate.

use std::fmt;

/// Result type alias for analytics operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Analytics error types.
///
/// Sink failures never propagate into the funnel; the tracker logs them
/// and moves on. These exist so sinks have something honest to return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A sink failed to record an event.
    Sink { sink: String, reason: String },
    /// An event failed to serialize.
    Serialization { reason: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sink { sink, reason } => {
                write!(f, "sink '{sink}' failed: {reason}")
            }
            Self::Serialization { reason } => {
                write!(f, "event serialization failed: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Create a sink error.
    pub fn sink(sink: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Sink {
            sink: sink.into(),
            reason: reason.into(),
        }
    }

    /// Create a serialization error.
    pub fn serialization(reason: impl Into<String>) -> Self {
        Self::Serialization {
            reason: reason.into(),
        }
    }
}
