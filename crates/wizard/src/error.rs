//! Error types for the wizard crate.

use std::fmt;

use crate::step::Step;

/// Result type alias for wizard operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Wizard error types.
///
/// All of these are recovered locally (inline message, no state change);
/// disqualification halts are deliberately *not* errors and live in
/// [`crate::nav::Disqualification`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Forward navigation requested before the step was answered.
    MissingAnswer { step: Step },
    /// An input was applied to a step it does not belong to.
    InputMismatch { step: Step, input: String },
    /// At least one extra feature must be selected before continuing.
    FeatureRequired,
    /// Navigation requested from the terminal step.
    TerminalStep,
    /// The terminal step requires a verified submission.
    VerificationRequired,
    /// Contact validation failed.
    Validation(valform_core::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAnswer { step } => {
                write!(f, "step '{step}' has no answer to advance from")
            }
            Self::InputMismatch { step, input } => {
                write!(f, "input '{input}' does not belong to step '{step}'")
            }
            Self::FeatureRequired => {
                write!(f, "select at least one extra feature to continue")
            }
            Self::TerminalStep => {
                write!(f, "cannot navigate from the terminal step")
            }
            Self::VerificationRequired => {
                write!(f, "the terminal step is reachable only via a verified submission")
            }
            Self::Validation(err) => {
                write!(f, "validation failed: {err}")
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<valform_core::Error> for Error {
    fn from(err: valform_core::Error) -> Self {
        Self::Validation(err)
    }
}

impl Error {
    /// Create a missing answer error.
    pub const fn missing_answer(step: Step) -> Self {
        Self::MissingAnswer { step }
    }

    /// Create an input mismatch error.
    pub fn input_mismatch(step: Step, input: impl Into<String>) -> Self {
        Self::InputMismatch {
            step,
            input: input.into(),
        }
    }

    /// Create a feature required error.
    pub const fn feature_required() -> Self {
        Self::FeatureRequired
    }

    /// Create a terminal step error.
    pub const fn terminal_step() -> Self {
        Self::TerminalStep
    }

    /// Create a verification required error.
    pub const fn verification_required() -> Self {
        Self::VerificationRequired
    }
}
