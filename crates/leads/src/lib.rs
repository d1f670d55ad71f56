//! Lead submission and phone verification for the valform funnel.
//!
//! The wizard hands off here at the contact step:
//!
//! - **Client**: the leads API (`POST /api/leads`, `POST
//!   /api/leads/verify`) behind a typed [`LeadsClient`].
//! - **Verifier**: the phone verification collaborator as an opaque
//!   [`PhoneVerifier`] seam, with an auto-approving stand-in for
//!   headless runs.
//! - **Flow**: the [`SubmissionFlow`] state machine
//!   (`Idle -> Validating -> Submitting -> AwaitingVerification ->
//!   Verified -> Terminal`), wired into session analytics.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod client;
pub mod config;
pub mod error;
pub mod flow;
pub mod verifier;

pub use client::LeadsClient;
pub use config::LeadsConfig;
pub use error::{Error, Result};
pub use flow::{SubmissionFlow, SubmissionState};
pub use verifier::{AutoVerifier, PhoneVerifier, VerificationOutcome};
