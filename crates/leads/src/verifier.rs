//! The phone verification collaborator.
//!
//! Verification itself happens outside this system (the user proves they
//! hold the number); this module only defines the seam and a stand-in
//! implementation for headless runs.

use async_trait::async_trait;
use ulid::Ulid;

use valform_core::VerificationId;

use crate::error::Result;

/// What the verification collaborator reported back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// The number was verified; the collaborator issued an id.
    Verified(VerificationId),
    /// The user closed the verification flow without finishing.
    Closed,
}

/// Opaque phone verification dependency.
#[async_trait]
pub trait PhoneVerifier: Send + Sync {
    /// Start verification for a mobile number and wait for the outcome.
    async fn start_verification(&self, mobile: &str) -> Result<VerificationOutcome>;
}

/// Verifier that approves every number immediately.
///
/// Used by the interactive driver, where there is no real verification
/// service to hand the user to.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoVerifier;

#[async_trait]
impl PhoneVerifier for AutoVerifier {
    async fn start_verification(&self, _mobile: &str) -> Result<VerificationOutcome> {
        Ok(VerificationOutcome::Verified(VerificationId::new(
            Ulid::new().to_string(),
        )))
    }
}
