//! The submission and verification flow.
//!
//! `Idle -> Validating -> Submitting -> AwaitingVerification -> Verified
//! -> Terminal`, with validation and submission failures dropping back to
//! `Idle`. Nothing is retried automatically; the user resubmits.

use std::sync::Arc;

use tracing::{info, warn};

use valform_analytics::FunnelSession;
use valform_core::{validate_contact, FormState, LeadId};

use crate::client::LeadsClient;
use crate::error::{Error, Result};
use crate::verifier::{PhoneVerifier, VerificationOutcome};

/// Where a submission currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionState {
    /// Nothing in flight; the contact step is editable.
    Idle,
    /// Contact fields are being validated.
    Validating,
    /// The lead POST is in flight.
    Submitting,
    /// The lead was accepted; waiting on the verification collaborator.
    AwaitingVerification { lead_id: LeadId },
    /// The mobile number was verified.
    Verified { lead_id: LeadId },
    /// The funnel has moved to the terminal step.
    Terminal { lead_id: LeadId },
}

impl SubmissionState {
    /// Short name for logs and state errors.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Submitting => "submitting",
            Self::AwaitingVerification { .. } => "awaiting_verification",
            Self::Verified { .. } => "verified",
            Self::Terminal { .. } => "terminal",
        }
    }
}

/// Drives a form through validation, submission, and verification.
pub struct SubmissionFlow {
    client: LeadsClient,
    verifier: Arc<dyn PhoneVerifier>,
    state: SubmissionState,
}

impl SubmissionFlow {
    pub fn new(client: LeadsClient, verifier: Arc<dyn PhoneVerifier>) -> Self {
        Self {
            client,
            verifier,
            state: SubmissionState::Idle,
        }
    }

    pub const fn state(&self) -> &SubmissionState {
        &self.state
    }

    /// Validate the contact fields and post the lead.
    ///
    /// On success the flow waits for verification. On any failure the
    /// flow returns to `Idle` with the form untouched, and the error says
    /// whether to surface a phone field error or a generic alert.
    pub async fn submit(
        &mut self,
        form: &FormState,
        session: &FunnelSession,
    ) -> Result<LeadId> {
        if self.state != SubmissionState::Idle {
            return Err(Error::invalid_state(self.state.name(), "submit"));
        }

        self.state = SubmissionState::Validating;
        if let Err(err) = validate_contact(form) {
            session.validation_failed(failed_field(&err));
            self.state = SubmissionState::Idle;
            return Err(err.into());
        }

        self.state = SubmissionState::Submitting;
        let lead_id = match self.client.submit(form).await {
            Ok(lead_id) => lead_id,
            Err(err) => {
                self.state = SubmissionState::Idle;
                return Err(err);
            }
        };

        info!(%lead_id, "lead submitted");
        session.mark_completed(&lead_id);
        session.lead_submitted(&lead_id, form);
        self.state = SubmissionState::AwaitingVerification {
            lead_id: lead_id.clone(),
        };
        Ok(lead_id)
    }

    /// Hand the mobile number to the verification collaborator and wait.
    ///
    /// On verification, the form is marked verified and the follow-up
    /// POST to the leads API is best-effort: a failure there is logged
    /// and does not block progression. If the user closes the
    /// verification flow, the state stays `AwaitingVerification`.
    pub async fn run_verification(
        &mut self,
        form: &mut FormState,
        session: &FunnelSession,
    ) -> Result<VerificationOutcome> {
        let lead_id = match &self.state {
            SubmissionState::AwaitingVerification { lead_id } => lead_id.clone(),
            other => return Err(Error::invalid_state(other.name(), "run verification")),
        };

        let outcome = self.verifier.start_verification(&form.mobile).await?;
        match &outcome {
            VerificationOutcome::Verified(verification_id) => {
                form.mark_phone_verified();
                session.phone_verified(&lead_id);
                if let Err(err) = self.client.verify(&lead_id, verification_id).await {
                    warn!(%lead_id, %err, "verification follow-up failed; continuing");
                    session.track_error("verify", err.to_string());
                }
                self.state = SubmissionState::Verified { lead_id };
            }
            VerificationOutcome::Closed => {
                info!(%lead_id, "verification closed by user");
            }
        }
        Ok(outcome)
    }

    /// Record the move to the terminal step.
    pub fn finish(&mut self, form: &FormState, session: &FunnelSession) -> Result<LeadId> {
        let lead_id = match &self.state {
            SubmissionState::Verified { lead_id } => lead_id.clone(),
            other => return Err(Error::invalid_state(other.name(), "finish")),
        };
        session.form_completed(form);
        self.state = SubmissionState::Terminal {
            lead_id: lead_id.clone(),
        };
        Ok(lead_id)
    }
}

/// Which field a validation failure should be attributed to.
fn failed_field(err: &valform_core::Error) -> &str {
    match err {
        valform_core::Error::MissingField { field } => field,
        valform_core::Error::InvalidMobile { .. } => "mobile",
        valform_core::Error::Serialization { .. } => "form",
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use super::*;
    use crate::config::LeadsConfig;
    use crate::verifier::AutoVerifier;
    use serde_json::json;
    use valform_analytics::{InMemorySink, Tracker};
    use valform_core::SessionId;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn flow_for(server: &MockServer) -> SubmissionFlow {
        let config = LeadsConfig::new(server.uri()).unwrap();
        let client = LeadsClient::new(config).unwrap();
        SubmissionFlow::new(client, Arc::new(AutoVerifier))
    }

    fn session_with_sink() -> (FunnelSession, Arc<InMemorySink>) {
        let sink = Arc::new(InMemorySink::new());
        let tracker = Tracker::new(SessionId::new()).with_sink(sink.clone());
        (FunnelSession::new(tracker), sink)
    }

    fn filled_form() -> FormState {
        let mut form = FormState::default();
        form.first_name = "Ana".into();
        form.last_name = "Reyes".into();
        form.email = "ana@example.com".into();
        form.mobile = "0215557312".into();
        form
    }

    async fn mount_accepting_api(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/api/leads"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "leadId": "lead-42"})),
            )
            .mount(server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/leads/verify"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_happy_path_walks_the_state_machine() {
        let server = MockServer::start().await;
        mount_accepting_api(&server).await;

        let mut flow = flow_for(&server).await;
        let (session, sink) = session_with_sink();
        let mut form = filled_form();

        let lead_id = flow.submit(&form, &session).await.unwrap();
        assert_eq!(lead_id.as_str(), "lead-42");
        assert!(matches!(
            flow.state(),
            SubmissionState::AwaitingVerification { .. }
        ));

        let outcome = flow.run_verification(&mut form, &session).await.unwrap();
        assert!(matches!(outcome, VerificationOutcome::Verified(_)));
        assert!(form.phone_verified);
        assert!(matches!(flow.state(), SubmissionState::Verified { .. }));

        flow.finish(&form, &session).unwrap();
        assert!(matches!(flow.state(), SubmissionState::Terminal { .. }));

        assert_eq!(
            sink.names(),
            vec![
                "session_completed",
                "lead_submitted",
                "phone_verified",
                "form_completed"
            ]
        );
    }

    #[tokio::test]
    async fn test_invalid_mobile_fails_back_to_idle() {
        let server = MockServer::start().await;
        let mut flow = flow_for(&server).await;
        let (session, sink) = session_with_sink();

        let mut form = filled_form();
        form.mobile = "12345".into();

        let err = flow.submit(&form, &session).await.unwrap_err();
        assert!(err.is_phone_error());
        assert_eq!(*flow.state(), SubmissionState::Idle);
        assert_eq!(sink.names(), vec!["validation_failed"]);

        // No network call was made.
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_failure_returns_to_idle_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/leads"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let mut flow = flow_for(&server).await;
        let (session, _sink) = session_with_sink();

        let err = flow.submit(&filled_form(), &session).await.unwrap_err();
        assert!(!err.is_phone_error());
        assert_eq!(*flow.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_verify_follow_up_failure_does_not_block() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/leads"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "leadId": "lead-42"})),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/leads/verify"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut flow = flow_for(&server).await;
        let (session, _sink) = session_with_sink();
        let mut form = filled_form();

        flow.submit(&form, &session).await.unwrap();
        flow.run_verification(&mut form, &session).await.unwrap();

        assert!(form.phone_verified);
        assert!(matches!(flow.state(), SubmissionState::Verified { .. }));
    }

    #[tokio::test]
    async fn test_double_submit_rejected() {
        let server = MockServer::start().await;
        mount_accepting_api(&server).await;

        let mut flow = flow_for(&server).await;
        let (session, _sink) = session_with_sink();
        let form = filled_form();

        flow.submit(&form, &session).await.unwrap();
        let err = flow.submit(&form, &session).await.unwrap_err();
        assert!(matches!(err, Error::InvalidState { .. }));
    }
}
