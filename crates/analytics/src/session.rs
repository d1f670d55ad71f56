//! Session instrumentation: the bridge between the wizard and the
//! tracker.

use valform_core::{FormState, LeadId};
use valform_wizard::{Disqualification, Step, WizardObserver, DATA_ENTRY_STEPS};

use crate::event::{FunnelEvent, LeadSummary};
use crate::sink::Tracker;

/// Instruments one funnel session.
///
/// Registered with the wizard as its observer for step events, and
/// called directly by the submission flow for conversion events. Every
/// emission goes through the tracker, which swallows sink failures, so
/// nothing here can interrupt the funnel.
pub struct FunnelSession {
    tracker: Tracker,
}

impl FunnelSession {
    pub fn new(tracker: Tracker) -> Self {
        Self { tracker }
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// The wizard mounted with attribution merged in.
    pub fn form_started(&self, form: &FormState) {
        self.tracker.emit(FunnelEvent::FormStarted {
            source: form.attribution.source.clone(),
            has_address: !form.address.is_empty(),
        });
    }

    /// A disqualification halt fired.
    pub fn disqualified(&self, step: Step, reason: Disqualification) {
        self.tracker.emit(FunnelEvent::Disqualified {
            step: step.name().to_string(),
            reason: reason_tag(reason).to_string(),
        });
    }

    /// Contact validation rejected a submission attempt. Only the field
    /// name is reported, never the value.
    pub fn validation_failed(&self, field: &str) {
        self.tracker.emit(FunnelEvent::ValidationFailed {
            field: field.to_string(),
        });
    }

    /// The session converted; recorded before the conversion events.
    pub fn mark_completed(&self, lead_id: &LeadId) {
        self.tracker.emit(FunnelEvent::SessionCompleted {
            lead_id: lead_id.to_string(),
        });
    }

    /// The leads API accepted the submission.
    pub fn lead_submitted(&self, lead_id: &LeadId, form: &FormState) {
        self.tracker.emit(FunnelEvent::LeadSubmitted {
            lead_id: lead_id.to_string(),
            summary: LeadSummary::redact(form),
        });
    }

    /// Report a swallowed operational failure.
    pub fn track_error(&self, context: &str, message: impl Into<String>) {
        self.tracker.emit(FunnelEvent::ErrorTracked {
            context: context.to_string(),
            message: message.into(),
        });
    }

    /// The verification callback confirmed the mobile number.
    pub fn phone_verified(&self, lead_id: &LeadId) {
        self.tracker.emit(FunnelEvent::PhoneVerified {
            lead_id: lead_id.to_string(),
        });
    }

    /// The funnel reached the terminal step.
    pub fn form_completed(&self, form: &FormState) {
        self.tracker.emit(FunnelEvent::FormCompleted {
            summary: LeadSummary::redact(form),
        });
    }
}

impl WizardObserver for FunnelSession {
    fn step_entered(&self, step: Step, _form: &FormState) {
        self.tracker.emit(FunnelEvent::StepEntered {
            step: step.name().to_string(),
            step_number: step.number(),
        });
    }

    fn step_exited(&self, step: Step, answer: Option<String>, _form: &FormState) {
        self.tracker.emit(FunnelEvent::StepExited {
            step: step.name().to_string(),
            step_number: step.number(),
            answer,
        });
    }

    fn progress(&self, step: Step, _form: &FormState) {
        self.tracker.emit(FunnelEvent::FunnelProgress {
            step: step.name().to_string(),
            step_number: step.number(),
            completed: completed_steps(step),
            total: DATA_ENTRY_STEPS,
        });
    }
}

/// Number of data-entry steps behind the given position, in declared
/// order. Skipped steps still count: the denominator is fixed, matching
/// the progress bar the funnel has always shown.
fn completed_steps(step: Step) -> u32 {
    Step::ALL
        .iter()
        .position(|s| *s == step)
        .map(|i| i as u32)
        .unwrap_or(0)
}

const fn reason_tag(reason: Disqualification) -> &'static str {
    match reason {
        Disqualification::RealEstateAgent => "real_estate_agent",
        Disqualification::NotOwner => "not_owner",
        Disqualification::Refinancing => "refinancing",
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]

    use std::sync::Arc;

    use super::*;
    use crate::event::FunnelEvent;
    use crate::sink::InMemorySink;
    use valform_core::SessionId;

    fn session_with_sink() -> (FunnelSession, Arc<InMemorySink>) {
        let sink = Arc::new(InMemorySink::new());
        let tracker = Tracker::new(SessionId::new()).with_sink(sink.clone());
        (FunnelSession::new(tracker), sink)
    }

    #[test]
    fn test_step_events_carry_legacy_ordinals() {
        let (session, sink) = session_with_sink();
        let form = FormState::default();

        session.step_entered(Step::GarageCapacity, &form);

        let events = sink.events();
        match &events[0].event {
            FunnelEvent::StepEntered { step, step_number } => {
                assert_eq!(step, "garage_capacity");
                assert_eq!(*step_number, 10.5);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_progress_has_fixed_denominator() {
        let (session, sink) = session_with_sink();
        let form = FormState::default();

        session.progress(Step::Relationship, &form);

        match &sink.events()[0].event {
            FunnelEvent::FunnelProgress {
                completed, total, ..
            } => {
                assert_eq!(*completed, 10);
                assert_eq!(*total, 15);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_disqualification_reason_tags() {
        let (session, sink) = session_with_sink();

        session.disqualified(Step::Relationship, Disqualification::NotOwner);

        match &sink.events()[0].event {
            FunnelEvent::Disqualified { step, reason } => {
                assert_eq!(step, "relationship");
                assert_eq!(reason, "not_owner");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_conversion_events_are_redacted() {
        let (session, sink) = session_with_sink();
        let mut form = FormState::default();
        form.email = "ana@example.com".into();
        form.mobile = "0215557312".into();

        session.lead_submitted(&LeadId::new("lead-7"), &form);

        let json = serde_json::to_string(&sink.events()[0]).unwrap();
        assert!(json.contains("lead-7"));
        assert!(json.contains("example.com"));
        assert!(!json.contains("ana@"));
        assert!(!json.contains("0215557312"));
    }
}
