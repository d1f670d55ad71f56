//! Funnel analytics events.
//!
//! Events are descriptions of what happened, not instructions to a
//! vendor; sinks decide where they go. Payloads carry no raw contact
//! details anywhere: the conversion events embed a [`LeadSummary`]
//! redacted at construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use valform_core::{FormState, SessionId};

/// Unique identifier for an emitted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(Ulid);

impl EventId {
    /// Create a new random event ID.
    pub fn new() -> Self {
        Self(Ulid::new())
    }

    /// Get the inner ULID.
    pub fn as_ulid(&self) -> Ulid {
        self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One analytics event, tagged by name on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FunnelEvent {
    /// The wizard mounted and the first step rendered.
    FormStarted {
        source: Option<String>,
        has_address: bool,
    },
    /// A step was entered (including the first on start).
    StepEntered { step: String, step_number: f64 },
    /// A step was exited, carrying that step's answer value.
    StepExited {
        step: String,
        step_number: f64,
        answer: Option<String>,
    },
    /// A committed transition landed on `step`.
    FunnelProgress {
        step: String,
        step_number: f64,
        completed: u32,
        total: u32,
    },
    /// A disqualification halt fired; the session ends here unless the
    /// answer changes.
    Disqualified { step: String, reason: String },
    /// Contact validation rejected the submission attempt.
    ValidationFailed { field: String },
    /// The session converted: the leads API returned an identifier.
    SessionCompleted { lead_id: String },
    /// The leads API accepted the submission.
    LeadSubmitted {
        lead_id: String,
        #[serde(flatten)]
        summary: LeadSummary,
    },
    /// The verification callback confirmed the mobile number.
    PhoneVerified { lead_id: String },
    /// The funnel reached the terminal step.
    FormCompleted {
        #[serde(flatten)]
        summary: LeadSummary,
    },
    /// A swallowed operational failure, reported for monitoring.
    ErrorTracked { context: String, message: String },
}

impl FunnelEvent {
    /// Stable event name, used by sinks and tests.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FormStarted { .. } => "form_started",
            Self::StepEntered { .. } => "step_entered",
            Self::StepExited { .. } => "step_exited",
            Self::FunnelProgress { .. } => "funnel_progress",
            Self::Disqualified { .. } => "disqualified",
            Self::ValidationFailed { .. } => "validation_failed",
            Self::SessionCompleted { .. } => "session_completed",
            Self::LeadSubmitted { .. } => "lead_submitted",
            Self::PhoneVerified { .. } => "phone_verified",
            Self::FormCompleted { .. } => "form_completed",
            Self::ErrorTracked { .. } => "error_tracked",
        }
    }
}

/// An event wrapped with its identity, session, and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub id: EventId,
    pub session_id: SessionId,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub event: FunnelEvent,
}

impl EventEnvelope {
    /// Wrap an event for the given session, stamped now.
    pub fn new(session_id: SessionId, event: FunnelEvent) -> Self {
        Self {
            id: EventId::new(),
            session_id,
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Redacted view of a converted lead, safe for analytics payloads.
///
/// Raw contact details never leave the submission path: the email keeps
/// only its domain, the mobile its last three digits, and the valuation
/// is reduced to a band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSummary {
    pub property_type: Option<String>,
    pub email_domain: Option<String>,
    pub mobile_suffix: Option<String>,
    pub valuation_band: String,
    pub feature_count: u32,
}

impl LeadSummary {
    /// Build a redacted summary from the submitted form.
    pub fn redact(form: &FormState) -> Self {
        Self {
            property_type: form.property_type.map(|p| p.label().to_string()),
            email_domain: form
                .email
                .rsplit_once('@')
                .map(|(_, domain)| domain.to_string()),
            mobile_suffix: mobile_suffix(&form.mobile),
            valuation_band: valuation_band(form.cv_valuation).to_string(),
            feature_count: form.extra_features.len() as u32,
        }
    }
}

fn mobile_suffix(mobile: &str) -> Option<String> {
    let digits: Vec<char> = mobile.chars().filter(char::is_ascii_digit).collect();
    if digits.len() < 3 {
        return None;
    }
    Some(digits[digits.len() - 3..].iter().collect())
}

fn valuation_band(cv: u64) -> &'static str {
    match cv {
        0..=499_999 => "under_500k",
        500_000..=999_999 => "500k_1m",
        1_000_000..=1_999_999 => "1m_2m",
        _ => "over_2m",
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_summary_redacts_contact_details() {
        let mut form = FormState::default();
        form.email = "ana.reyes@example.co.nz".into();
        form.mobile = "+64 21 555 7312".into();
        form.set_cv_valuation(850_000);
        form.toggle_feature("Deck");
        form.toggle_feature("Sea Views");

        let summary = LeadSummary::redact(&form);
        assert_eq!(summary.email_domain.as_deref(), Some("example.co.nz"));
        assert_eq!(summary.mobile_suffix.as_deref(), Some("312"));
        assert_eq!(summary.valuation_band, "500k_1m");
        assert_eq!(summary.feature_count, 2);

        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("ana.reyes"));
        assert!(!json.contains("555"));
    }

    #[test]
    fn test_valuation_bands() {
        assert_eq!(valuation_band(100_000), "under_500k");
        assert_eq!(valuation_band(500_000), "500k_1m");
        assert_eq!(valuation_band(1_500_000), "1m_2m");
        assert_eq!(valuation_band(3_000_000), "over_2m");
    }

    #[test]
    fn test_envelope_serializes_flat() {
        let envelope = EventEnvelope::new(
            SessionId::new(),
            FunnelEvent::StepEntered {
                step: "garage".into(),
                step_number: 10.0,
            },
        );
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["event"], "step_entered");
        assert_eq!(json["step"], "garage");
        assert_eq!(json["step_number"], 10.0);
    }

    #[test]
    fn test_event_names() {
        let event = FunnelEvent::Disqualified {
            step: "relationship".into(),
            reason: "not_owner".into(),
        };
        assert_eq!(event.name(), "disqualified");
    }
}
