//! HTTP client for the leads API.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use valform_core::{FormState, LeadId, VerificationId};

use crate::config::LeadsConfig;
use crate::error::{Error, Result};

/// Wire shape of the lead submission response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeadResponse {
    success: bool,
    #[serde(default)]
    lead_id: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Wire shape of the verification follow-up response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VerifyResponse {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyRequest<'a> {
    lead_id: &'a str,
    verification_id: &'a str,
    phone_verified: bool,
}

/// Client for the leads API.
#[derive(Debug, Clone)]
pub struct LeadsClient {
    http: reqwest::Client,
    config: LeadsConfig,
}

impl LeadsClient {
    /// Create a client from configuration.
    pub fn new(config: LeadsConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http, config })
    }

    /// Submit the full form as a new lead.
    ///
    /// The form is posted as-is with `phoneVerified: false`; the follow-up
    /// [`verify`](Self::verify) call flips that flag server-side.
    #[instrument(skip(self, form), fields(property_type = ?form.property_type))]
    pub async fn submit(&self, form: &FormState) -> Result<LeadId> {
        let url = self.config.leads_url()?;
        let response = self.http.post(url).json(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::api(status.as_u16(), body));
        }

        let body: LeadResponse = response.json().await?;
        if !body.success {
            return Err(Error::rejected(body.error.unwrap_or_default()));
        }
        let lead_id = body.lead_id.ok_or(Error::MissingLeadId)?;
        debug!(%lead_id, "lead accepted");
        Ok(LeadId::new(lead_id))
    }

    /// Report a successful phone verification for an accepted lead.
    ///
    /// Callers treat failures here as best-effort; this method still
    /// reports them honestly.
    #[instrument(skip(self))]
    pub async fn verify(&self, lead_id: &LeadId, verification_id: &VerificationId) -> Result<()> {
        let url = self.config.verify_url()?;
        let request = VerifyRequest {
            lead_id: lead_id.as_str(),
            verification_id: verification_id.as_str(),
            phone_verified: true,
        };
        let response = self.http.post(url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::api(status.as_u16(), body));
        }

        let body: VerifyResponse = response.json().await?;
        if !body.success {
            return Err(Error::rejected(body.error.unwrap_or_default()));
        }
        debug!(%lead_id, "verification recorded");
        Ok(())
    }
}
