//! Client configuration for the leads API.

use std::time::Duration;

use url::Url;

use crate::error::Result;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for [`LeadsClient`](crate::client::LeadsClient).
#[derive(Debug, Clone)]
pub struct LeadsConfig {
    /// Base URL of the API host; endpoint paths are joined onto it.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl LeadsConfig {
    /// Create a configuration for the given API host.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(base_url.as_ref())?,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Override the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The lead submission endpoint.
    pub fn leads_url(&self) -> Result<Url> {
        Ok(self.base_url.join("/api/leads")?)
    }

    /// The verification follow-up endpoint.
    pub fn verify_url(&self) -> Result<Url> {
        Ok(self.base_url.join("/api/leads/verify")?)
    }
}
