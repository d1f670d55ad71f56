//! Funnel configuration: file-based with environment overrides.

use std::env;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use valform_leads::LeadsConfig;

/// Environment variable overriding the leads API base URL.
pub const ENV_API_URL: &str = "VALFORM_API_URL";
/// Environment variable overriding the request timeout, in seconds.
pub const ENV_TIMEOUT_SECS: &str = "VALFORM_TIMEOUT_SECS";

/// Top-level configuration for a funnel run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FunnelConfig {
    /// Base URL of the leads API host.
    pub api_url: String,
    /// Per-request timeout for the leads API, in seconds.
    pub timeout_secs: u64,
    /// Delay before a single-select answer commits, in milliseconds.
    pub auto_advance_ms: u64,
    /// Delay before the terminal step redirects home, in seconds.
    pub redirect_secs: u64,
}

impl Default for FunnelConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".to_string(),
            timeout_secs: 10,
            auto_advance_ms: 300,
            redirect_secs: 3,
        }
    }
}

impl FunnelConfig {
    /// Load configuration from a JSON or TOML file, by extension.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&contents)
                .with_context(|| format!("invalid JSON config: {}", path.display()))?
        } else {
            toml::from_str(&contents)
                .with_context(|| format!("invalid TOML config: {}", path.display()))?
        };
        Ok(config)
    }

    /// Apply environment variable overrides on top of this configuration.
    #[must_use]
    pub fn apply_env(mut self) -> Self {
        if let Ok(url) = env::var(ENV_API_URL) {
            if !url.is_empty() {
                self.api_url = url;
            }
        }
        if let Some(secs) = env::var(ENV_TIMEOUT_SECS)
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.timeout_secs = secs;
        }
        self
    }

    /// Load from an optional file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.apply_env())
    }

    /// The leads client configuration derived from this one.
    pub fn leads_config(&self) -> valform_leads::Result<LeadsConfig> {
        Ok(LeadsConfig::new(&self.api_url)?.with_timeout(Duration::from_secs(self.timeout_secs)))
    }

    /// The auto-advance delay as a duration.
    pub const fn auto_advance(&self) -> Duration {
        Duration::from_millis(self.auto_advance_ms)
    }

    /// The home-redirect delay as a duration.
    pub const fn redirect_delay(&self) -> Duration {
        Duration::from_secs(self.redirect_secs)
    }
}
