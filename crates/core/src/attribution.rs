//! Marketing attribution captured once from the entry URL.

use serde::{Deserialize, Serialize};
use url::Url;

/// Attribution and tracking identifiers.
///
/// Parsed from the entry URL exactly once and injected into the form at
/// construction; never mutated by user input. `address`/`postal` are
/// pre-fill values for the form and are skipped on the wire (the form
/// carries its own copies).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribution {
    #[serde(skip)]
    pub address: Option<String>,
    #[serde(skip)]
    pub postal: Option<String>,

    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub utm_term: Option<String>,
    pub utm_content: Option<String>,
    pub gclid: Option<String>,
    pub fbclid: Option<String>,
    pub unique_user_id: Option<String>,
    pub ga_client_id: Option<String>,
    pub fbp: Option<String>,
    pub fbc: Option<String>,
    pub source: Option<String>,
}

impl Attribution {
    /// Parse attribution from a full entry URL.
    pub fn from_entry_url(url: &Url) -> Self {
        let mut attribution = Self::default();
        for (key, value) in url.query_pairs() {
            if value.is_empty() {
                continue;
            }
            let value = value.into_owned();
            match key.as_ref() {
                "address" => attribution.address = Some(value),
                "postal" => attribution.postal = Some(value),
                "utm_source" => attribution.utm_source = Some(value),
                "utm_medium" => attribution.utm_medium = Some(value),
                "utm_campaign" => attribution.utm_campaign = Some(value),
                "utm_term" => attribution.utm_term = Some(value),
                "utm_content" => attribution.utm_content = Some(value),
                "gclid" => attribution.gclid = Some(value),
                "fbclid" => attribution.fbclid = Some(value),
                _ => {}
            }
        }
        attribution
    }

    /// Set the per-visitor tracking identifiers assigned by the page.
    pub fn with_client_ids(
        mut self,
        unique_user_id: impl Into<String>,
        ga_client_id: Option<String>,
        fbp: Option<String>,
        fbc: Option<String>,
    ) -> Self {
        self.unique_user_id = Some(unique_user_id.into());
        self.ga_client_id = ga_client_id;
        self.fbp = fbp;
        self.fbc = fbc;
        self
    }

    /// Set the traffic source label.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_parse_entry_url() {
        let url = Url::parse(
            "https://example.com/valuation?address=5+Rimu+St&postal=6021\
             &utm_source=google&utm_medium=cpc&utm_campaign=spring&gclid=abc123",
        )
        .unwrap();

        let attribution = Attribution::from_entry_url(&url);
        assert_eq!(attribution.address.as_deref(), Some("5 Rimu St"));
        assert_eq!(attribution.postal.as_deref(), Some("6021"));
        assert_eq!(attribution.utm_source.as_deref(), Some("google"));
        assert_eq!(attribution.utm_medium.as_deref(), Some("cpc"));
        assert_eq!(attribution.gclid.as_deref(), Some("abc123"));
        assert_eq!(attribution.fbclid, None);
    }

    #[test]
    fn test_empty_params_ignored() {
        let url = Url::parse("https://example.com/?utm_source=&gclid=x").unwrap();
        let attribution = Attribution::from_entry_url(&url);
        assert_eq!(attribution.utm_source, None);
        assert_eq!(attribution.gclid.as_deref(), Some("x"));
    }

    #[test]
    fn test_unknown_params_ignored() {
        let url = Url::parse("https://example.com/?ref=footer&utm_term=house").unwrap();
        let attribution = Attribution::from_entry_url(&url);
        assert_eq!(attribution.utm_term.as_deref(), Some("house"));
    }

    #[test]
    fn test_wire_names_camel_case() {
        let attribution = Attribution {
            utm_source: Some("google".into()),
            ..Attribution::default()
        }
        .with_client_ids("u-1", Some("ga-9".into()), None, None);

        let json = serde_json::to_value(&attribution).unwrap();
        assert_eq!(json["utmSource"], "google");
        assert_eq!(json["uniqueUserId"], "u-1");
        assert_eq!(json["gaClientId"], "ga-9");
        assert!(json.get("address").is_none());
    }
}
