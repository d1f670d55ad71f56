//! Contact validation shared by the wizard and the submission flow.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};
use crate::form::FormState;

/// NZ mobile numbers: leading `0` or `+64`/`64`, then an `02x` mobile
/// prefix and 7 to 9 further digits. Spaces and dashes are stripped
/// before matching.
const MOBILE_PATTERN: &str = r"^(?:\+?64|0)2\d{7,9}$";

fn mobile_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(MOBILE_PATTERN).ok()).as_ref()
}

/// Check a mobile number against the accepted local format.
pub fn is_valid_mobile(mobile: &str) -> bool {
    let compact: String = mobile
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    mobile_regex().is_some_and(|re| re.is_match(&compact))
}

/// Validate the contact fields required before submission.
///
/// All of first name, last name, email, and mobile must be non-empty, and
/// the mobile must pass [`is_valid_mobile`]. The mobile failure is its own
/// error variant so callers can surface a field-level message.
pub fn validate_contact(form: &FormState) -> Result<()> {
    if form.first_name.trim().is_empty() {
        return Err(Error::missing_field("firstName"));
    }
    if form.last_name.trim().is_empty() {
        return Err(Error::missing_field("lastName"));
    }
    if form.email.trim().is_empty() || !form.email.contains('@') {
        return Err(Error::missing_field("email"));
    }
    if !is_valid_mobile(&form.mobile) {
        return Err(Error::invalid_mobile(&form.mobile));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_mobiles() {
        assert!(is_valid_mobile("0211234567"));
        assert!(is_valid_mobile("021 123 4567"));
        assert!(is_valid_mobile("+64211234567"));
        assert!(is_valid_mobile("6427-123-4567"));
        assert!(is_valid_mobile("0220123456789"));
    }

    #[test]
    fn test_invalid_mobiles() {
        assert!(!is_valid_mobile("12345"));
        assert!(!is_valid_mobile(""));
        assert!(!is_valid_mobile("0311234567")); // landline prefix
        assert!(!is_valid_mobile("02112345")); // too short
        assert!(!is_valid_mobile("021123456789012")); // too long
        assert!(!is_valid_mobile("021abc4567"));
    }

    #[test]
    fn test_validate_contact_missing_fields() {
        let mut form = FormState::default();
        assert!(matches!(
            validate_contact(&form),
            Err(Error::MissingField { ref field }) if field == "firstName"
        ));

        form.first_name = "Ana".into();
        form.last_name = "Reid".into();
        form.email = "ana@example.com".into();
        form.mobile = "12345".into();
        assert!(matches!(
            validate_contact(&form),
            Err(Error::InvalidMobile { .. })
        ));

        form.mobile = "0211234567".into();
        assert!(validate_contact(&form).is_ok());
    }

    #[test]
    fn test_email_needs_at_sign() {
        let mut form = FormState::default();
        form.first_name = "Ana".into();
        form.last_name = "Reid".into();
        form.email = "not-an-email".into();
        form.mobile = "0211234567".into();
        assert!(matches!(
            validate_contact(&form),
            Err(Error::MissingField { ref field }) if field == "email"
        ));
    }
}
