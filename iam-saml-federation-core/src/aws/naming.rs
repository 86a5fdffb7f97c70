use regex::Regex;
use std::sync::OnceLock;

// IAM SAML provider name limit
// Reference: https://docs.aws.amazon.com/IAM/latest/APIReference/API_CreateSAMLProvider.html
pub const MAX_PROVIDER_NAME_LENGTH: usize = 128;

fn provider_name_regex() -> &'static Regex {
    static NAME_REGEX: OnceLock<Regex> = OnceLock::new();
    NAME_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Valid regex pattern for SAML provider names")
    })
}

/// Check a SAML provider name against the IAM naming rules.
///
/// Names are 1-128 ASCII letters, digits, underscores, periods and hyphens.
pub fn validate_provider_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name must not be empty".to_string());
    }
    if name.chars().count() > MAX_PROVIDER_NAME_LENGTH {
        return Err(format!(
            "name '{name}' exceeds {MAX_PROVIDER_NAME_LENGTH} characters"
        ));
    }
    if !provider_name_regex().is_match(name) {
        return Err(format!(
            "name '{name}' may only contain letters, digits, '_', '.' and '-'"
        ));
    }
    Ok(())
}
