//! SAML provider ARN helpers

/// Extract the provider name from a SAML provider ARN.
///
/// IAM returns ARNs of the form `arn:aws:iam::123456789012:saml-provider/NAME`.
/// The name is everything after the first `/`. ARNs without a `/` yield `None`.
#[must_use]
pub fn provider_name_from_arn(arn: &str) -> Option<&str> {
    arn.split_once('/').map(|(_, name)| name)
}

/// Whether `arn` names the provider `name` (exact, case-sensitive match)
#[must_use]
pub fn arn_matches_name(arn: &str, name: &str) -> bool {
    provider_name_from_arn(arn) == Some(name)
}
