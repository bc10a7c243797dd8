//! Claim extraction.
//!
//! Pulls the typed values the linker needs out of a validated assertion.
//! Absence or malformation of a required claim is a configuration
//! precondition failure, not a recoverable runtime case: the identity-server
//! contract guarantees claim shape, so these functions propagate a hard
//! error rather than silently defaulting.

use super::{AuthError, ExternalAssertion, claim_types};

fn required<'a>(
    assertion: &'a ExternalAssertion,
    claim_type: &str,
) -> Result<&'a str, AuthError> {
    assertion
        .find_first(claim_type)
        .map(|c| c.value.as_str())
        .ok_or_else(|| AuthError::MissingClaim(claim_type.to_string()))
}

/// Local account name, derived from the `DOMAIN\username`-shaped
/// windows-account-name claim: everything after the first backslash.
pub fn account_name(assertion: &ExternalAssertion) -> Result<String, AuthError> {
    let value = required(assertion, claim_types::WINDOWS_ACCOUNT_NAME)?;
    match value.split_once('\\') {
        Some((_, username)) if !username.is_empty() => Ok(username.to_string()),
        Some(_) => Err(AuthError::MalformedClaim {
            claim_type: claim_types::WINDOWS_ACCOUNT_NAME.to_string(),
            reason: "empty username after backslash".to_string(),
        }),
        None => Err(AuthError::MalformedClaim {
            claim_type: claim_types::WINDOWS_ACCOUNT_NAME.to_string(),
            reason: "expected DOMAIN\\username, no backslash found".to_string(),
        }),
    }
}

/// Display name, verbatim from the name claim.
pub fn display_name(assertion: &ExternalAssertion) -> Result<String, AuthError> {
    Ok(required(assertion, claim_types::NAME)?.to_string())
}

/// Stable subject identifier used to key the external-login linkage.
pub fn external_id(assertion: &ExternalAssertion) -> Result<String, AuthError> {
    Ok(required(assertion, claim_types::NAME_ID)?.to_string())
}

/// All role-claim values, in received order, duplicates kept.
pub fn role_values(assertion: &ExternalAssertion) -> Vec<String> {
    assertion
        .find_all(claim_types::ROLE)
        .map(|c| c.value.clone())
        .collect()
}
