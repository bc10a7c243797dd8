//! Authorization-evidence gate.
//!
//! Runs after token receipt and before final sign-in. The identity server
//! only attaches role claims when the user belongs to a recognized external
//! group, so an assertion with no role claims means the user is not
//! authorized for the back office at all. That absence is treated as lack
//! of authorization (fail-closed), not as "member of no groups".

use super::{AuthError, ExternalAssertion, claim_types};

/// Outcome of a mid-protocol policy check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Continue the login transaction unmodified.
    Allow,
    /// Abort: redirect the browser to `location` and suppress the default
    /// success response. No account is created or updated.
    Reject { location: String },
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GateDecision::Allow)
    }

    /// Convert a rejection into the response-side error, which renders as a
    /// 302 to the error page. `Allow` has no response of its own.
    pub fn into_response_error(self) -> Option<AuthError> {
        match self {
            GateDecision::Allow => None,
            GateDecision::Reject { location } => {
                Some(AuthError::AuthenticationFailed { location })
            }
        }
    }
}

/// Check that the assertion carries at least one role claim.
pub fn check_authorization_evidence(
    assertion: &ExternalAssertion,
    error_location: &str,
) -> GateDecision {
    if assertion.find_first(claim_types::ROLE).is_none() {
        tracing::warn!(
            authentication_type = %assertion.authentication_type(),
            "Assertion carries no role claims; rejecting login"
        );
        return GateDecision::Reject {
            location: error_location.to_string(),
        };
    }
    GateDecision::Allow
}

/// Protocol-layer authentication failure: distinct cause from the evidence
/// check, same user-visible outcome.
pub fn on_authentication_failed(error_location: &str) -> GateDecision {
    tracing::warn!("External authentication failed; redirecting to error page");
    GateDecision::Reject {
        location: error_location.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Claim;

    const ERROR_URI: &str = "/authentication-error";

    #[test]
    fn test_no_role_claims_rejects() {
        let assertion = ExternalAssertion::new(
            "https://idp.test/",
            vec![Claim::new(claim_types::NAME, "Jane Doe")],
        );
        assert_eq!(
            check_authorization_evidence(&assertion, ERROR_URI),
            GateDecision::Reject {
                location: ERROR_URI.to_string()
            }
        );
    }

    #[test]
    fn test_any_role_claim_passes_regardless_of_value() {
        let assertion = ExternalAssertion::new(
            "https://idp.test/",
            vec![Claim::new(claim_types::ROLE, "NotALocalGroup")],
        );
        assert!(check_authorization_evidence(&assertion, ERROR_URI).is_allowed());
    }

    #[test]
    fn test_authentication_failure_redirects_to_error_page() {
        let decision = on_authentication_failed(ERROR_URI);
        assert_eq!(
            decision,
            GateDecision::Reject {
                location: ERROR_URI.to_string()
            }
        );
    }

    #[test]
    fn test_reject_converts_to_redirect_error() {
        let error = on_authentication_failed(ERROR_URI).into_response_error();
        assert!(matches!(
            error,
            Some(AuthError::AuthenticationFailed { location }) if location == ERROR_URI
        ));
    }

    #[test]
    fn test_allow_has_no_response_error() {
        assert!(GateDecision::Allow.into_response_error().is_none());
    }
}
