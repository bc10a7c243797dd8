use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AuthError {
    /// A claim the identity-server contract guarantees was absent.
    /// Precondition violation; the request terminates without recovery.
    #[error("Required claim '{0}' not present in assertion")]
    MissingClaim(String),

    /// A required claim was present but not in the expected shape
    /// (e.g. no backslash in the account-name claim).
    #[error("Claim '{claim_type}' has unexpected shape: {reason}")]
    MalformedClaim {
        claim_type: String,
        reason: String,
    },

    /// Authentication failed at the protocol layer (redirect to the
    /// configured error page, no session established).
    #[error("Authentication failed: redirecting to {location}")]
    AuthenticationFailed { location: String },

    /// Account would fail its persistence invariants.
    #[error("Account validation failed: {0}")]
    InvalidAccount(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            // Redirect to the error page, suppressing the default response.
            AuthError::AuthenticationFailed { location } => {
                return Response::builder()
                    .status(StatusCode::FOUND)
                    .header("Location", location.as_str())
                    .body(axum::body::Body::empty())
                    .unwrap();
            }
            AuthError::MissingClaim(_) | AuthError::MalformedClaim { .. } => {
                // Identity-server contract violation, not a client mistake
                (StatusCode::INTERNAL_SERVER_ERROR, "malformed_assertion")
            }
            AuthError::InvalidAccount(_) => (StatusCode::INTERNAL_SERVER_ERROR, "invalid_account"),
            AuthError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "store_error"),
        };

        let body = ErrorBody {
            code,
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authentication_failed_redirects() {
        let error = AuthError::AuthenticationFailed {
            location: "/authentication-error".to_string(),
        };
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get("Location").unwrap(),
            "/authentication-error"
        );
    }

    #[test]
    fn test_malformed_claim_is_internal_error() {
        let error = AuthError::MalformedClaim {
            claim_type: crate::auth::claim_types::WINDOWS_ACCOUNT_NAME.to_string(),
            reason: "no backslash".to_string(),
        };
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
