//! Login flow orchestration.
//!
//! Drives one login transaction through the per-login state machine:
//!
//! ```text
//! AssertionReceived → GateChecked{pass|reject}
//!     → (new: AccountCreated | existing: AccountUpdated)
//!     → GroupsProjected → UsernameSet
//!     → (new: DisplayNameDefaulted | existing: DisplayNameSet)
//!     → Committed
//! ```
//!
//! Reject is terminal: the browser is redirected to the error page and no
//! account state is committed. The whole transaction runs synchronously
//! within one request; aborting discards the uncommitted in-memory account.

use validator::Validate;

use super::{AccountLinker, AuthError, ExternalAssertion, GateDecision, claims};
use crate::models::BackOfficeAccount;

/// Result of one completed login transaction.
#[derive(Debug)]
pub enum LoginOutcome {
    /// The account was committed; establish the session.
    SignedIn(BackOfficeAccount),
    /// The transaction was aborted; redirect the browser and suppress the
    /// default success response.
    Redirected { location: String },
}

impl LoginOutcome {
    pub fn is_signed_in(&self) -> bool {
        matches!(self, LoginOutcome::SignedIn(_))
    }
}

/// Complete an external login against the directory store.
///
/// `assertion` must already be protocol-validated; this function applies
/// only the policy layer: authorization-evidence gate, create-vs-update
/// dispatch into the linker hooks, and the final commit.
///
/// # Errors
///
/// Malformed or missing required claims propagate as [`AuthError`]; that is
/// an identity-server contract violation, not a user-recoverable condition.
/// A gate rejection is not an error: it returns
/// [`LoginOutcome::Redirected`].
pub async fn complete_external_login(
    linker: &AccountLinker,
    assertion: &ExternalAssertion,
) -> Result<LoginOutcome, AuthError> {
    if let GateDecision::Reject { location } = linker.on_before_final_sign_in(assertion) {
        return Ok(LoginOutcome::Redirected { location });
    }

    let external_id = claims::external_id(assertion)?;
    let existing = linker
        .store()
        .find_by_external_login(assertion.authentication_type(), &external_id)
        .await?;

    match existing {
        Some(mut account) => {
            let proceed = linker.on_external_login(&mut account, assertion).await?;
            if !proceed {
                // The linker never vetoes today, but honor the contract.
                return Ok(LoginOutcome::Redirected {
                    location: linker.error_location().to_string(),
                });
            }
            linker.store().update_account(&account).await?;
            Ok(LoginOutcome::SignedIn(account))
        }
        None => {
            if !linker.auto_link().enabled {
                tracing::warn!(
                    external_id = %external_id,
                    "Unknown external identity and auto-linking is disabled; rejecting login"
                );
                return Ok(LoginOutcome::Redirected {
                    location: linker.error_location().to_string(),
                });
            }

            let mut account =
                BackOfficeAccount::auto_linked(assertion.authentication_type(), external_id);
            linker.on_auto_link(&mut account, assertion).await?;
            // Default the display name from the assertion, as the linking
            // framework would for a freshly created account.
            account.name = Some(claims::display_name(assertion)?);

            account
                .validate()
                .map_err(|e| AuthError::InvalidAccount(e.to_string()))?;
            linker.store().insert_account(&account).await?;
            Ok(LoginOutcome::SignedIn(account))
        }
    }
}
