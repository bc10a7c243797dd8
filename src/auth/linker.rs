//! Account linking: translating a validated external identity into a local
//! back-office account.
//!
//! The linker exposes the two hooks the surrounding login framework invokes
//! after identity validation: [`AccountLinker::on_auto_link`] when the
//! account does not exist locally yet, and
//! [`AccountLinker::on_external_login`] on every subsequent login. Both
//! mutate the in-memory account only; persistence happens in
//! [`complete_external_login`](super::complete_external_login) after the
//! hook returns.

use std::collections::BTreeSet;

use super::{AuthError, ExternalAssertion, GateDecision, claims, gate, groups};
use crate::{
    config::{AutoLinkConfig, SsoConfig},
    models::{BackOfficeAccount, GroupSource},
    store::SharedDirectoryStore,
};

/// Policy object implementing the external sign-in hooks.
///
/// Receives its directory-store handle and auto-link policy explicitly;
/// nothing here reaches for ambient application state.
pub struct AccountLinker {
    store: SharedDirectoryStore,
    auto_link: AutoLinkConfig,
    error_location: String,
}

impl AccountLinker {
    pub fn new(store: SharedDirectoryStore, config: &SsoConfig) -> Self {
        Self {
            store,
            auto_link: config.auto_link.clone(),
            error_location: config.auth_error_uri.clone(),
        }
    }

    pub fn store(&self) -> &SharedDirectoryStore {
        &self.store
    }

    pub fn auto_link(&self) -> &AutoLinkConfig {
        &self.auto_link
    }

    pub fn error_location(&self) -> &str {
        &self.error_location
    }

    /// Mid-protocol authorization-evidence check: requires at least one
    /// role claim, redirecting to the error page otherwise.
    pub fn on_before_final_sign_in(&self, assertion: &ExternalAssertion) -> GateDecision {
        gate::check_authorization_evidence(assertion, &self.error_location)
    }

    /// Protocol-layer authentication failure.
    pub fn on_authentication_failed(&self) -> GateDecision {
        gate::on_authentication_failed(&self.error_location)
    }

    /// First-time link: the account does not exist locally yet.
    ///
    /// Projects resolved groups plus the policy's default groups onto the
    /// uncommitted account, then sets the username from the assertion. The
    /// display name is defaulted by the login flow, and the flow persists
    /// the account after this returns.
    pub async fn on_auto_link(
        &self,
        account: &mut BackOfficeAccount,
        assertion: &ExternalAssertion,
    ) -> Result<(), AuthError> {
        for alias in &self.auto_link.default_groups {
            account.assign_group(alias.clone(), GroupSource::AutoLink);
        }
        let resolved = self.project_groups(account, assertion).await?;

        account.username = claims::account_name(assertion)?;
        if account.culture.is_none() {
            account.culture = self.auto_link.default_culture.clone();
        }

        tracing::info!(
            username = %account.username,
            external_id = %account.external_login.external_id,
            groups = ?resolved,
            "Auto-linked new back-office account"
        );
        Ok(())
    }

    /// Repeat login: the account is already linked.
    ///
    /// Re-projects groups from the current role claims (keeping membership
    /// synchronized with the identity provider on every login), refreshes
    /// the username and display name (name changes, promotions), and stages
    /// the account for write. Returns `true` to continue the login: the
    /// authorization veto already happened at the gate.
    pub async fn on_external_login(
        &self,
        account: &mut BackOfficeAccount,
        assertion: &ExternalAssertion,
    ) -> Result<bool, AuthError> {
        account.touch();

        let resolved = self.project_groups(account, assertion).await?;

        account.username = claims::account_name(assertion)?;
        account.name = Some(claims::display_name(assertion)?);

        tracing::debug!(
            username = %account.username,
            external_id = %account.external_login.external_id,
            groups = ?resolved,
            sync = self.auto_link.sync_groups_on_login,
            "Updated linked back-office account on login"
        );
        Ok(true)
    }

    /// Resolve role claims against the full local group set (enumerated
    /// fresh from the store) and apply them to the account.
    ///
    /// Accumulate-only by default: matched aliases are added and nothing is
    /// removed. With `sync_groups_on_login` set, auto-link-sourced
    /// assignments that no longer match are dropped; manual grants are kept
    /// either way.
    async fn project_groups(
        &self,
        account: &mut BackOfficeAccount,
        assertion: &ExternalAssertion,
    ) -> Result<BTreeSet<String>, AuthError> {
        let local_groups = self.store.all_groups().await?;
        let roles = claims::role_values(assertion);
        let resolved = groups::resolve(&local_groups, &roles);

        if self.auto_link.sync_groups_on_login {
            let mut keep = resolved.clone();
            keep.extend(self.auto_link.default_groups.iter().cloned());
            account.retain_auto_linked(&keep);
        }
        for alias in &resolved {
            account.assign_group(alias.clone(), GroupSource::AutoLink);
        }
        Ok(resolved)
    }
}
