use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::GroupSource;

/// Linkage marker tying a local account to an external identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLogin {
    /// Authentication-type tag of the external provider (a Windows-integrated
    /// deployment typically uses the identity-server authority here).
    pub authentication_type: String,
    /// Stable subject identifier issued by the external provider.
    pub external_id: String,
}

/// A single group membership on an account, with provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupAssignment {
    pub alias: String,
    pub source: GroupSource,
}

/// A back-office user account.
///
/// Created by the account linker on first successful external login and
/// updated on every subsequent login. Persistence is owned by the
/// [`DirectoryStore`](crate::store::DirectoryStore); the linker only mutates
/// the in-memory object.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BackOfficeAccount {
    pub id: Uuid,
    /// Unique login name. Must be non-empty before the account is persisted;
    /// derived from a `DOMAIN\username`-shaped claim.
    #[validate(length(min = 1, max = 255))]
    pub username: String,
    /// Display name, refreshed from the external assertion on repeat logins.
    pub name: Option<String>,
    /// Assigned group aliases with provenance.
    pub groups: Vec<GroupAssignment>,
    pub external_login: ExternalLogin,
    /// Back-office UI culture, e.g. `en-US`. Defaulted from the auto-link
    /// policy on first link when unset.
    pub culture: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BackOfficeAccount {
    /// Create a fresh, uncommitted account for an external identity.
    ///
    /// The username is intentionally empty: the account linker sets it from
    /// the assertion before the account is persisted.
    pub fn auto_linked(
        authentication_type: impl Into<String>,
        external_id: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: String::new(),
            name: None,
            groups: Vec::new(),
            external_login: ExternalLogin {
                authentication_type: authentication_type.into(),
                external_id: external_id.into(),
            },
            culture: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the account already holds the given group alias.
    pub fn has_group(&self, alias: &str) -> bool {
        self.groups.iter().any(|g| g.alias == alias)
    }

    /// Assign a group alias. A no-op if the alias is already assigned: the
    /// existing assignment (and its provenance) wins, so a repeated
    /// auto-link never downgrades a manual grant.
    pub fn assign_group(&mut self, alias: impl Into<String>, source: GroupSource) {
        let alias = alias.into();
        if !self.has_group(&alias) {
            self.groups.push(GroupAssignment { alias, source });
        }
    }

    /// Remove auto-link-sourced assignments whose alias is not in `keep`.
    /// Manual assignments are never removed.
    pub fn retain_auto_linked(&mut self, keep: &std::collections::BTreeSet<String>) {
        self.groups
            .retain(|g| g.source != GroupSource::AutoLink || keep.contains(&g.alias));
    }

    /// The assigned aliases as an ordered set, ignoring provenance.
    pub fn group_aliases(&self) -> std::collections::BTreeSet<String> {
        self.groups.iter().map(|g| g.alias.clone()).collect()
    }

    /// Stage the account for a write by refreshing `updated_at`.
    ///
    /// The directory store may diff-on-write; touching the timestamp makes an
    /// otherwise field-identical repeat login visible as a change.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
