use std::fmt;

use serde::{Deserialize, Serialize};

/// A local back-office authorization group.
///
/// Groups are owned by the host CMS and are read-only from this crate's
/// perspective: they are enumerated fresh on every login and matched against
/// external role claims by display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalGroup {
    /// Human-readable display name. Role claims are matched against this
    /// value by exact, case-sensitive equality.
    pub name: String,
    /// Stable identifier used for group assignment on accounts.
    pub alias: String,
}

impl LocalGroup {
    pub fn new(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: alias.into(),
        }
    }
}

/// Source of a group assignment (how it was created).
///
/// Auto-link-sourced assignments may be removed when `sync_groups_on_login`
/// is enabled and the external role claim no longer matches; manual
/// assignments are always preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupSource {
    /// Granted by an administrator in the back office
    #[default]
    Manual,
    /// Granted by the account linker from an external role claim
    AutoLink,
}

impl GroupSource {
    /// Convert to string for storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::AutoLink => "auto_link",
        }
    }

    /// Parse from a stored string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "manual" => Some(Self::Manual),
            "auto_link" => Some(Self::AutoLink),
            _ => None,
        }
    }
}

impl fmt::Display for GroupSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_source_round_trips_storage_string() {
        for source in [GroupSource::Manual, GroupSource::AutoLink] {
            assert_eq!(GroupSource::from_str(source.as_str()), Some(source));
        }
        assert_eq!(GroupSource::from_str("scim"), None);
    }

    #[test]
    fn test_group_source_serializes_snake_case() {
        let value = serde_json::to_value(GroupSource::AutoLink).unwrap();
        assert_eq!(value, serde_json::json!("auto_link"));
    }
}
