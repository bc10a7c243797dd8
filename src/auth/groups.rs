//! Role-claim to local-group projection.

use std::collections::BTreeSet;

use crate::models::LocalGroup;

/// Resolve external role values to local group aliases.
///
/// A group's alias is included when any role value exactly equals the
/// group's display name; matching is case-sensitive with no fuzzy or
/// hierarchical fallback. An empty result is valid and simply means no
/// role matched.
///
/// O(groups × roles); both counts are small and this runs once per login,
/// so no index is built.
pub fn resolve(groups: &[LocalGroup], roles: &[String]) -> BTreeSet<String> {
    let mut aliases = BTreeSet::new();
    for group in groups {
        for role in roles {
            if group.name == *role {
                aliases.insert(group.alias.clone());
            }
        }
    }
    aliases
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn groups() -> Vec<LocalGroup> {
        vec![
            LocalGroup::new("Editors", "editors"),
            LocalGroup::new("Admins", "admins"),
            LocalGroup::new("Translators", "translators"),
        ]
    }

    #[test]
    fn test_exact_match_includes_alias() {
        let roles = vec!["Editors".to_string()];
        let resolved = resolve(&groups(), &roles);
        assert_eq!(resolved, BTreeSet::from(["editors".to_string()]));
    }

    #[rstest]
    #[case("editors")] // wrong case
    #[case("Editor")] // prefix
    #[case("Editors ")] // trailing whitespace
    fn test_inexact_match_excluded(#[case] role: &str) {
        assert!(resolve(&groups(), &[role.to_string()]).is_empty());
    }

    #[test]
    fn test_result_independent_of_role_order() {
        let forward = vec!["Editors".to_string(), "Admins".to_string()];
        let backward = vec!["Admins".to_string(), "Editors".to_string()];
        assert_eq!(resolve(&groups(), &forward), resolve(&groups(), &backward));
    }

    #[test]
    fn test_duplicate_roles_resolve_once() {
        let roles = vec!["Admins".to_string(), "Admins".to_string()];
        assert_eq!(
            resolve(&groups(), &roles),
            BTreeSet::from(["admins".to_string()])
        );
    }

    #[test]
    fn test_pure_function_idempotent() {
        let roles = vec!["Translators".to_string(), "Unknown".to_string()];
        let first = resolve(&groups(), &roles);
        let second = resolve(&groups(), &roles);
        assert_eq!(first, second);
        assert_eq!(first, BTreeSet::from(["translators".to_string()]));
    }

    #[test]
    fn test_no_groups_or_no_roles_is_empty() {
        assert!(resolve(&[], &["Editors".to_string()]).is_empty());
        assert!(resolve(&groups(), &[]).is_empty());
    }
}
