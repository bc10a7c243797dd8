use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{DirectoryStore, StoreError, StoreResult};
use crate::models::{BackOfficeAccount, LocalGroup};

/// In-memory directory store (single-node only).
///
/// Suitable for tests and embedded deployments; production hosts back this
/// trait with the CMS's own account database.
pub struct MemoryDirectoryStore {
    groups: RwLock<Vec<LocalGroup>>,
    accounts: RwLock<HashMap<(String, String), BackOfficeAccount>>,
}

impl MemoryDirectoryStore {
    pub fn new() -> Self {
        Self {
            groups: RwLock::new(Vec::new()),
            accounts: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_groups(groups: Vec<LocalGroup>) -> Self {
        Self {
            groups: RwLock::new(groups),
            accounts: RwLock::new(HashMap::new()),
        }
    }

    /// Add a local group (test/bootstrap helper).
    pub async fn add_group(&self, group: LocalGroup) {
        self.groups.write().await.push(group);
    }

    fn key(account: &BackOfficeAccount) -> (String, String) {
        (
            account.external_login.authentication_type.clone(),
            account.external_login.external_id.clone(),
        )
    }
}

impl Default for MemoryDirectoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DirectoryStore for MemoryDirectoryStore {
    async fn all_groups(&self) -> StoreResult<Vec<LocalGroup>> {
        Ok(self.groups.read().await.clone())
    }

    async fn find_by_external_login(
        &self,
        authentication_type: &str,
        external_id: &str,
    ) -> StoreResult<Option<BackOfficeAccount>> {
        let key = (authentication_type.to_string(), external_id.to_string());
        Ok(self.accounts.read().await.get(&key).cloned())
    }

    async fn insert_account(&self, account: &BackOfficeAccount) -> StoreResult<()> {
        let mut accounts = self.accounts.write().await;
        let key = Self::key(account);
        if accounts.contains_key(&key) {
            return Err(StoreError::Conflict(format!(
                "external login '{}' is already linked",
                key.1
            )));
        }
        accounts.insert(key, account.clone());
        Ok(())
    }

    async fn update_account(&self, account: &BackOfficeAccount) -> StoreResult<()> {
        let mut accounts = self.accounts.write().await;
        let key = Self::key(account);
        match accounts.get_mut(&key) {
            Some(existing) => {
                *existing = account.clone();
                Ok(())
            }
            None => Err(StoreError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(external_id: &str) -> BackOfficeAccount {
        let mut account = BackOfficeAccount::auto_linked("https://idp.test/", external_id);
        account.username = external_id.to_string();
        account
    }

    #[tokio::test]
    async fn test_insert_then_find_by_external_login() {
        let store = MemoryDirectoryStore::new();
        store.insert_account(&account("alice")).await.unwrap();

        let found = store
            .find_by_external_login("https://idp.test/", "alice")
            .await
            .unwrap();
        assert_eq!(found.unwrap().username, "alice");

        let missing = store
            .find_by_external_login("https://idp.test/", "bob")
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_double_insert_conflicts() {
        let store = MemoryDirectoryStore::new();
        store.insert_account(&account("alice")).await.unwrap();

        let err = store.insert_account(&account("alice")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_unknown_account_is_not_found() {
        let store = MemoryDirectoryStore::new();
        let err = store.update_account(&account("ghost")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_groups_enumerate_in_insertion_order() {
        let store = MemoryDirectoryStore::with_groups(vec![
            LocalGroup::new("Editors", "editors"),
            LocalGroup::new("Admins", "admins"),
        ]);
        store.add_group(LocalGroup::new("Translators", "translators")).await;

        let groups = store.all_groups().await.unwrap();
        let aliases: Vec<_> = groups.iter().map(|g| g.alias.as_str()).collect();
        assert_eq!(aliases, ["editors", "admins", "translators"]);
    }
}
