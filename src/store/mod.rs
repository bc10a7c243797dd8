//! Directory-store boundary.
//!
//! The host CMS owns accounts and groups; this crate reaches them through
//! the [`DirectoryStore`] trait. Group enumeration is read-only and happens
//! fresh on every login (no caching). Account writes are performed by the
//! login flow after the linker hooks return, never by the hooks themselves.

mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryDirectoryStore;

use crate::models::{BackOfficeAccount, LocalGroup};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Account not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal store error: {0}")]
    Internal(String),
}

/// Handle to the back-office account and group store.
///
/// Implementations provide their own concurrency control (per-account write
/// serialization); this crate takes no locks of its own.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    /// Enumerate all local authorization groups, in stable order.
    async fn all_groups(&self) -> StoreResult<Vec<LocalGroup>>;

    /// Look up an account by its external-login linkage.
    async fn find_by_external_login(
        &self,
        authentication_type: &str,
        external_id: &str,
    ) -> StoreResult<Option<BackOfficeAccount>>;

    /// Persist a newly auto-linked account. Fails with [`StoreError::Conflict`]
    /// if the external login is already linked.
    async fn insert_account(&self, account: &BackOfficeAccount) -> StoreResult<()>;

    /// Persist changes to an existing account.
    async fn update_account(&self, account: &BackOfficeAccount) -> StoreResult<()>;
}

pub type SharedDirectoryStore = Arc<dyn DirectoryStore>;
