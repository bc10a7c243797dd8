//! OpenID Connect single-sign-on auto-linking for a content-management
//! back office.
//!
//! This crate is the policy layer that sits on top of an already-validated
//! OpenID Connect login: it checks that the external assertion carries
//! authorization evidence (role claims), creates or updates the local
//! back-office account, and projects external role claims onto local
//! authorization groups by exact name match.
//!
//! The OIDC protocol itself (token exchange, signature validation,
//! nonce/state handling) is out of scope: callers hand this crate an
//! [`auth::ExternalAssertion`] only after protocol validation has succeeded.
//!
//! # Overview
//!
//! ```text
//! login completes → gate (role evidence?) → find account by external login
//!     → new:      on_auto_link  (groups, username, defaults)  → insert
//!     → existing: on_external_login (groups, username, name)  → update
//! ```
//!
//! The [`auth::AccountLinker`] receives its directory-store handle and
//! auto-link policy explicitly; there is no ambient service lookup.

pub mod auth;
pub mod config;
pub mod models;
pub mod store;

pub use auth::{AccountLinker, AuthError, ExternalAssertion, LoginOutcome};
pub use config::{AutoLinkConfig, SsoConfig};
pub use models::{BackOfficeAccount, GroupSource, LocalGroup};
pub use store::{DirectoryStore, MemoryDirectoryStore, SharedDirectoryStore};
