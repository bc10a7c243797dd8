use serde::{Deserialize, Serialize};

/// Canonical claim-type identifiers.
///
/// These are the WS-Federation claim URIs emitted by Windows-integrated
/// identity servers. A non-Windows deployment can use any identifiers it
/// likes as long as the assertion and the extractor agree.
pub mod claim_types {
    /// `DOMAIN\username`-shaped account name.
    pub const WINDOWS_ACCOUNT_NAME: &str =
        "http://schemas.microsoft.com/ws/2008/06/identity/claims/windowsaccountname";

    /// Human display name.
    pub const NAME: &str = "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name";

    /// Stable subject identifier.
    pub const NAME_ID: &str =
        "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier";

    /// Authorization role; zero or more per assertion.
    pub const ROLE: &str = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";
}

/// A typed (type, value) fact about an external identity.
///
/// Claim types are not unique within an assertion; role claims in particular
/// appear once per group membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub claim_type: String,
    pub value: String,
}

impl Claim {
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }
}

/// A validated external identity assertion.
///
/// Produced once per login attempt by the protocol layer, after
/// cryptographic and protocol validation have already succeeded. Immutable
/// and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalAssertion {
    authentication_type: String,
    claims: Vec<Claim>,
}

impl ExternalAssertion {
    pub fn new(authentication_type: impl Into<String>, claims: Vec<Claim>) -> Self {
        Self {
            authentication_type: authentication_type.into(),
            claims,
        }
    }

    /// The provider's authentication-type tag (typically the identity-server
    /// authority for Windows-integrated deployments).
    pub fn authentication_type(&self) -> &str {
        &self.authentication_type
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// First claim of the given type, in received order.
    pub fn find_first(&self, claim_type: &str) -> Option<&Claim> {
        self.claims.iter().find(|c| c.claim_type == claim_type)
    }

    /// All claims of the given type, in received order, duplicates kept.
    pub fn find_all<'a>(&'a self, claim_type: &'a str) -> impl Iterator<Item = &'a Claim> {
        self.claims.iter().filter(move |c| c.claim_type == claim_type)
    }
}
