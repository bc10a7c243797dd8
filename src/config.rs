//! Configuration for the back-office SSO subsystem.
//!
//! These are static deployment parameters, loaded from TOML:
//!
//! ```toml
//! authority = "https://login.example.test/"
//! redirect_uri = "https://cms.example.test/backoffice/"
//! auth_error_uri = "/authentication-error"
//! caption = "Corporate login"
//!
//! [auto_link]
//! enabled = true
//! default_groups = []
//! sync_groups_on_login = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {1}: {0}")]
    Io(std::io::Error, std::path::PathBuf),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Configuration validation error: {0}")]
    Validation(String),
}

/// SSO deployment configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SsoConfig {
    /// Location of the OpenID Connect identity server. Also used as the
    /// authentication-type tag on external-login linkages.
    pub authority: String,

    /// Location of the back office; where the identity server redirects to
    /// on login and logout.
    pub redirect_uri: String,

    /// Location of the authentication error page. May be an absolute URL or
    /// a site-relative path.
    pub auth_error_uri: String,

    /// Text shown on the back-office login button ("Login with {caption}").
    #[serde(default = "default_caption")]
    pub caption: String,

    /// Login button style class.
    #[serde(default = "default_style")]
    pub style: String,

    /// Login button icon class.
    #[serde(default = "default_icon")]
    pub icon: String,

    /// Auto-linking policy.
    #[serde(default)]
    pub auto_link: AutoLinkConfig,
}

/// Auto-linking policy: whether and how local accounts are created and
/// updated from external identities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AutoLinkConfig {
    /// Automatically create a local account the first time an external
    /// identity logs in. When disabled, unknown identities are redirected to
    /// the error page instead.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Group aliases assigned to every auto-linked account, independent of
    /// role claims. Empty means no default groups.
    #[serde(default)]
    pub default_groups: Vec<String>,

    /// Back-office culture for auto-linked accounts, e.g. `en-US`.
    #[serde(default)]
    pub default_culture: Option<String>,

    /// Remove auto-link-sourced group assignments that no longer match any
    /// role claim on repeat logins. Off by default: the historical behavior
    /// is accumulate-only, so a user removed from an external group keeps
    /// the local group until an administrator intervenes. Manually granted
    /// groups are never removed either way.
    #[serde(default)]
    pub sync_groups_on_login: bool,
}

impl Default for AutoLinkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            default_groups: Vec::new(),
            default_culture: None,
            sync_groups_on_login: false,
        }
    }
}

fn default_caption() -> String {
    "OpenId Connect".to_string()
}

fn default_style() -> String {
    "btn-microsoft".to_string()
}

fn default_icon() -> String {
    "fa-windows".to_string()
}

fn default_true() -> bool {
    true
}

impl SsoConfig {
    /// Load and validate configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Io(e, path.as_ref().to_path_buf()))?;
        Self::from_str(&contents)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_str(contents: &str) -> Result<Self, ConfigError> {
        let config: SsoConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.authority)
            .map_err(|e| ConfigError::Validation(format!("invalid authority URL: {e}")))?;
        Url::parse(&self.redirect_uri)
            .map_err(|e| ConfigError::Validation(format!("invalid redirect_uri URL: {e}")))?;
        if self.auth_error_uri.is_empty() {
            return Err(ConfigError::Validation(
                "auth_error_uri must not be empty".to_string(),
            ));
        }
        for alias in &self.auto_link.default_groups {
            if alias.is_empty() {
                return Err(ConfigError::Validation(
                    "auto_link.default_groups must not contain empty aliases".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
        authority = "https://login.example.test/"
        redirect_uri = "https://cms.example.test/backoffice/"
        auth_error_uri = "/authentication-error"
    "#;

    #[test]
    fn test_minimal_config_gets_defaults() {
        let config = SsoConfig::from_str(MINIMAL).unwrap();
        assert_eq!(config.caption, "OpenId Connect");
        assert_eq!(config.style, "btn-microsoft");
        assert_eq!(config.icon, "fa-windows");
        assert!(config.auto_link.enabled);
        assert!(config.auto_link.default_groups.is_empty());
        assert!(config.auto_link.default_culture.is_none());
        assert!(!config.auto_link.sync_groups_on_login);
    }

    #[test]
    fn test_invalid_authority_rejected() {
        let toml = r#"
            authority = "not a url"
            redirect_uri = "https://cms.example.test/backoffice/"
            auth_error_uri = "/authentication-error"
        "#;
        assert!(matches!(
            SsoConfig::from_str(toml),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_error_uri_rejected() {
        let toml = r#"
            authority = "https://login.example.test/"
            redirect_uri = "https://cms.example.test/backoffice/"
            auth_error_uri = ""
        "#;
        assert!(matches!(
            SsoConfig::from_str(toml),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let toml = format!("{MINIMAL}\nunexpected = true\n");
        assert!(matches!(
            SsoConfig::from_str(&toml),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_auto_link_section_parses() {
        let toml = r#"
            authority = "https://login.example.test/"
            redirect_uri = "https://cms.example.test/backoffice/"
            auth_error_uri = "/authentication-error"

            [auto_link]
            enabled = false
            default_groups = ["writers"]
            default_culture = "en-US"
            sync_groups_on_login = true
        "#;
        let config = SsoConfig::from_str(toml).unwrap();
        assert!(!config.auto_link.enabled);
        assert_eq!(config.auto_link.default_groups, ["writers"]);
        assert_eq!(config.auto_link.default_culture.as_deref(), Some("en-US"));
        assert!(config.auto_link.sync_groups_on_login);
    }
}
