//! Credential resolution and Basic-Auth encoding.
//!
//! Credentials are resolved exactly once, at client construction, by layering
//! explicit overrides over the supplied configuration over the built-in
//! defaults. The resolved record is read-only for the client's lifetime.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::app::config::EngineConfig;

/// Stock API base path for a locally running engine.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";

/// Stock username the engine ships with.
pub const DEFAULT_USERNAME: &str = "freqtrader";

/// Stock password the engine ships with. Operators are expected to override
/// this for anything beyond a local dry-run setup.
pub const DEFAULT_PASSWORD: &str = "cA8mn49B@T";

/// Resolved connection credentials for the remote engine.
///
/// The password is intentionally unreadable from outside this module; the
/// only thing callers can obtain from it is the derived auth header.
#[derive(Clone)]
pub struct Credentials {
    base_url: String,
    username: String,
    password: String,
}

/// Optional per-field overrides, applied above the supplied configuration.
#[derive(Debug, Clone, Default)]
pub struct CredentialOverrides {
    pub base_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    /// Resolve credentials from layered sources: override > config > default.
    ///
    /// Each field falls back independently. Resolution cannot fail; a fully
    /// empty configuration yields the stock local-engine triple.
    #[must_use]
    pub fn resolve(config: &EngineConfig, overrides: &CredentialOverrides) -> Self {
        Self {
            base_url: layered(
                overrides.base_url.as_deref(),
                &config.api_url,
                DEFAULT_API_URL,
            ),
            username: layered(
                overrides.username.as_deref(),
                &config.username,
                DEFAULT_USERNAME,
            ),
            password: layered(
                overrides.password.as_deref(),
                &config.password,
                DEFAULT_PASSWORD,
            ),
        }
    }

    /// API base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Derive the Basic-Auth header value: `Basic base64(user:pass)`.
    #[must_use]
    pub fn basic_auth_header(&self) -> String {
        let pair = format!("{}:{}", self.username, self.password);
        format!("Basic {}", STANDARD.encode(pair))
    }
}

// The password never travels through Debug output or log fields.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn layered(explicit: Option<&str>, supplied: &str, default: &str) -> String {
    match explicit {
        Some(value) if !value.is_empty() => value.trim_end_matches('/').to_string(),
        _ if !supplied.is_empty() => supplied.trim_end_matches('/').to_string(),
        _ => default.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_config() -> EngineConfig {
        EngineConfig {
            api_url: String::new(),
            username: String::new(),
            password: String::new(),
            ..EngineConfig::default()
        }
    }

    #[test]
    fn resolution_falls_back_to_stock_defaults() {
        let creds = Credentials::resolve(&empty_config(), &CredentialOverrides::default());
        assert_eq!(creds.base_url(), DEFAULT_API_URL);
        assert_eq!(creds.username(), DEFAULT_USERNAME);
    }

    #[test]
    fn override_beats_config_per_field() {
        let mut config = empty_config();
        config.api_url = "http://engine.internal:9090/api/v1".into();
        config.username = "operator".into();

        let overrides = CredentialOverrides {
            username: Some("admin".into()),
            ..CredentialOverrides::default()
        };

        let creds = Credentials::resolve(&config, &overrides);
        // api_url comes from config, username from the override.
        assert_eq!(creds.base_url(), "http://engine.internal:9090/api/v1");
        assert_eq!(creds.username(), "admin");
    }

    #[test]
    fn trailing_slash_is_stripped_from_base_url() {
        let overrides = CredentialOverrides {
            base_url: Some("http://localhost:8080/api/v1/".into()),
            ..CredentialOverrides::default()
        };
        let creds = Credentials::resolve(&empty_config(), &overrides);
        assert_eq!(creds.base_url(), "http://localhost:8080/api/v1");
    }

    #[test]
    fn basic_auth_header_encodes_colon_joined_pair() {
        let overrides = CredentialOverrides {
            username: Some("freqtrader".into()),
            password: Some("secret".into()),
            ..CredentialOverrides::default()
        };
        let creds = Credentials::resolve(&empty_config(), &overrides);
        // base64("freqtrader:secret")
        assert_eq!(creds.basic_auth_header(), "Basic ZnJlcXRyYWRlcjpzZWNyZXQ=");
    }

    #[test]
    fn debug_output_redacts_password() {
        let creds = Credentials::resolve(&empty_config(), &CredentialOverrides::default());
        let rendered = format!("{creds:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains(DEFAULT_PASSWORD));
    }
}
