//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with an environment variable
//! override for the engine password (never stored in the file by policy).
//! Every field carries a default, so a missing file resolves to the stock
//! local-engine setup; precedence is CLI override > file/env > default,
//! applied once at credential resolution.

use serde::Deserialize;
use std::path::Path;
use url::Url;

use crate::engine::auth;
use crate::error::{ConfigError, Result};

use super::logging::LoggingConfig;

/// Environment variable consulted for the engine password.
pub const PASSWORD_ENV: &str = "ENGINE_PASSWORD";

/// Main application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Connection settings for the remote engine.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// API base URL, including the versioned base path.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_password")]
    pub password: String,
    /// Probe the engine automatically before rendering status.
    #[serde(default = "default_true")]
    pub auto_connect: bool,
    /// Whole-request timeout for engine calls.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            username: default_username(),
            password: default_password(),
            auto_connect: true,
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
        }
    }
}

impl Config {
    /// Load and validate a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let mut config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;

        // The password may come from the environment instead of the file.
        if let Ok(password) = std::env::var(PASSWORD_ENV) {
            config.engine.password = password;
        }

        config.validate()?;

        Ok(config)
    }

    /// Load the file if present, otherwise fall back to the stock defaults.
    /// The layered credential model treats the file as optional.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            let mut config = Self::default();
            if let Ok(password) = std::env::var(PASSWORD_ENV) {
                config.engine.password = password;
            }
            Ok(config)
        }
    }

    fn validate(&self) -> Result<()> {
        if self.engine.api_url.is_empty() {
            return Err(ConfigError::MissingField { field: "api_url" }.into());
        }
        if let Err(err) = Url::parse(&self.engine.api_url) {
            return Err(ConfigError::InvalidValue {
                field: "api_url",
                reason: err.to_string(),
            }
            .into());
        }
        if self.engine.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than zero".into(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn default_api_url() -> String {
    auth::DEFAULT_API_URL.into()
}

fn default_username() -> String {
    auth::DEFAULT_USERNAME.into()
}

fn default_password() -> String {
    auth::DEFAULT_PASSWORD.into()
}

fn default_true() -> bool {
    true
}

fn default_timeout_ms() -> u64 {
    crate::engine::transport::HttpTransport::DEFAULT_TIMEOUT_MS
}

fn default_connect_timeout_ms() -> u64 {
    crate::engine::transport::HttpTransport::DEFAULT_CONNECT_TIMEOUT_MS
}
