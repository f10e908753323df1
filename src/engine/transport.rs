//! HTTP transport for the engine control-plane API.
//!
//! All calls attach the Basic-Auth header plus accept/cache-busting headers
//! and come back as typed results: a parsed JSON payload or a
//! [`TransportError`]. Expected HTTP-level failures are never raised as
//! panics; panicking is reserved for programmer errors such as malformed
//! path construction.
//!
//! There is deliberately no retry at this layer. Retries, if desired, are a
//! caller responsibility.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, CACHE_CONTROL, PRAGMA};
use reqwest::{Client as HttpClient, Method};
use serde_json::Value;
use tracing::{debug, warn};

use super::auth::Credentials;
use crate::error::TransportError;

/// Seam between the client and the wire.
///
/// Production uses [`HttpTransport`]; tests script responses through a mock.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue one authenticated request for a path relative to the base URL.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, TransportError>;

    async fn get(&self, path: &str) -> Result<Value, TransportError> {
        self.request(Method::GET, path, None).await
    }

    async fn post(&self, path: &str, body: Option<Value>) -> Result<Value, TransportError> {
        self.request(Method::POST, path, body).await
    }
}

/// reqwest-backed transport bound to one resolved credential set.
pub struct HttpTransport {
    http: HttpClient,
    credentials: Credentials,
    auth_header: String,
}

impl HttpTransport {
    /// Default whole-request timeout. The core enforces nothing beyond this;
    /// see the concurrency notes on [`super::EngineClient`].
    pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;
    pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;

    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self::with_timeouts(
            credentials,
            Duration::from_millis(Self::DEFAULT_TIMEOUT_MS),
            Duration::from_millis(Self::DEFAULT_CONNECT_TIMEOUT_MS),
        )
    }

    #[must_use]
    pub fn with_timeouts(credentials: Credentials, timeout: Duration, connect_timeout: Duration) -> Self {
        let http = HttpClient::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        let auth_header = credentials.basic_auth_header();
        Self {
            http,
            credentials,
            auth_header,
        }
    }

    fn url_for(&self, path: &str) -> String {
        // Relative paths are a programmer error, not a runtime condition.
        debug_assert!(path.starts_with('/'), "engine paths must start with '/'");
        format!("{}{}", self.credentials.base_url(), path)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, TransportError> {
        let url = self.url_for(path);
        debug!(%method, %url, "engine request");

        let mut request = self
            .http
            .request(method, &url)
            .header(AUTHORIZATION, &self.auth_header)
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-cache")
            .header(PRAGMA, "no-cache");

        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|err| TransportError::Network {
            url: url.clone(),
            reason: err.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            debug!(%url, status = status.as_u16(), "engine request rejected");
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| TransportError::Parse(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::auth::CredentialOverrides;
    use crate::app::config::EngineConfig;

    fn transport_for(base_url: &str) -> HttpTransport {
        let overrides = CredentialOverrides {
            base_url: Some(base_url.into()),
            ..CredentialOverrides::default()
        };
        HttpTransport::new(Credentials::resolve(&EngineConfig::default(), &overrides))
    }

    #[test]
    fn url_joins_base_and_path() {
        let transport = transport_for("http://localhost:8080/api/v1");
        assert_eq!(
            transport.url_for("/ping"),
            "http://localhost:8080/api/v1/ping"
        );
    }

    #[test]
    #[should_panic(expected = "engine paths must start with '/'")]
    #[cfg(debug_assertions)]
    fn relative_path_is_a_programmer_error() {
        let transport = transport_for("http://localhost:8080/api/v1");
        let _ = transport.url_for("ping");
    }
}
