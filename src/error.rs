use thiserror::Error;

use crate::engine::classify::ClassifiedError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Transport-level failures, typed so the classifier can match on structure
/// instead of scraping message text.
///
/// Display text keeps the `status: NNN` shape the substring fallback
/// understands, so a stringified transport failure classifies the same as a
/// structured one.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The request never produced a response: host unreachable, connection
    /// refused, DNS failure, or a client-side timeout.
    #[error("failed to fetch {url}: {reason}")]
    Network { url: String, reason: String },

    /// The engine answered with a non-success HTTP status.
    #[error("server responded with status: {status}")]
    Status { status: u16 },

    /// The response body was not valid structured data.
    #[error("invalid response body: {0}")]
    Parse(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Engine(#[from] ClassifiedError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
