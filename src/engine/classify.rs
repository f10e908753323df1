//! Failure classification for operator display.
//!
//! Transport failures are matched on structure first (status code, network
//! flag, parse flag). The ordered substring fallback is kept only for
//! string-shaped failures that originate outside the transport, e.g. from
//! underlying libraries.

use thiserror::Error;

/// Fixed category set every failure is normalized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Host unreachable, or the request could not be sent at all.
    NetworkUnreachable,
    /// HTTP 401, rejected credentials.
    AuthFailure,
    /// HTTP 404, typically an API-version mismatch.
    NotFound,
    /// Anything else, including payloads that fail to parse.
    Unexpected,
}

/// A failure normalized for uniform handling by the display layer.
///
/// Ephemeral: produced once per failed operation, never retained by the
/// client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ClassifiedError {
    pub category: ErrorCategory,
    pub message: String,
}

/// Raw message markers that indicate the request never reached the engine.
/// `Failed to fetch` is the marker the original operator UI surfaced;
/// the rest cover the HTTP client underneath this one.
const NETWORK_MARKERS: &[&str] = &[
    "Failed to fetch",
    "failed to fetch",
    "error sending request",
    "connection refused",
    "dns error",
];

/// Classify a typed transport failure. First match wins.
pub fn classify(err: &crate::error::TransportError, base_url: &str) -> ClassifiedError {
    use crate::error::TransportError;

    match err {
        TransportError::Network { .. } => network_unreachable(base_url),
        TransportError::Status { status: 401 } => auth_failure(),
        TransportError::Status { status: 404 } => not_found(),
        other => unexpected(&other.to_string()),
    }
}

/// Ordered substring fallback for failures the transport did not originate.
pub fn classify_text(raw: &str, base_url: &str) -> ClassifiedError {
    if NETWORK_MARKERS.iter().any(|marker| raw.contains(marker)) {
        network_unreachable(base_url)
    } else if raw.contains("401") {
        auth_failure()
    } else if raw.contains("404") {
        not_found()
    } else {
        unexpected(raw)
    }
}

fn network_unreachable(base_url: &str) -> ClassifiedError {
    ClassifiedError {
        category: ErrorCategory::NetworkUnreachable,
        message: format!("cannot reach the trading engine; make sure it is running at {base_url}"),
    }
}

fn auth_failure() -> ClassifiedError {
    ClassifiedError {
        category: ErrorCategory::AuthFailure,
        message: "authentication failed; check the configured username and password".into(),
    }
}

fn not_found() -> ClassifiedError {
    ClassifiedError {
        category: ErrorCategory::NotFound,
        message: "API endpoint not found; check the engine version".into(),
    }
}

pub(crate) fn unexpected(raw: &str) -> ClassifiedError {
    ClassifiedError {
        category: ErrorCategory::Unexpected,
        message: format!("unexpected engine failure: {raw}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;

    const BASE: &str = "http://localhost:8080/api/v1";

    #[test]
    fn network_failure_names_the_base_url() {
        let err = TransportError::Network {
            url: format!("{BASE}/ping"),
            reason: "connection refused".into(),
        };
        let classified = classify(&err, BASE);
        assert_eq!(classified.category, ErrorCategory::NetworkUnreachable);
        assert!(classified.message.contains(BASE));
    }

    #[test]
    fn status_codes_map_on_structure() {
        let auth = classify(&TransportError::Status { status: 401 }, BASE);
        assert_eq!(auth.category, ErrorCategory::AuthFailure);

        let missing = classify(&TransportError::Status { status: 404 }, BASE);
        assert_eq!(missing.category, ErrorCategory::NotFound);

        let other = classify(&TransportError::Status { status: 500 }, BASE);
        assert_eq!(other.category, ErrorCategory::Unexpected);
        assert!(other.message.contains("500"));
    }

    #[test]
    fn parse_failures_are_unexpected() {
        let err = TransportError::Parse("expected value at line 1".into());
        assert_eq!(classify(&err, BASE).category, ErrorCategory::Unexpected);
    }

    #[test]
    fn text_fallback_matches_in_order() {
        let net = classify_text("Failed to fetch http://localhost:8080", BASE);
        assert_eq!(net.category, ErrorCategory::NetworkUnreachable);

        let auth = classify_text("Server responded with status: 401", BASE);
        assert_eq!(auth.category, ErrorCategory::AuthFailure);

        let missing = classify_text("Server responded with status: 404", BASE);
        assert_eq!(missing.category, ErrorCategory::NotFound);

        let other = classify_text("boom", BASE);
        assert_eq!(other.category, ErrorCategory::Unexpected);
        assert!(other.message.contains("boom"));
    }

    #[test]
    fn first_marker_match_wins_over_status_digits() {
        // A network marker containing "401" still classifies as unreachable.
        let mixed = classify_text("Failed to fetch: upstream said 401", BASE);
        assert_eq!(mixed.category, ErrorCategory::NetworkUnreachable);
    }

    #[test]
    fn stringified_transport_failure_classifies_identically() {
        // The Display shape of a typed failure must survive the text path.
        let typed = TransportError::Status { status: 401 };
        let via_struct = classify(&typed, BASE);
        let via_text = classify_text(&typed.to_string(), BASE);
        assert_eq!(via_struct.category, via_text.category);
    }
}
