//! Typed failures for the fetch layer
//!
//! Every error carries the URL that failed so callers can retry narrower
//! or report something actionable. Classification drives the retry policy:
//! timeouts and server-side errors are transient, everything else is
//! definitive and propagates immediately.

use std::time::Duration;

use thiserror::Error;

/// Failures produced by the fetch layer.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not complete before its deadline.
    #[error("request to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    /// The server answered with a non-success status code.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// Connection-level failure (DNS, TLS, reset, ...).
    #[error("request to {url} failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body was not valid JSON for the expected shape.
    #[error("failed to decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// Whether a retry is likely to succeed. Server-side errors and
    /// timeouts qualify; client errors and decode failures do not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Network { .. } | Self::Decode { .. } => false,
        }
    }

    /// Whether the failure means the resource definitively does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }

    /// The URL the failed operation was addressing.
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url, .. }
            | Self::Status { url, .. }
            | Self::Network { url, .. }
            | Self::Decode { url, .. } => url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> FetchError {
        FetchError::Status {
            url: "https://example.invalid/x".to_string(),
            status: code,
        }
    }

    #[test]
    fn server_errors_and_timeouts_are_transient() {
        assert!(status(500).is_transient());
        assert!(status(503).is_transient());
        assert!(
            FetchError::Timeout {
                url: "https://example.invalid/x".to_string(),
                timeout: Duration::from_secs(1),
            }
            .is_transient()
        );
    }

    #[test]
    fn client_errors_are_permanent() {
        assert!(!status(404).is_transient());
        assert!(!status(400).is_transient());
        assert!(status(404).is_not_found());
        assert!(!status(500).is_not_found());
    }
}
