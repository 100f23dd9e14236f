//! HTTP client with per-request deadlines
//!
//! [`TextFetcher`] is the seam the rest of the system depends on; tests
//! substitute canned fetchers, production uses [`HttpFetcher`] backed by
//! reqwest. Retry logic lives in [`crate::fetch::retry`], not here: this
//! type performs exactly one request per call.

use std::time::Duration;

use async_trait::async_trait;

use crate::fetch::error::FetchError;

/// A single-attempt text fetch with a hard deadline.
#[async_trait]
pub trait TextFetcher: Send + Sync {
    /// Issue one HTTP GET and return the response body as text.
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Production fetcher backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher whose requests all carry the given deadline.
    pub fn new(timeout: Duration) -> Self {
        let client = Self::build_http_client();
        Self { client, timeout }
    }

    /// Build the HTTP client with proper configuration
    fn build_http_client() -> reqwest::Client {
        let user_agent = Self::format_user_agent();

        tracing::info!("Creating HTTP client with User-Agent: {}", user_agent);

        reqwest::Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .expect("Failed to create HTTP client") // HTTP client creation should not fail with proper configuration
    }

    /// Format the user-agent string for API compliance
    fn format_user_agent() -> String {
        format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }
}

#[async_trait]
impl TextFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| classify_request_error(url, self.timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| classify_request_error(url, self.timeout, e))?;

        tracing::debug!(url = %url, bytes = body.len(), "fetched");
        Ok(body)
    }
}

fn classify_request_error(url: &str, timeout: Duration, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
            timeout,
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            source: error,
        }
    }
}

/// Decode a fetched body as JSON, attributing failures to the source URL.
pub fn decode_json<T: serde::de::DeserializeOwned>(url: &str, body: &str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Decode {
        url: url.to_string(),
        source: e,
    })
}
