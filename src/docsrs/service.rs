//! Cached page fetching with stale-serving and background refresh
//!
//! This is the single place where cache staleness becomes observable
//! behavior: callers may transiently see a page up to the stale grace
//! window old, never older. A stale hit returns immediately and spawns a
//! refresh task; at most one refresh is in flight per key.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::cache::ResponseCache;
use crate::fetch::{RetryPolicy, TextFetcher, with_retry};
use crate::fetch::error::FetchError;

/// Fetches remote pages through the shared response cache.
#[derive(Clone)]
pub struct DocFetchService {
    fetcher: Arc<dyn TextFetcher>,
    cache: Arc<Mutex<ResponseCache>>,
    retry: RetryPolicy,
    /// Keys with a background refresh currently in flight.
    inflight: Arc<Mutex<HashSet<String>>>,
}

impl DocFetchService {
    pub fn new(
        fetcher: Arc<dyn TextFetcher>,
        cache: Arc<Mutex<ResponseCache>>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            fetcher,
            cache,
            retry,
            inflight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Fetch a page body, cache key is the URL itself.
    ///
    /// Fresh hit: returned as-is. Stale hit: returned as-is while a
    /// background refresh is triggered; refresh failures are logged and
    /// swallowed since a usable value was already delivered. Miss: one
    /// synchronous fetch (with retry), stored and returned; failures
    /// propagate.
    pub async fn fetch_page(&self, url: &str) -> Result<Arc<str>, FetchError> {
        let (cached, stale) = {
            let mut cache = self.cache.lock().await;
            let cached = cache.get(url);
            let stale = cache.is_stale(url);
            (cached, stale)
        };

        if let Some(body) = cached {
            if stale {
                self.spawn_refresh(url).await;
            }
            return Ok(body);
        }

        let fetcher = Arc::clone(&self.fetcher);
        let body: Arc<str> =
            with_retry(self.retry, || fetcher.fetch_text(url)).await?.into();
        self.cache.lock().await.set(url, Arc::clone(&body));
        Ok(body)
    }

    /// Fetch and JSON-decode a page body through the same cache.
    pub async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
    ) -> Result<T, FetchError> {
        let body = self.fetch_page(url).await?;
        crate::fetch::client::decode_json(url, &body)
    }

    async fn spawn_refresh(&self, url: &str) {
        {
            let mut inflight = self.inflight.lock().await;
            if !inflight.insert(url.to_string()) {
                // A refresh for this key is already running.
                return;
            }
        }

        let fetcher = Arc::clone(&self.fetcher);
        let cache = Arc::clone(&self.cache);
        let inflight = Arc::clone(&self.inflight);
        let retry = self.retry;
        let url = url.to_string();

        tokio::spawn(async move {
            match with_retry(retry, || fetcher.fetch_text(&url)).await {
                Ok(body) => {
                    cache.lock().await.set(&url, body.into());
                    tracing::debug!(url = %url, "background refresh completed");
                }
                Err(error) => {
                    tracing::warn!(url = %url, error = %error, "background refresh failed");
                }
            }
            inflight.lock().await.remove(&url);
        });
    }
}
