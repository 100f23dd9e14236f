//! Cached, retried GETs against the crates.io API
//!
//! All requests route through the shared [`DocFetchService`], so registry
//! responses get the same freshness windows, stale serving and retry
//! budget as documentation pages. Cache keys are the request URLs.

use crate::docsrs::DocFetchService;
use crate::fetch::FetchError;
use crate::registry::types::{CrateResponse, DependenciesResponse, Dependency, SearchResponse};

pub const CRATES_IO_API_BASE: &str = "https://crates.io/api/v1";

/// Client for the registry's JSON API.
#[derive(Clone)]
pub struct RegistryClient {
    docs: DocFetchService,
}

impl RegistryClient {
    pub fn new(docs: DocFetchService) -> Self {
        Self { docs }
    }

    /// Package metadata plus its full published version list.
    pub async fn crate_info(&self, name: &str) -> Result<CrateResponse, FetchError> {
        let url = format!("{CRATES_IO_API_BASE}/crates/{name}");
        self.docs.fetch_json(&url).await
    }

    /// Dependency list for one pinned version.
    pub async fn dependencies(
        &self,
        name: &str,
        version: &str,
    ) -> Result<Vec<Dependency>, FetchError> {
        let url = format!("{CRATES_IO_API_BASE}/crates/{name}/{version}/dependencies");
        let response: DependenciesResponse = self.docs.fetch_json(&url).await?;
        Ok(response.dependencies)
    }

    /// Keyword search against the registry.
    pub async fn search(&self, query: &str, per_page: usize) -> Result<SearchResponse, FetchError> {
        let url = reqwest::Url::parse_with_params(
            &format!("{CRATES_IO_API_BASE}/crates"),
            &[("q", query), ("per_page", &per_page.to_string())],
        )
        .expect("static base URL with encoded params");
        self.docs.fetch_json(url.as_str()).await
    }
}
