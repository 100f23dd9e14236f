//! Integration tests for the docsrs MCP service
//!
//! These tests drive the MCP tools end-to-end through the service with an
//! injected stub fetcher serving canned docs.rs and crates.io responses,
//! so no test touches the network. Responses are deserialized back into
//! the typed outputs for validation.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use rmcp::handler::server::tool::Parameters;

use docsrs_mcp::DocsRsService;
use docsrs_mcp::config::ServiceConfig;
use docsrs_mcp::docs::outputs::{
    GetItemDocsOutput, GetItemsDocsOutput, ListCrateItemsOutput, SearchItemsOutput,
};
use docsrs_mcp::docs::tools::{
    GetItemDocsParams, GetItemsDocsParams, ListItemsParams, SearchItemsParams,
};
use docsrs_mcp::fetch::{FetchError, TextFetcher};
use docsrs_mcp::registry::outputs::{
    CrateMetadataOutput, GetDependenciesOutput, ListCrateVersionsOutput, SearchCratesOutput,
};
use docsrs_mcp::registry::tools::{
    GetCrateMetadataParams, GetDependenciesParams, ListCrateVersionsParams, SearchCratesParams,
};

/// Fetcher serving canned pages, answering 404 for everything else.
struct StubFetcher {
    pages: HashMap<String, String>,
    calls: AtomicU32,
}

#[async_trait]
impl TextFetcher for StubFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

fn create_test_service(pages: &[(&str, &str)]) -> (DocsRsService, Arc<StubFetcher>) {
    let fetcher = Arc::new(StubFetcher {
        pages: pages
            .iter()
            .map(|(url, body)| (url.to_string(), body.to_string()))
            .collect(),
        calls: AtomicU32::new(0),
    });
    let service = DocsRsService::with_fetcher(
        ServiceConfig::default(),
        Arc::clone(&fetcher) as Arc<dyn TextFetcher>,
    );
    (service, fetcher)
}

const DEMO_ALL_ITEMS: &str = r#"
    <html><body><main id="main-content">
    <h3 id="structs">Structs</h3>
    <ul class="all-items">
        <li><a href="sync/struct.Mutex.html">sync::Mutex</a></li>
        <li><a href="sync/struct.MutexGuard.html">sync::MutexGuard</a></li>
    </ul>
    <h3 id="functions">Functions</h3>
    <ul class="all-items">
        <li><a href="fn.spawn.html">spawn</a></li>
    </ul>
    </main></body></html>
"#;

const MUTEX_PAGE: &str = r#"
    <html><body><main id="main-content">
    <pre class="rust item-decl"><code>pub struct Mutex&lt;T&gt; { /* private fields */ }</code></pre>
    <details class="toggle top-doc" open>
        <summary>Expand description</summary>
        <div class="docblock"><p>A mutual exclusion primitive.</p></div>
    </details>
    </main></body></html>
"#;

const SPAWN_PAGE: &str = r#"
    <html><body><main id="main-content">
    <div class="docblock"><p>Spawns a new task.</p></div>
    </main></body></html>
"#;

fn demo_pages() -> Vec<(&'static str, &'static str)> {
    vec![
        ("https://docs.rs/demo/1.0.0/demo/all.html", DEMO_ALL_ITEMS),
        (
            "https://docs.rs/demo/1.0.0/demo/sync/struct.Mutex.html",
            MUTEX_PAGE,
        ),
        ("https://docs.rs/demo/1.0.0/demo/fn.spawn.html", SPAWN_PAGE),
    ]
}

#[tokio::test]
async fn search_items_ranks_exact_match_first() -> Result<()> {
    let (service, _) = create_test_service(&demo_pages());

    let response = service
        .search_items(Parameters(SearchItemsParams {
            crate_name: "demo".to_string(),
            version: Some("1.0.0".to_string()),
            query: "Mutex".to_string(),
            kind_filter: None,
            limit: None,
        }))
        .await;

    let output: SearchItemsOutput = serde_json::from_str(&response)?;
    assert!(!output.fuzzy);
    assert_eq!(output.total, 2);
    assert!(!output.truncated);
    assert_eq!(output.matches[0].name, "sync::Mutex");
    assert_eq!(output.matches[1].name, "sync::MutexGuard");
    assert!(output.matches[0].score > output.matches[1].score);
    assert_eq!(
        output.matches[0].url,
        "https://docs.rs/demo/1.0.0/demo/sync/struct.Mutex.html"
    );
    Ok(())
}

#[tokio::test]
async fn misspelled_search_falls_back_to_fuzzy() -> Result<()> {
    let (service, _) = create_test_service(&demo_pages());

    let response = service
        .search_items(Parameters(SearchItemsParams {
            crate_name: "demo".to_string(),
            version: Some("1.0.0".to_string()),
            query: "Mutx".to_string(),
            kind_filter: None,
            limit: None,
        }))
        .await;

    let output: SearchItemsOutput = serde_json::from_str(&response)?;
    assert!(output.fuzzy);
    assert_eq!(output.matches[0].name, "sync::Mutex");
    assert_eq!(output.matches[0].distance, Some(1));
    Ok(())
}

#[tokio::test]
async fn get_item_docs_resolves_bare_name_and_extracts_docblock() -> Result<()> {
    let (service, _) = create_test_service(&demo_pages());

    let response = service
        .get_item_docs(Parameters(GetItemDocsParams {
            crate_name: "demo".to_string(),
            version: Some("1.0.0".to_string()),
            item_path: "Mutex".to_string(),
            kind: Some("struct".to_string()),
        }))
        .await;

    let output: GetItemDocsOutput = serde_json::from_str(&response)?;
    assert!(output.found);
    assert_eq!(output.item.as_deref(), Some("sync::Mutex"));
    assert_eq!(output.kind.as_deref(), Some("struct"));
    assert_eq!(output.docs.as_deref(), Some("A mutual exclusion primitive."));
    assert!(
        output
            .declaration
            .as_deref()
            .unwrap()
            .starts_with("pub struct Mutex")
    );
    Ok(())
}

#[tokio::test]
async fn unresolvable_item_reports_suggestions() -> Result<()> {
    let (service, _) = create_test_service(&demo_pages());

    let response = service
        .get_item_docs(Parameters(GetItemDocsParams {
            crate_name: "demo".to_string(),
            version: Some("1.0.0".to_string()),
            item_path: "Mutx".to_string(),
            kind: Some("function".to_string()),
        }))
        .await;

    // No function matches, but the struct hit is still the best candidate.
    let output: GetItemDocsOutput = serde_json::from_str(&response)?;
    assert!(output.found);
    assert_eq!(output.item.as_deref(), Some("sync::Mutex"));

    let response = service
        .get_item_docs(Parameters(GetItemDocsParams {
            crate_name: "demo".to_string(),
            version: Some("1.0.0".to_string()),
            item_path: "frobnicate".to_string(),
            kind: None,
        }))
        .await;

    let output: GetItemDocsOutput = serde_json::from_str(&response)?;
    assert!(!output.found);
    assert!(output.docs.is_none());
    Ok(())
}

#[tokio::test]
async fn batch_lookup_reports_individual_outcomes() -> Result<()> {
    let (service, _) = create_test_service(&demo_pages());

    let response = service
        .get_items_docs(Parameters(GetItemsDocsParams {
            crate_name: "demo".to_string(),
            version: Some("1.0.0".to_string()),
            items: vec![
                "Mutex".to_string(),
                "definitely_not_present".to_string(),
                "spawn".to_string(),
            ],
        }))
        .await;

    let output: GetItemsDocsOutput = serde_json::from_str(&response)?;
    assert_eq!(output.results.len(), 3);

    assert!(output.results[0].is_success());
    assert_eq!(output.results[0].item.as_deref(), Some("sync::Mutex"));
    assert_eq!(
        output.results[0].docs.as_deref(),
        Some("A mutual exclusion primitive.")
    );

    assert!(!output.results[1].is_success());
    assert!(
        output.results[1]
            .error
            .as_deref()
            .unwrap()
            .contains("definitely_not_present")
    );

    assert!(output.results[2].is_success());
    assert_eq!(output.results[2].docs.as_deref(), Some("Spawns a new task."));
    Ok(())
}

#[tokio::test]
async fn list_crate_items_filters_and_paginates() -> Result<()> {
    let (service, _) = create_test_service(&demo_pages());

    let response = service
        .list_crate_items(Parameters(ListItemsParams {
            crate_name: "demo".to_string(),
            version: Some("1.0.0".to_string()),
            kind_filter: Some("struct".to_string()),
            limit: Some(1),
            offset: Some(0),
        }))
        .await;

    let output: ListCrateItemsOutput = serde_json::from_str(&response)?;
    assert_eq!(output.pagination.total, 2);
    assert_eq!(output.items.len(), 1);
    assert_eq!(output.items[0].name, "sync::Mutex");
    assert!(output.pagination.has_more);
    Ok(())
}

#[tokio::test]
async fn pinned_and_latest_versions_use_independent_cache_entries() -> Result<()> {
    let latest_listing = r#"
        <html><body>
        <h3 id="functions">Functions</h3>
        <ul class="all-items"><li><a href="fn.spawn.html">spawn</a></li>
        <li><a href="fn.spawn_blocking.html">spawn_blocking</a></li></ul>
        </body></html>
    "#;
    let mut pages = demo_pages();
    pages.push(("https://docs.rs/demo/latest/demo/all.html", latest_listing));
    let (service, fetcher) = create_test_service(&pages);

    let pinned = service
        .search_items(Parameters(SearchItemsParams {
            crate_name: "demo".to_string(),
            version: Some("1.0.0".to_string()),
            query: "spawn".to_string(),
            kind_filter: None,
            limit: None,
        }))
        .await;
    let latest = service
        .search_items(Parameters(SearchItemsParams {
            crate_name: "demo".to_string(),
            version: None,
            query: "spawn".to_string(),
            kind_filter: None,
            limit: None,
        }))
        .await;

    let pinned: SearchItemsOutput = serde_json::from_str(&pinned)?;
    let latest: SearchItemsOutput = serde_json::from_str(&latest)?;
    assert_eq!(pinned.total, 1);
    assert_eq!(latest.total, 2);
    // Two distinct listing fetches, one per version-scoped key.
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    Ok(())
}

#[tokio::test]
async fn repeated_queries_are_served_from_cache() -> Result<()> {
    let (service, fetcher) = create_test_service(&demo_pages());

    for _ in 0..3 {
        let response = service
            .search_items(Parameters(SearchItemsParams {
                crate_name: "demo".to_string(),
                version: Some("1.0.0".to_string()),
                query: "spawn".to_string(),
                kind_filter: None,
                limit: None,
            }))
            .await;
        let output: SearchItemsOutput = serde_json::from_str(&response)?;
        assert_eq!(output.total, 1);
    }

    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn unknown_crate_surfaces_an_error_response() -> Result<()> {
    let (service, _) = create_test_service(&[]);

    let response = service
        .search_items(Parameters(SearchItemsParams {
            crate_name: "no-such-crate".to_string(),
            version: Some("1.0.0".to_string()),
            query: "anything".to_string(),
            kind_filter: None,
            limit: None,
        }))
        .await;

    let value: serde_json::Value = serde_json::from_str(&response)?;
    let error = value["error"].as_str().unwrap();
    assert!(error.contains("no-such-crate"));
    Ok(())
}

const DEMO_CRATE_JSON: &str = r#"{
    "crate": {
        "name": "demo",
        "description": "A demonstration crate",
        "homepage": "https://demo.example",
        "documentation": "https://docs.rs/demo",
        "repository": "https://github.com/example/demo",
        "downloads": 4242,
        "max_version": "1.1.0",
        "max_stable_version": "1.1.0"
    },
    "versions": [
        {"num": "1.1.0", "yanked": false, "license": "MIT",
         "downloads": 1000, "created_at": "2026-01-02T00:00:00Z",
         "features": {"default": ["std"], "std": []}},
        {"num": "1.0.0", "yanked": true, "license": "MIT",
         "downloads": 3242, "created_at": "2025-06-01T00:00:00Z"}
    ]
}"#;

const DEMO_DEPS_JSON: &str = r#"{
    "dependencies": [
        {"crate_id": "serde", "req": "^1.0", "kind": "normal",
         "optional": false, "default_features": true, "target": null},
        {"crate_id": "tempfile", "req": "^3", "kind": "dev",
         "optional": false, "default_features": true, "target": null}
    ]
}"#;

const DEMO_SEARCH_JSON: &str = r#"{
    "crates": [
        {"name": "demo", "description": "A demonstration crate",
         "max_version": "1.1.0", "downloads": 4242}
    ],
    "meta": {"total": 17}
}"#;

#[tokio::test]
async fn crate_metadata_describes_the_requested_version() -> Result<()> {
    let (service, _) = create_test_service(&[(
        "https://crates.io/api/v1/crates/demo",
        DEMO_CRATE_JSON,
    )]);

    let response = service
        .get_crate_metadata(Parameters(GetCrateMetadataParams {
            crate_name: "demo".to_string(),
            version: Some("1.0.0".to_string()),
        }))
        .await;

    let output: CrateMetadataOutput = serde_json::from_str(&response)?;
    assert_eq!(output.name, "demo");
    assert_eq!(output.version, "1.0.0");
    assert!(output.yanked);
    assert_eq!(output.downloads, 4242);
    assert_eq!(output.max_version.as_deref(), Some("1.1.0"));

    // Default: newest version, including its feature map.
    let response = service
        .get_crate_metadata(Parameters(GetCrateMetadataParams {
            crate_name: "demo".to_string(),
            version: None,
        }))
        .await;
    let output: CrateMetadataOutput = serde_json::from_str(&response)?;
    assert_eq!(output.version, "1.1.0");
    assert!(output.features.contains_key("default"));
    Ok(())
}

#[tokio::test]
async fn version_listing_preserves_registry_order() -> Result<()> {
    let (service, _) = create_test_service(&[(
        "https://crates.io/api/v1/crates/demo",
        DEMO_CRATE_JSON,
    )]);

    let response = service
        .list_crate_versions(Parameters(ListCrateVersionsParams {
            crate_name: "demo".to_string(),
        }))
        .await;

    let output: ListCrateVersionsOutput = serde_json::from_str(&response)?;
    assert_eq!(output.total, 2);
    assert_eq!(output.versions[0].num, "1.1.0");
    assert!(output.versions[1].yanked);
    Ok(())
}

#[tokio::test]
async fn dependencies_default_to_the_newest_version() -> Result<()> {
    let (service, _) = create_test_service(&[
        ("https://crates.io/api/v1/crates/demo", DEMO_CRATE_JSON),
        (
            "https://crates.io/api/v1/crates/demo/1.1.0/dependencies",
            DEMO_DEPS_JSON,
        ),
    ]);

    let response = service
        .get_crate_dependencies(Parameters(GetDependenciesParams {
            crate_name: "demo".to_string(),
            version: None,
        }))
        .await;

    let output: GetDependenciesOutput = serde_json::from_str(&response)?;
    assert_eq!(output.version, "1.1.0");
    assert_eq!(output.total, 2);
    assert_eq!(output.dependencies[0].name, "serde");
    assert_eq!(output.dependencies[1].kind, "dev");
    Ok(())
}

#[tokio::test]
async fn crate_search_returns_compact_hits() -> Result<()> {
    let (service, _) = create_test_service(&[(
        "https://crates.io/api/v1/crates?q=demo+crate&per_page=5",
        DEMO_SEARCH_JSON,
    )]);

    let response = service
        .search_crates(Parameters(SearchCratesParams {
            query: "demo crate".to_string(),
            limit: Some(5),
        }))
        .await;

    let output: SearchCratesOutput = serde_json::from_str(&response)?;
    assert_eq!(output.total, 17);
    assert_eq!(output.crates.len(), 1);
    assert_eq!(output.crates[0].name, "demo");
    Ok(())
}
