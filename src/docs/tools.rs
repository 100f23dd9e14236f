//! MCP tool implementations for documentation queries
//!
//! Each tool is glue over the core services: resolve through the item
//! index, fetch the page through the cached fetch service, extract with
//! the pure page functions, and assemble a compact JSON response.

use anyhow::{Context, Result};
use futures::future::join_all;
use rmcp::schemars;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::docs::outputs::{
    BatchItemOutcome, DocsErrorOutput, GetItemDocsOutput, GetItemsDocsOutput, ItemMatch,
    ItemSummary, ListCrateItemsOutput, PaginationInfo, SearchItemsOutput,
};
use crate::docsrs::{DocFetchService, pages, urls};
use crate::index::{IndexedItem, ItemIndex, ItemKind};

const DEFAULT_SEARCH_LIMIT: usize = 20;
const DEFAULT_LIST_LIMIT: usize = 100;
const MAX_SUGGESTIONS: usize = 5;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchItemsParams {
    #[schemars(description = "The name of the crate")]
    pub crate_name: String,
    #[schemars(description = "The version of the crate (defaults to 'latest')")]
    pub version: Option<String>,
    #[schemars(
        description = "The symbol name to search for. Bare names ('Mutex') and qualified paths ('sync::Mutex') both work; misspellings fall back to fuzzy matching"
    )]
    pub query: String,
    #[schemars(description = "Optional filter by item kind (e.g., 'function', 'struct', 'enum')")]
    pub kind_filter: Option<String>,
    #[schemars(description = "Maximum number of matches to return (default: 20)")]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetItemDocsParams {
    #[schemars(description = "The name of the crate")]
    pub crate_name: String,
    #[schemars(description = "The version of the crate (defaults to 'latest')")]
    pub version: Option<String>,
    #[schemars(
        description = "Item name to resolve. A bare name is located anywhere in the crate; a qualified path ('sync::Mutex') narrows the match"
    )]
    pub item_path: String,
    #[schemars(
        description = "Expected item kind used to prefer between same-named items (e.g., 'struct' over 'macro')"
    )]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetItemsDocsParams {
    #[schemars(description = "The name of the crate")]
    pub crate_name: String,
    #[schemars(description = "The version of the crate (defaults to 'latest')")]
    pub version: Option<String>,
    #[schemars(description = "Item names to look up; outcomes are reported individually")]
    pub items: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListItemsParams {
    #[schemars(description = "The name of the crate")]
    pub crate_name: String,
    #[schemars(description = "The version of the crate (defaults to 'latest')")]
    pub version: Option<String>,
    #[schemars(description = "Optional filter by item kind (e.g., 'function', 'struct', 'enum')")]
    pub kind_filter: Option<String>,
    #[schemars(description = "Maximum number of items to return (default: 100)")]
    pub limit: Option<usize>,
    #[schemars(description = "Starting position for pagination (default: 0)")]
    pub offset: Option<usize>,
}

#[derive(Clone)]
pub struct DocsTools {
    docs: DocFetchService,
}

impl DocsTools {
    pub fn new(docs: DocFetchService) -> Self {
        Self { docs }
    }

    async fn load_index(&self, crate_name: &str, version: &str) -> Result<ItemIndex> {
        ItemIndex::load(&self.docs, crate_name, version)
            .await
            .with_context(|| format!("failed to load item index for {crate_name}@{version}"))
    }

    pub async fn search_items(&self, params: SearchItemsParams) -> String {
        match self.search_items_impl(params).await {
            Ok(output) => output.to_json(),
            Err(e) => DocsErrorOutput::new(format!("Failed to search items: {e:#}")).to_json(),
        }
    }

    async fn search_items_impl(&self, params: SearchItemsParams) -> Result<SearchItemsOutput> {
        let version = params.version.unwrap_or_else(|| urls::LATEST_VERSION.to_string());
        let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT).max(1);
        let kind_filter = params.kind_filter.as_deref().and_then(ItemKind::parse);

        let index = self.load_index(&params.crate_name, &version).await?;
        let index = match kind_filter {
            Some(kind) => ItemIndex::new(
                index
                    .items()
                    .iter()
                    .filter(|item| item.kind == kind)
                    .cloned()
                    .collect(),
            ),
            None => index,
        };

        let results = index.search(&params.query, limit);
        let matches = results
            .matches
            .iter()
            .map(|m| ItemMatch {
                name: m.item.qualified_name.clone(),
                kind: m.item.kind.as_str().to_string(),
                score: m.score,
                distance: m.distance,
                url: urls::item_url(&params.crate_name, &version, &m.item),
            })
            .collect();

        Ok(SearchItemsOutput {
            crate_name: params.crate_name,
            version,
            query: params.query,
            matches,
            total: results.total,
            truncated: results.truncated,
            fuzzy: results.fuzzy,
        })
    }

    pub async fn get_item_docs(&self, params: GetItemDocsParams) -> String {
        match self.get_item_docs_impl(params).await {
            Ok(output) => output.to_json(),
            Err(e) => DocsErrorOutput::new(format!("Failed to get item docs: {e:#}")).to_json(),
        }
    }

    async fn get_item_docs_impl(&self, params: GetItemDocsParams) -> Result<GetItemDocsOutput> {
        let version = params.version.unwrap_or_else(|| urls::LATEST_VERSION.to_string());
        let expected_kind = params.kind.as_deref().and_then(ItemKind::parse);

        let index = self.load_index(&params.crate_name, &version).await?;
        let Some(item) = index.resolve(&params.item_path, expected_kind) else {
            return Ok(GetItemDocsOutput {
                crate_name: params.crate_name,
                version,
                query: params.item_path.clone(),
                found: false,
                item: None,
                kind: None,
                url: None,
                declaration: None,
                docs: None,
                suggestions: index.suggestions(&params.item_path, MAX_SUGGESTIONS),
            });
        };

        let (url, declaration, docs) = self
            .fetch_item_page(&params.crate_name, &version, &item)
            .await?;

        Ok(GetItemDocsOutput {
            crate_name: params.crate_name,
            version,
            query: params.item_path,
            found: true,
            item: Some(item.qualified_name.clone()),
            kind: Some(item.kind.as_str().to_string()),
            url: Some(url),
            declaration,
            docs,
            suggestions: Vec::new(),
        })
    }

    async fn fetch_item_page(
        &self,
        crate_name: &str,
        version: &str,
        item: &IndexedItem,
    ) -> Result<(String, Option<String>, Option<String>)> {
        let url = urls::item_url(crate_name, version, item);
        let body = self
            .docs
            .fetch_page(&url)
            .await
            .with_context(|| format!("failed to fetch documentation page for {}", item.qualified_name))?;

        // A page without the expected structure is "no data", not a failure.
        let declaration = pages::extract_item_declaration(&body);
        let docs = pages::extract_item_docs(&body);
        Ok((url, declaration, docs))
    }

    pub async fn get_items_docs(&self, params: GetItemsDocsParams) -> String {
        match self.get_items_docs_impl(params).await {
            Ok(output) => output.to_json(),
            Err(e) => DocsErrorOutput::new(format!("Failed to get item docs: {e:#}")).to_json(),
        }
    }

    async fn get_items_docs_impl(&self, params: GetItemsDocsParams) -> Result<GetItemsDocsOutput> {
        let version = params.version.unwrap_or_else(|| urls::LATEST_VERSION.to_string());

        // The index load is shared; per-item lookups run concurrently and
        // report their outcomes individually.
        let index = self.load_index(&params.crate_name, &version).await?;

        let lookups = params
            .items
            .iter()
            .map(|query| self.lookup_one(&index, &params.crate_name, &version, query));
        let results = join_all(lookups).await;

        Ok(GetItemsDocsOutput {
            crate_name: params.crate_name,
            version,
            results,
        })
    }

    async fn lookup_one(
        &self,
        index: &ItemIndex,
        crate_name: &str,
        version: &str,
        query: &str,
    ) -> BatchItemOutcome {
        let Some(item) = index.resolve(query, None) else {
            let suggestions = index.suggestions(query, MAX_SUGGESTIONS);
            let error = if suggestions.is_empty() {
                format!("item '{query}' not found in {crate_name}@{version}")
            } else {
                format!(
                    "item '{query}' not found in {crate_name}@{version}; did you mean: {}",
                    suggestions.join(", ")
                )
            };
            return BatchItemOutcome {
                query: query.to_string(),
                item: None,
                kind: None,
                url: None,
                docs: None,
                error: Some(error),
            };
        };

        match self.fetch_item_page(crate_name, version, &item).await {
            Ok((url, _, docs)) => BatchItemOutcome {
                query: query.to_string(),
                item: Some(item.qualified_name.clone()),
                kind: Some(item.kind.as_str().to_string()),
                url: Some(url),
                docs,
                error: None,
            },
            Err(e) => BatchItemOutcome {
                query: query.to_string(),
                item: Some(item.qualified_name.clone()),
                kind: Some(item.kind.as_str().to_string()),
                url: None,
                docs: None,
                error: Some(format!("{e:#}")),
            },
        }
    }

    pub async fn list_crate_items(&self, params: ListItemsParams) -> String {
        match self.list_crate_items_impl(params).await {
            Ok(output) => output.to_json(),
            Err(e) => DocsErrorOutput::new(format!("Failed to list crate items: {e:#}")).to_json(),
        }
    }

    async fn list_crate_items_impl(&self, params: ListItemsParams) -> Result<ListCrateItemsOutput> {
        let version = params.version.unwrap_or_else(|| urls::LATEST_VERSION.to_string());
        let kind_filter = params.kind_filter.as_deref().and_then(ItemKind::parse);
        let limit = params.limit.unwrap_or(DEFAULT_LIST_LIMIT).max(1);
        let offset = params.offset.unwrap_or(0);

        let index = self.load_index(&params.crate_name, &version).await?;

        let mut items: Vec<ItemSummary> = index
            .items()
            .iter()
            .filter(|item| kind_filter.is_none_or(|kind| item.kind == kind))
            .map(|item| ItemSummary {
                name: item.qualified_name.clone(),
                kind: item.kind.as_str().to_string(),
            })
            .collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));

        let total = items.len();
        let page: Vec<ItemSummary> = items.into_iter().skip(offset).take(limit).collect();

        Ok(ListCrateItemsOutput {
            crate_name: params.crate_name,
            version,
            items: page,
            pagination: PaginationInfo {
                total,
                limit,
                offset,
                has_more: offset + limit < total,
            },
        })
    }
}
