use std::sync::Arc;

use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use tokio::sync::Mutex;

use crate::cache::ResponseCache;
use crate::config::ServiceConfig;
use crate::docs::DocsTools;
use crate::docsrs::DocFetchService;
use crate::fetch::{HttpFetcher, TextFetcher};
use crate::registry::RegistryClient;
use crate::registry::tools::RegistryTools;

#[derive(Clone)]
pub struct DocsRsService {
    docs_tools: DocsTools,
    registry_tools: RegistryTools,
    tool_router: ToolRouter<Self>,
}

impl DocsRsService {
    pub fn new(config: ServiceConfig) -> Self {
        let fetcher: Arc<dyn TextFetcher> = Arc::new(HttpFetcher::new(config.fetch_timeout));
        Self::with_fetcher(config, fetcher)
    }

    /// Construct with an injected fetcher; tests use this to serve canned
    /// pages without touching the network.
    pub fn with_fetcher(config: ServiceConfig, fetcher: Arc<dyn TextFetcher>) -> Self {
        let cache = Arc::new(Mutex::new(ResponseCache::new(config.cache)));
        let docs = DocFetchService::new(fetcher, cache, config.retry);
        let registry = RegistryClient::new(docs.clone());

        Self {
            docs_tools: DocsTools::new(docs),
            registry_tools: RegistryTools::new(registry),
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl DocsRsService {
    // Docs tools
    #[tool(
        description = "Search for items by name in a crate's documentation. Exact and prefix matches rank first; misspelled queries fall back to fuzzy matching. Returns ranked matches with their documentation page URLs, the true total and whether the list was truncated. Use get_item_docs to fetch the documentation of a specific match."
    )]
    pub async fn search_items(
        &self,
        params: Parameters<crate::docs::tools::SearchItemsParams>,
    ) -> String {
        self.docs_tools.search_items(params.0).await
    }

    #[tool(
        description = "Get the documentation text for one item in a crate. The item name is resolved against the crate's full item index, so a bare name like 'Mutex' works without knowing its module; pass the expected kind to prefer between same-named items. When nothing resolves, the response lists 'did you mean' suggestions."
    )]
    pub async fn get_item_docs(
        &self,
        params: Parameters<crate::docs::tools::GetItemDocsParams>,
    ) -> String {
        self.docs_tools.get_item_docs(params.0).await
    }

    #[tool(
        description = "Get documentation for several items of one crate in a single call. Lookups run concurrently and each item reports its own success or error, so one unknown name never fails the batch."
    )]
    pub async fn get_items_docs(
        &self,
        params: Parameters<crate::docs::tools::GetItemsDocsParams>,
    ) -> String {
        self.docs_tools.get_items_docs(params.0).await
    }

    #[tool(
        description = "List all items in a crate's documentation, optionally filtered by kind, with pagination. Use when browsing a crate's contents without a specific search term; for targeted lookups prefer search_items."
    )]
    pub async fn list_crate_items(
        &self,
        params: Parameters<crate::docs::tools::ListItemsParams>,
    ) -> String {
        self.docs_tools.list_crate_items(params.0).await
    }

    // Registry tools
    #[tool(
        description = "Get crates.io metadata for a crate: description, links, download count, newest versions, and the license, yanked flag and feature map of the requested version."
    )]
    pub async fn get_crate_metadata(
        &self,
        params: Parameters<crate::registry::tools::GetCrateMetadataParams>,
    ) -> String {
        self.registry_tools.get_crate_metadata(params.0).await
    }

    #[tool(
        description = "List the published versions of a crate with their yanked flags and release dates, newest first. Useful before pinning a version in other tools."
    )]
    pub async fn list_crate_versions(
        &self,
        params: Parameters<crate::registry::tools::ListCrateVersionsParams>,
    ) -> String {
        self.registry_tools.list_crate_versions(params.0).await
    }

    #[tool(
        description = "Get the dependency list of a crate version from crates.io, including version requirements, dependency kind (normal, dev, build), optionality and target gates."
    )]
    pub async fn get_crate_dependencies(
        &self,
        params: Parameters<crate::registry::tools::GetDependenciesParams>,
    ) -> String {
        self.registry_tools.get_crate_dependencies(params.0).await
    }

    #[tool(
        description = "Search crates.io by keywords. Returns compact results with name, description, newest version and download count."
    )]
    pub async fn search_crates(
        &self,
        params: Parameters<crate::registry::tools::SearchCratesParams>,
    ) -> String {
        self.registry_tools.search_crates(params.0).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for DocsRsService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: rmcp::model::Implementation {
                name: "docsrs-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            instructions: Some(
                "MCP server for querying docs.rs documentation and crates.io metadata. Use search_crates to discover crates by keyword and get_crate_metadata or list_crate_versions to inspect one. For documentation, search_items finds symbols by (possibly misspelled) name, get_item_docs fetches one item's documentation text, and get_items_docs batches several lookups in one call. Responses are served from a bounded in-memory cache, so repeated queries against the same crate are cheap.".to_string(),
            ),
            ..Default::default()
        }
    }
}
