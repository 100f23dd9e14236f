use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use rmcp::{ServiceExt, transport::stdio};
use tracing_subscriber::EnvFilter;

use docsrs_mcp::DocsRsService;
use docsrs_mcp::cache::CacheConfig;
use docsrs_mcp::config::ServiceConfig;
use docsrs_mcp::fetch::RetryPolicy;

/// MCP server for querying docs.rs documentation and crates.io metadata
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Maximum number of cached responses
    #[arg(long, env = "DOCSRS_MCP_CACHE_ENTRIES", default_value_t = 500)]
    cache_entries: usize,

    /// Seconds a cached response is served without refresh
    #[arg(long, env = "DOCSRS_MCP_FRESH_TTL_SECS", default_value_t = 600)]
    fresh_ttl_secs: u64,

    /// Seconds past caching a response may still be served while refreshing
    #[arg(long, env = "DOCSRS_MCP_STALE_GRACE_SECS", default_value_t = 1800)]
    stale_grace_secs: u64,

    /// Hard deadline for a single HTTP request, in seconds
    #[arg(long, env = "DOCSRS_MCP_FETCH_TIMEOUT_SECS", default_value_t = 10)]
    fetch_timeout_secs: u64,

    /// Additional attempts after a transient fetch failure
    #[arg(long, env = "DOCSRS_MCP_MAX_RETRIES", default_value_t = 3)]
    max_retries: u32,

    /// Backoff unit between retries, in milliseconds (retry i waits i times this)
    #[arg(long, env = "DOCSRS_MCP_RETRY_BASE_DELAY_MS", default_value_t = 500)]
    retry_base_delay_ms: u64,
}

impl Args {
    fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            cache: CacheConfig {
                max_entries: self.cache_entries,
                fresh_ttl: Duration::from_secs(self.fresh_ttl_secs),
                stale_grace: Duration::from_secs(self.stale_grace_secs),
            },
            retry: RetryPolicy {
                max_retries: self.max_retries,
                base_delay: Duration::from_millis(self.retry_base_delay_ms),
            },
            fetch_timeout: Duration::from_secs(self.fetch_timeout_secs),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing to stderr to avoid conflicts with stdio transport
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting docsrs MCP server on stdio...");

    let docs_service = DocsRsService::new(args.service_config());

    // Serve using stdio transport
    let service = docs_service.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("serving error: {:?}", e);
    })?;

    // Wait for the service to complete
    service.waiting().await?;
    Ok(())
}
