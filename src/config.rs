//! Runtime configuration for the server
//!
//! All tunables are grouped here so tests can construct services with
//! shrunk TTLs, capacities and retry budgets instead of the defaults.

use std::time::Duration;

use crate::cache::CacheConfig;
use crate::fetch::RetryPolicy;

/// Default hard deadline for a single outbound request.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Top-level configuration assembled from CLI arguments (or defaults).
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Bounds and freshness windows for the shared response cache.
    pub cache: CacheConfig,
    /// Retry budget applied to every synchronous fetch.
    pub retry: RetryPolicy,
    /// Hard deadline for a single HTTP request.
    pub fetch_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            retry: RetryPolicy::default(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}
