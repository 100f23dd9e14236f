//! LRU response cache with fresh and stale-serving windows
//!
//! Every entry carries two deadlines: `fresh_until`, after which the value
//! is still served but flagged for background refresh, and `stale_until`,
//! after which it is dropped on read. The stale window is a fixed grace
//! constant so a custom fresh TTL never extends how old a served value can
//! be. Eviction under capacity pressure removes the single entry with the
//! oldest read time.
//!
//! The cache itself is not synchronized; services wrap it in a
//! `tokio::sync::Mutex` so entries are replaced wholesale and readers
//! never observe a partial update.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Bounds and freshness windows for a [`ResponseCache`].
#[derive(Debug, Clone, Copy)]
pub struct CacheConfig {
    /// Maximum number of entries before LRU eviction kicks in.
    pub max_entries: usize,
    /// How long a value is served without being flagged for refresh.
    pub fresh_ttl: Duration,
    /// How long past insertion a value may still be served at all.
    pub stale_grace: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 500,
            fresh_ttl: Duration::from_secs(600),
            stale_grace: Duration::from_secs(1800),
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    value: Arc<str>,
    fresh_until: Instant,
    stale_until: Instant,
    last_access: Instant,
    /// Insertion order, breaks eviction ties on equal read times.
    sequence: u64,
}

/// In-process key/value store for fetched response bodies.
#[derive(Debug)]
pub struct ResponseCache {
    entries: HashMap<String, CacheEntry>,
    config: CacheConfig,
    next_sequence: u64,
}

impl ResponseCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            config,
            next_sequence: 0,
        }
    }

    /// Return the stored value if it is still within the stale grace
    /// window, updating its recency. A value past the grace window is
    /// removed and reported absent.
    pub fn get(&mut self, key: &str) -> Option<Arc<str>> {
        let now = Instant::now();
        match self.entries.get_mut(key) {
            Some(entry) if now <= entry.stale_until => {
                entry.last_access = now;
                Some(Arc::clone(&entry.value))
            }
            Some(_) => {
                self.entries.remove(key);
                None
            }
            None => None,
        }
    }

    /// True when the key is absent or past its fresh window. A stale
    /// entry is still usable via [`get`](Self::get) but due for refresh.
    pub fn is_stale(&self, key: &str) -> bool {
        match self.entries.get(key) {
            Some(entry) => Instant::now() > entry.fresh_until,
            None => true,
        }
    }

    /// Insert with the configured fresh TTL.
    pub fn set(&mut self, key: &str, value: Arc<str>) {
        self.set_with_ttl(key, value, self.config.fresh_ttl);
    }

    /// Insert with a custom fresh TTL. The stale deadline is always
    /// `now + stale_grace`, independent of the TTL. At capacity the
    /// least recently read entry is evicted first; a write counts as an
    /// access for the new entry's recency.
    pub fn set_with_ttl(&mut self, key: &str, value: Arc<str>, ttl: Duration) {
        if !self.entries.contains_key(key) && self.entries.len() >= self.config.max_entries {
            self.evict_least_recent();
        }

        let now = Instant::now();
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                fresh_until: now + ttl,
                stale_until: now + self.config.stale_grace,
                last_access: now,
                sequence,
            },
        );
    }

    /// Remove the entry with the oldest read time; equal read times
    /// evict the earliest-inserted entry.
    fn evict_least_recent(&mut self) {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| (entry.last_access, entry.sequence))
            .map(|(key, _)| key.clone());

        if let Some(key) = victim {
            tracing::debug!(key = %key, "evicting least recently read cache entry");
            self.entries.remove(&key);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
