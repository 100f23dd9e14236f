//! # Cache Module
//!
//! Bounded in-memory caching for fetched responses.
//!
//! ## Key Components
//!
//! - [`memory`] - LRU response cache with fresh and stale-serving windows

pub mod memory;

pub use memory::{CacheConfig, ResponseCache};
