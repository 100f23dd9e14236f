//! MCP server for querying docs.rs documentation and crates.io metadata
//!
//! The tool surface lives in [`docs`] and [`registry`]; everything they
//! depend on (resilient fetching, response caching, item resolution) is
//! shared infrastructure under the remaining modules.

pub mod cache;
pub mod config;
pub mod docs;
pub mod docsrs;
pub mod fetch;
pub mod index;
pub mod registry;
pub mod service;

pub use service::DocsRsService;
