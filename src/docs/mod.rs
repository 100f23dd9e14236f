//! # Docs Module
//!
//! Documentation query tools built on the item index and the page cache.
//!
//! ## Key Components
//!
//! - [`tools`] - MCP tool implementations for documentation queries
//! - [`outputs`] - Output types for documentation queries

pub mod outputs;
pub mod tools;

pub use tools::DocsTools;
