//! # Registry Module
//!
//! crates.io JSON API access and the metadata query tools built on it.
//!
//! ## Key Components
//!
//! - [`types`] - DTOs mirroring the registry's JSON responses
//! - [`client`] - Cached, retried GETs against the registry API
//! - [`tools`] - MCP tool implementations for metadata queries
//! - [`outputs`] - Output types for metadata queries

pub mod client;
pub mod outputs;
pub mod tools;
pub mod types;

pub use client::RegistryClient;
