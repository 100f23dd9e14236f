//! # Docsrs Module
//!
//! Fetching and extraction for docs.rs documentation pages.
//!
//! ## Key Components
//!
//! - [`service`] - Cached page fetching with stale-serving and background refresh
//! - [`urls`] - URL construction for documentation pages
//! - [`pages`] - Pure HTML-to-domain extraction

pub mod pages;
pub mod service;
pub mod urls;

pub use service::DocFetchService;
