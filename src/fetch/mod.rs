//! # Fetch Module
//!
//! Resilient HTTP access that every other subsystem routes through.
//!
//! ## Key Components
//!
//! - [`client`] - HTTP client with per-request deadlines
//! - [`error`] - Typed fetch failures with transient/permanent classification
//! - [`retry`] - Bounded retry with linear backoff for transient failures

pub mod client;
pub mod error;
pub mod retry;

pub use client::{HttpFetcher, TextFetcher};
pub use error::FetchError;
pub use retry::{RetryPolicy, with_retry};
