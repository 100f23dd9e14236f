//! # Index Module
//!
//! Flat item index for one crate version, plus name resolution.
//!
//! ## Key Components
//!
//! - [`item`] - Item kinds and the indexed item model
//! - [`score`] - Tiered ranking of items against a query string
//! - [`fuzzy`] - Edit-distance fallback for misspelled queries
//! - [`resolver`] - Ranked search and single-item resolution

pub mod fuzzy;
pub mod item;
pub mod resolver;
pub mod score;

pub use item::{IndexedItem, ItemKind};
pub use resolver::{ItemIndex, ScoredMatch, SearchResults};
