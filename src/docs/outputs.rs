//! Output types for documentation tools
//!
//! These types are used as the return values from docs tool methods.
//! They are serialized to JSON strings for the MCP protocol, and can be
//! deserialized in tests for type-safe validation.

use serde::{Deserialize, Serialize};

/// One ranked hit in a search response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemMatch {
    /// Full path relative to the crate root.
    pub name: String,
    pub kind: String,
    pub score: i32,
    /// Edit distance, present only for fuzzy fallback hits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<usize>,
    /// Documentation page URL for the item.
    pub url: String,
}

/// Output from search_items operation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SearchItemsOutput {
    pub crate_name: String,
    pub version: String,
    pub query: String,
    pub matches: Vec<ItemMatch>,
    /// True match count before truncation.
    pub total: usize,
    pub truncated: bool,
    /// Whether results came from the edit-distance fallback.
    pub fuzzy: bool,
}

impl SearchItemsOutput {
    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}

/// Output from get_item_docs operation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct GetItemDocsOutput {
    pub crate_name: String,
    pub version: String,
    pub query: String,
    pub found: bool,
    /// Resolved path, when found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declaration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
    /// "Did you mean" candidates when resolution failed.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl GetItemDocsOutput {
    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}

/// Individual outcome inside a batch lookup; exactly one of the payload
/// fields or `error` is populated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchItemOutcome {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchItemOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Output from get_items_docs operation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct GetItemsDocsOutput {
    pub crate_name: String,
    pub version: String,
    pub results: Vec<BatchItemOutcome>,
}

impl GetItemsDocsOutput {
    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}

/// Lightweight listing entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemSummary {
    pub name: String,
    pub kind: String,
}

/// Pagination information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaginationInfo {
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
    pub has_more: bool,
}

/// Output from list_crate_items operation
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ListCrateItemsOutput {
    pub crate_name: String,
    pub version: String,
    pub items: Vec<ItemSummary>,
    pub pagination: PaginationInfo,
}

impl ListCrateItemsOutput {
    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}

/// Error output for docs operations
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DocsErrorOutput {
    pub error: String,
}

impl DocsErrorOutput {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// Convert to JSON string for MCP response
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|_| r#"{"error":"Failed to serialize response"}"#.to_string())
    }
}
