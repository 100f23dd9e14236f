//! Ranked search and single-item resolution over a crate's flat index
//!
//! The primary pass scores every item with the tiers in
//! [`crate::index::score`]; when nothing scores, the edit-distance
//! fallback in [`crate::index::fuzzy`] supplies candidates instead. The
//! resolver never errors on "no match" - it returns an empty result so
//! callers can build a "did you mean" message from the same list.

use crate::docsrs::{DocFetchService, pages, urls};
use crate::fetch::FetchError;
use crate::index::fuzzy::fuzzy_matches;
use crate::index::item::{IndexedItem, ItemKind};
use crate::index::score::score_item;

/// One ranked hit for a specific query.
#[derive(Debug, Clone)]
pub struct ScoredMatch {
    pub item: IndexedItem,
    /// Tier score; zero for fuzzy fallback hits.
    pub score: i32,
    /// Edit distance, present only for fuzzy fallback hits.
    pub distance: Option<usize>,
}

/// Result of one ranked search.
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub matches: Vec<ScoredMatch>,
    /// True match count before truncation.
    pub total: usize,
    pub truncated: bool,
    /// Whether the fuzzy fallback produced these matches.
    pub fuzzy: bool,
}

/// Flat item index for one (crate, version) pair.
#[derive(Debug, Clone)]
pub struct ItemIndex {
    items: Vec<IndexedItem>,
}

impl ItemIndex {
    pub fn new(items: Vec<IndexedItem>) -> Self {
        Self { items }
    }

    /// Load the index from the crate's "all items" page. The page fetch
    /// itself is served through the response cache, keyed by the
    /// version-scoped URL.
    pub async fn load(
        docs: &DocFetchService,
        crate_name: &str,
        version: &str,
    ) -> Result<Self, FetchError> {
        let url = urls::all_items_url(crate_name, version);
        let body = docs.fetch_page(&url).await?;
        Ok(Self::new(pages::parse_all_items(&body)))
    }

    pub fn items(&self) -> &[IndexedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rank every item against `query` and return the top `limit`
    /// matches. Ordering is score descending, then edit distance
    /// ascending (fuzzy hits only), then qualified name ascending.
    pub fn search(&self, query: &str, limit: usize) -> SearchResults {
        let query_lower = query.trim().to_lowercase();
        if query_lower.is_empty() {
            return SearchResults::default();
        }

        let mut matches: Vec<ScoredMatch> = self
            .items
            .iter()
            .filter_map(|item| {
                let score = score_item(&query_lower, item);
                (score > 0).then(|| ScoredMatch {
                    item: item.clone(),
                    score,
                    distance: None,
                })
            })
            .collect();

        let fuzzy = matches.is_empty();
        if fuzzy {
            matches = fuzzy_matches(&query_lower, &self.items)
                .into_iter()
                .map(|m| ScoredMatch {
                    item: IndexedItem::clone(m.item),
                    score: 0,
                    distance: Some(m.distance),
                })
                .collect();
        }

        matches.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.distance.unwrap_or(0).cmp(&b.distance.unwrap_or(0)))
                .then_with(|| a.item.qualified_name.cmp(&b.item.qualified_name))
        });

        let total = matches.len();
        let truncated = total > limit;
        matches.truncate(limit);

        SearchResults {
            matches,
            total,
            truncated,
            fuzzy,
        }
    }

    /// Resolve a possibly bare, possibly misspelled name to one item,
    /// preferring a hit whose kind matches `expected_kind` before
    /// falling back to the top-ranked hit of any kind.
    pub fn resolve(&self, name: &str, expected_kind: Option<ItemKind>) -> Option<IndexedItem> {
        // Rank over the whole index: a kind-matching hit must not be
        // lost to truncation below a block of equal-scored items.
        let results = self.search(name, self.items.len().max(1));

        if let Some(kind) = expected_kind {
            if let Some(hit) = results.matches.iter().find(|m| m.item.kind == kind) {
                return Some(hit.item.clone());
            }
        }
        results.matches.first().map(|m| m.item.clone())
    }

    /// Best-effort "did you mean" candidates for a failed lookup.
    pub fn suggestions(&self, query: &str, max: usize) -> Vec<String> {
        self.search(query, max)
            .matches
            .into_iter()
            .map(|m| m.item.qualified_name)
            .collect()
    }
}
