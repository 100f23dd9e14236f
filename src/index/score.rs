//! Tiered ranking of items against a query string
//!
//! Each tier is a fixed descending constant; an item matching no tier
//! scores zero and is excluded from primary results. Comparison is
//! case-insensitive throughout. The constants are policy, kept in one
//! place so a deliberate change never has to chase literals through the
//! codebase.

use crate::index::item::IndexedItem;

pub const SCORE_EXACT_BARE: i32 = 100;
pub const SCORE_EXACT_PATH: i32 = 95;
pub const SCORE_PREFIX_BARE: i32 = 60;
pub const SCORE_PREFIX_PATH: i32 = 55;
pub const SCORE_SUBSTRING: i32 = 20;

/// Score one item against a lower-cased query. Zero means no match.
pub fn score_item(query_lower: &str, item: &IndexedItem) -> i32 {
    if query_lower.is_empty() {
        return 0;
    }

    let bare = item.bare_name.to_lowercase();
    let path = item.qualified_name.to_lowercase();

    if bare == query_lower {
        SCORE_EXACT_BARE
    } else if path == query_lower {
        SCORE_EXACT_PATH
    } else if bare.starts_with(query_lower) {
        SCORE_PREFIX_BARE
    } else if path.starts_with(query_lower) {
        SCORE_PREFIX_PATH
    } else if path.contains(query_lower) {
        SCORE_SUBSTRING
    } else {
        0
    }
}
