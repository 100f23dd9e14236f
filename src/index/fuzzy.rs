//! Edit-distance fallback for misspelled queries
//!
//! Used only when the tiered scoring pass yields nothing. An item is
//! accepted when the Levenshtein distance between the query and its bare
//! name (case-insensitive) stays within a fixed ratio of the longer of
//! the two, so short names tolerate one typo and long names a few.

use crate::index::item::IndexedItem;

/// Accept `distance <= ceil(RATIO * max(query_len, name_len))`.
pub const MAX_DISTANCE_RATIO: f64 = 0.4;

/// Cap on the fallback candidate set.
pub const MAX_FUZZY_RESULTS: usize = 20;

/// An index entry accepted by the fuzzy pass, with its edit distance.
#[derive(Debug, Clone)]
pub struct FuzzyMatch<'a> {
    pub item: &'a IndexedItem,
    pub distance: usize,
}

/// Collect fuzzy candidates for a lower-cased query, sorted by distance
/// ascending (qualified name ascending on ties), capped at
/// [`MAX_FUZZY_RESULTS`].
pub fn fuzzy_matches<'a>(query_lower: &str, items: &'a [IndexedItem]) -> Vec<FuzzyMatch<'a>> {
    let mut matches: Vec<FuzzyMatch<'a>> = items
        .iter()
        .filter_map(|item| {
            let bare = item.bare_name.to_lowercase();
            let longest = query_lower.chars().count().max(bare.chars().count());
            let threshold = (MAX_DISTANCE_RATIO * longest as f64).ceil() as usize;
            let distance = strsim::levenshtein(query_lower, &bare);
            (distance <= threshold).then_some(FuzzyMatch { item, distance })
        })
        .collect();

    matches.sort_by(|a, b| {
        a.distance
            .cmp(&b.distance)
            .then_with(|| a.item.qualified_name.cmp(&b.item.qualified_name))
    });
    matches.truncate(MAX_FUZZY_RESULTS);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::item::ItemKind;

    fn items(paths: &[&str]) -> Vec<IndexedItem> {
        paths
            .iter()
            .map(|p| IndexedItem::new(ItemKind::Struct, *p))
            .collect()
    }

    #[test]
    fn single_deletion_is_within_threshold() {
        let index = items(&["sync::Mutex"]);
        let matches = fuzzy_matches("mutx", &index);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].distance, 1);
        assert_eq!(matches[0].item.bare_name, "Mutex");
    }

    #[test]
    fn distant_names_are_rejected() {
        let index = items(&["net::TcpStream"]);
        assert!(fuzzy_matches("mutex", &index).is_empty());
    }

    #[test]
    fn results_sort_by_distance_then_name() {
        let index = items(&["b::Mutex", "a::Mutex", "sync::Mute"]);
        let matches = fuzzy_matches("mute", &index);
        assert_eq!(matches[0].item.qualified_name, "sync::Mute");
        assert_eq!(matches[1].item.qualified_name, "a::Mutex");
        assert_eq!(matches[2].item.qualified_name, "b::Mutex");
    }

    #[test]
    fn candidate_set_is_capped() {
        let paths: Vec<String> = (0..40).map(|i| format!("m{i:02}::Mutex")).collect();
        let refs: Vec<&str> = paths.iter().map(String::as_str).collect();
        let index = items(&refs);
        assert_eq!(fuzzy_matches("mutex", &index).len(), MAX_FUZZY_RESULTS);
    }
}
