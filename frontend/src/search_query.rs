//! Canonical query assembly
//!
//! Turns the live UI inputs (search text, structured filter, page) into the
//! [`EncounterQuery`] the encounter store receives. Assembly is a pure
//! function of its arguments: the same inputs always produce the same query,
//! and the produced query never aliases live filter state.

use shared::{EncounterQuery, SearchFilter};

/// Maximum search length (in `char`s) forwarded to the store. Longer input
/// is silently truncated to this prefix.
pub const MAX_SEARCH_LEN: usize = 64;

/// Deterministic prefix truncation of the raw search box contents.
///
/// Counted in `char`s so multi-byte input can never split a UTF-8 boundary.
pub fn truncate_search(search: &str) -> String {
    search.chars().take(MAX_SEARCH_LEN).collect()
}

/// Assemble the canonical query for one fetch.
///
/// The filter's sets are copied by value: mutating the live filter after a
/// query has been issued must not retroactively change that query. The
/// minimum-duration sentinel is resolved here against the settings default,
/// so the store always receives a concrete threshold.
pub fn assemble(
    search: &str,
    filter: &SearchFilter,
    page: u32,
    page_size: u32,
    default_min_duration: i64,
) -> EncounterQuery {
    EncounterQuery {
        page,
        page_size,
        search: truncate_search(search),
        filter: SearchFilter {
            min_duration: filter.effective_min_duration(default_min_duration),
            bosses: filter.bosses.clone(),
            classes: filter.classes.clone(),
            cleared_only: filter.cleared_only,
            favorites_only: filter.favorites_only,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_is_a_fixed_char_prefix() {
        let long = "a".repeat(MAX_SEARCH_LEN + 30);
        let truncated = truncate_search(&long);
        assert_eq!(truncated.chars().count(), MAX_SEARCH_LEN);
        assert!(long.starts_with(&truncated));

        // Multi-byte input truncates on char boundaries, not bytes.
        let umlauts = "ö".repeat(MAX_SEARCH_LEN + 5);
        assert_eq!(truncate_search(&umlauts).chars().count(), MAX_SEARCH_LEN);

        assert_eq!(truncate_search("brel"), "brel");
    }

    #[test]
    fn sentinel_min_duration_resolves_to_the_settings_default() {
        let filter = SearchFilter::default();
        let query = assemble("", &filter, 1, 10, 30_000);
        assert_eq!(query.filter.min_duration, 30_000);

        let explicit = SearchFilter {
            min_duration: 5_000,
            ..SearchFilter::default()
        };
        let query = assemble("", &explicit, 1, 10, 30_000);
        assert_eq!(query.filter.min_duration, 5_000);
    }

    #[test]
    fn issued_queries_do_not_alias_the_live_filter() {
        let mut filter = SearchFilter::default();
        filter.bosses.insert("Valtan".to_string());
        filter.classes.insert(102);

        let query = assemble("vykas", &filter, 2, 10, 30_000);

        // Mutations after assembly must not leak into the issued query.
        filter.bosses.insert("Brelshaza".to_string());
        filter.classes.clear();
        filter.cleared_only = true;

        assert_eq!(query.filter.bosses.len(), 1);
        assert!(query.filter.bosses.contains("Valtan"));
        assert_eq!(query.filter.classes.len(), 1);
        assert!(!query.filter.cleared_only);
    }

    #[test]
    fn assembly_is_idempotent_for_equal_inputs() {
        let filter = SearchFilter {
            min_duration: 15_000,
            ..SearchFilter::default()
        };
        let a = assemble("brel", &filter, 3, 10, 30_000);
        let b = assemble("brel", &filter, 3, 10, 30_000);
        assert_eq!(a, b);
    }
}
