//! Free-text search over the [`GlobalIndex`].
//!
//! Matching is plain case-insensitive substring containment against the
//! record's title, author and library label; there is no ranking.

use hub_extract::models::BookRecord;

use crate::GlobalIndex;

/// Upper bound of matches returned by [`GlobalIndex::search`].
pub const MAX_RESULTS: usize = 200;
/// How many matches a results list shows.
pub const DISPLAY_LIMIT: usize = 40;

impl GlobalIndex {
    /// Records matching `query`, in index order, at most [`MAX_RESULTS`].
    ///
    /// A blank query matches nothing: the caller shows an idle prompt rather
    /// than "no results".
    pub fn search(&self, query: &str) -> Vec<&BookRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.records()
            .iter()
            .zip(&self.haystacks)
            .filter(|(_, haystack)| haystack.contains(&needle))
            .map(|(record, _)| record)
            .take(MAX_RESULTS)
            .collect()
    }
}

/// The part of a result list that gets displayed.
pub fn display<T>(results: &[T]) -> &[T] {
    &results[..results.len().min(DISPLAY_LIMIT)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::tests::index_of;
    use rstest::rstest;

    fn sample() -> GlobalIndex {
        index_of(vec![
            ("ale", "ALE Gallery", vec![("Dune", "Frank Herbert"), ("Emma", "Jane Austen")]),
            ("bob", "Bob's Shelf", vec![("Dune Messiah", "Frank Herbert"), ("Persuasion", "Jane Austen")]),
        ])
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn blank_query_matches_nothing(#[case] query: &str) {
        assert!(sample().search(query).is_empty());
    }

    #[rstest]
    #[case("dune", &["Dune", "Dune Messiah"])]
    #[case("DUNE", &["Dune", "Dune Messiah"])]
    #[case("  austen ", &["Emma", "Persuasion"])]
    #[case("gallery", &["Dune", "Emma"])]
    #[case("bob's", &["Dune Messiah", "Persuasion"])]
    #[case("dune frank", &["Dune"])]
    #[case("tolkien", &[])]
    fn substring_matches(#[case] query: &str, #[case] titles: &[&str]) {
        let index = sample();
        let found: Vec<_> = index.search(query).iter().map(|r| r.title.as_str()).collect();
        assert_eq!(found, titles);
    }

    #[test]
    fn results_are_capped_and_ordered() {
        let books: Vec<(String, String)> = (0..500).map(|i| (format!("Saga {i:03}"), "Anon".to_string())).collect();
        let books: Vec<(&str, &str)> = books.iter().map(|(t, a)| (t.as_str(), a.as_str())).collect();
        let index = index_of(vec![("ale", "Ale", books)]);
        assert_eq!(index.len(), 500);
        let results = index.search("saga");
        assert_eq!(results.len(), MAX_RESULTS);
        let positions: Vec<_> =
            results.iter().map(|r| index.records().iter().position(|x| std::ptr::eq(x, *r)).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(results[0].title, "Saga 000");
        assert_eq!(display(&results).len(), DISPLAY_LIMIT);
    }

    #[test]
    fn display_keeps_short_lists() {
        let results = sample().search("dune").len();
        assert_eq!(results, 2);
        assert_eq!(display(&[1, 2, 3]), &[1, 2, 3]);
    }
}
