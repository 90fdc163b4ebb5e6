//! Build and cache invariants.

use proptest::prelude::*;
use sentex::testing::MemoryDocument;
use sentex::{segment, Index, IndexBuilder, IndexCache, IndexEntry};
use tempfile::TempDir;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Word-ish tokens, some of which end a sentence or look like abbreviations.
fn token_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => prop::string::string_regex("[a-z]{1,8}").unwrap(),
        1 => prop::string::string_regex("[A-Z][a-z]{0,6}").unwrap(),
        1 => prop::string::string_regex("[a-z]{1,6}[.?]").unwrap(),
        1 => prop::sample::select(vec![
            "Mr.".to_string(),
            "U.S.".to_string(),
            "e.g.".to_string(),
            "J.".to_string(),
            "3.14".to_string(),
            "énergie.".to_string(),
        ]),
    ]
}

fn page_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(token_strategy(), 0..30).prop_map(|words| words.join(" "))
}

fn pages_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(page_strategy(), 0..12)
}

fn document(pages: &[String]) -> MemoryDocument {
    MemoryDocument::new(pages.iter().cloned().map(Ok).collect())
}

// ============================================================================
// BUILD PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// One worker and many workers produce the same index.
    #[test]
    fn prop_worker_count_does_not_change_index(pages in pages_strategy(), workers in 2usize..9) {
        let doc = document(&pages);
        let single = IndexBuilder::new().workers(1).build(&doc).unwrap();
        let many = IndexBuilder::new().workers(workers).build(&doc).unwrap();
        prop_assert_eq!(single, many);
    }

    /// Entries are non-decreasing in page number, page numbers are in range,
    /// and no sentence is empty or padded.
    #[test]
    fn prop_index_well_formed(pages in pages_strategy()) {
        let index = IndexBuilder::new().build(&document(&pages)).unwrap();
        let mut previous = 0;
        for entry in &index {
            prop_assert!(entry.page_number >= 1);
            prop_assert!(entry.page_number as usize <= pages.len());
            prop_assert!(entry.page_number >= previous);
            prop_assert!(!entry.sentence.is_empty());
            prop_assert_eq!(entry.sentence.trim(), entry.sentence.as_str());
            previous = entry.page_number;
        }
    }

    /// The index is the concatenation of each page's segmentation.
    #[test]
    fn prop_index_is_concatenated_pages(pages in pages_strategy()) {
        let index = IndexBuilder::new().workers(4).build(&document(&pages)).unwrap();
        let expected: Vec<IndexEntry> = pages
            .iter()
            .enumerate()
            .flat_map(|(i, text)| segment((i + 1) as u32, text))
            .collect();
        prop_assert_eq!(index.entries(), expected.as_slice());
    }

    /// Segmentation never loses non-whitespace text.
    #[test]
    fn prop_segment_keeps_every_word(page in page_strategy()) {
        let joined: String = segment(1, &page)
            .iter()
            .map(|e| e.sentence.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let words = |s: &str| s.split_whitespace().map(str::to_string).collect::<Vec<_>>();
        prop_assert_eq!(words(&joined), words(&page));
    }
}

// ============================================================================
// CACHE PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Whatever is saved loads back unchanged, including the empty index.
    #[test]
    fn prop_cache_preserves_index(pages in pages_strategy(), fingerprint in proptest::option::of("[0-9a-f]{8}")) {
        let index = IndexBuilder::new().build(&document(&pages)).unwrap();
        let dir = TempDir::new().unwrap();
        let cache = IndexCache::new(dir.path().join("index.json"));

        cache.save(&index, fingerprint.as_deref()).unwrap();
        let loaded = cache.load().unwrap();
        prop_assert_eq!(loaded.index, index);
        prop_assert_eq!(loaded.fingerprint, fingerprint);
    }

    /// Index::new accepts exactly the page-ordered entry lists.
    #[test]
    fn prop_index_new_checks_order(pages in prop::collection::vec(1u32..20, 0..20)) {
        let entries: Vec<IndexEntry> = pages.iter().map(|&p| IndexEntry::new(p, "s")).collect();
        let ordered = pages.windows(2).all(|w| w[0] <= w[1]);
        prop_assert_eq!(Index::new(entries.clone()).is_ok(), ordered);

        let sorted = Index::from_unordered(entries);
        prop_assert!(Index::new(sorted.into_entries()).is_ok());
    }
}
