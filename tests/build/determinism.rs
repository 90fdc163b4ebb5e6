//! The index is the same no matter how many workers build it.

use crate::common::physics_entries;
use sentex::testing::{synthetic_document, MemoryDocument, PHYSICS_PAGES};
use sentex::{build_index, Index, IndexBuilder};

#[test]
fn test_physics_scenario() {
    let doc = MemoryDocument::from_texts(&PHYSICS_PAGES);
    let index = build_index(&doc).unwrap();
    assert_eq!(index.entries(), physics_entries().as_slice());
}

#[test]
fn test_single_and_many_workers_agree() {
    let doc = synthetic_document(120, 9);
    let single = IndexBuilder::new().workers(1).build(&doc).unwrap();
    for workers in [2, 3, 8, 32] {
        let many = IndexBuilder::new().workers(workers).build(&doc).unwrap();
        assert_eq!(single, many, "{} workers", workers);
    }
}

#[test]
fn test_repeated_builds_are_identical() {
    let doc = synthetic_document(40, 5);
    let builder = IndexBuilder::new().workers(4);
    let first = builder.build(&doc).unwrap();
    for _ in 0..5 {
        assert_eq!(builder.build(&doc).unwrap(), first);
    }
}

#[test]
fn test_entries_are_page_ordered() {
    let doc = synthetic_document(64, 3);
    let index = IndexBuilder::new().workers(8).build(&doc).unwrap();
    let pages: Vec<u32> = index.iter().map(|e| e.page_number).collect();
    assert!(pages.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(index.len(), 64 * 3);
    assert_eq!(index.page_count(), 64);
}

#[test]
fn test_sentence_order_within_page_preserved() {
    let doc = MemoryDocument::from_texts(&["First one. Second one? Third one."]);
    let index = IndexBuilder::new().workers(4).build(&doc).unwrap();
    let sentences: Vec<&str> = index.iter().map(|e| e.sentence.as_str()).collect();
    assert_eq!(sentences, vec!["First one.", "Second one?", "Third one."]);
}

#[test]
fn test_zero_pages_builds_empty_index() {
    let doc = MemoryDocument::from_texts(&[]);
    let index = build_index(&doc).unwrap();
    assert!(index.is_empty());
    assert_eq!(index, Index::default());
}

#[test]
fn test_blank_pages_contribute_nothing() {
    let doc = MemoryDocument::from_texts(&["", "   \n\t ", "Only this."]);
    let index = build_index(&doc).unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index.entries()[0].page_number, 3);
}

#[test]
fn test_more_workers_than_pages() {
    let doc = MemoryDocument::from_texts(&PHYSICS_PAGES);
    let index = IndexBuilder::new().workers(64).build(&doc).unwrap();
    assert_eq!(index.entries(), physics_entries().as_slice());
}
