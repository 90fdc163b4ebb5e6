//! Building from document files on disk.

use crate::common::{physics_entries, physics_text};
use sentex::{build_index, open_document, Document, DocumentError};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_form_feed_text_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("physics.txt");
    fs::write(&path, physics_text()).unwrap();

    let doc = open_document(&path).unwrap();
    assert_eq!(doc.page_count(), 2);
    assert_eq!(build_index(&doc).unwrap().entries(), physics_entries().as_slice());
}

#[test]
fn test_json_pages_file() {
    let dir = TempDir::new().unwrap();
    let list = dir.path().join("list.json");
    let object = dir.path().join("object.json");
    let pages = serde_json::json!([
        "Newton's first law holds. It is foundational.",
        "The second law of motion is different."
    ]);
    fs::write(&list, pages.to_string()).unwrap();
    fs::write(&object, serde_json::json!({ "pages": pages }).to_string()).unwrap();

    for path in [list, object] {
        let doc = open_document(&path).unwrap();
        assert_eq!(build_index(&doc).unwrap().entries(), physics_entries().as_slice());
    }
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = open_document(dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, DocumentError::FileNotFound(_)));
}

#[test]
fn test_fingerprint_tracks_content() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("physics.txt");
    fs::write(&path, physics_text()).unwrap();
    let before = open_document(&path).unwrap().fingerprint();

    fs::write(&path, "Something else entirely.").unwrap();
    let after = open_document(&path).unwrap().fingerprint();

    assert!(before.is_some());
    assert_ne!(before, after);
}
