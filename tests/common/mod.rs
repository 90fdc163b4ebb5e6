//! Shared test utilities and fixtures.

#![allow(dead_code)]

use sentex::testing::{FailingPage, MemoryDocument};
use sentex::{Config, IndexEntry};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub use sentex::testing::PHYSICS_PAGES;

// ============================================================================
// DOCUMENT FIXTURES
// ============================================================================

/// The physics text as a form-feed separated file.
pub fn physics_text() -> String {
    PHYSICS_PAGES.join("\x0c")
}

/// Entries the physics text must produce, in order.
pub fn physics_entries() -> Vec<IndexEntry> {
    vec![
        IndexEntry::new(1, "Newton's first law holds."),
        IndexEntry::new(1, "It is foundational."),
        IndexEntry::new(2, "The second law of motion is different."),
    ]
}

/// Physics text with page `failing` (1-based) unreadable.
pub fn physics_with_failure(failing: usize) -> MemoryDocument {
    let pages = PHYSICS_PAGES
        .iter()
        .enumerate()
        .map(|(i, text)| {
            if i + 1 == failing {
                Err(FailingPage::new("unreadable page"))
            } else {
                Ok(text.to_string())
            }
        })
        .collect();
    MemoryDocument::new(pages)
}

// ============================================================================
// WORKSPACE
// ============================================================================

/// A temp directory holding a document, with a config pointing at it.
pub struct Workspace {
    pub dir: TempDir,
    pub config: Config,
}

impl Workspace {
    pub fn with_text(text: &str) -> Self {
        let dir = TempDir::new().unwrap();
        let document = dir.path().join("physics.txt");
        fs::write(&document, text).unwrap();
        let config = Config::new(&document);
        Workspace { dir, config }
    }

    pub fn physics() -> Self {
        Self::with_text(&physics_text())
    }

    pub fn document_path(&self) -> &Path {
        &self.config.document_path
    }

    pub fn cache_path(&self) -> PathBuf {
        self.config.cache_path()
    }

    pub fn write_document(&self, text: &str) {
        fs::write(self.document_path(), text).unwrap();
    }

    pub fn cache_bytes(&self) -> Vec<u8> {
        fs::read(self.cache_path()).unwrap()
    }
}
