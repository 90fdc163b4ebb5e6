//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides in-memory documents, including ones whose pages fail to read,
//! so tests can drive the builder and the orchestration without PDF fixtures.

#![doc(hidden)]

use std::path::Path;

use crate::document::{fingerprint_bytes, Document, DocumentSource};
use crate::error::DocumentError;

/// The two-page physics text used throughout the tests.
pub const PHYSICS_PAGES: [&str; 2] = [
    "Newton's first law holds. It is foundational.",
    "The second law of motion is different.",
];

/// A page that cannot be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailingPage {
    pub reason: String,
}

impl FailingPage {
    pub fn new(reason: &str) -> Self {
        FailingPage {
            reason: reason.to_string(),
        }
    }
}

/// A document held in memory, where any page may be made to fail.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    pages: Vec<Result<String, FailingPage>>,
    fingerprint: Option<String>,
}

impl MemoryDocument {
    pub fn new(pages: Vec<Result<String, FailingPage>>) -> Self {
        let joined: String = pages
            .iter()
            .map(|p| match p {
                Ok(text) => text.as_str(),
                Err(f) => f.reason.as_str(),
            })
            .collect::<Vec<_>>()
            .join("\x0c");
        MemoryDocument {
            pages,
            fingerprint: Some(fingerprint_bytes(joined.as_bytes())),
        }
    }

    pub fn from_texts(texts: &[&str]) -> Self {
        Self::new(texts.iter().map(|t| Ok(t.to_string())).collect())
    }
}

impl Document for MemoryDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, page_index: usize) -> Result<String, DocumentError> {
        match self.pages.get(page_index) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(failure)) => Err(DocumentError::Page {
                page_number: (page_index + 1) as u32,
                reason: failure.reason.clone(),
            }),
            None => Err(DocumentError::PageOutOfRange {
                page_index,
                page_count: self.pages.len(),
            }),
        }
    }

    fn fingerprint(&self) -> Option<String> {
        self.fingerprint.clone()
    }
}

/// A [`DocumentSource`] that hands out the same in-memory document for any
/// path.
#[derive(Debug, Clone)]
pub struct MemorySource {
    document: MemoryDocument,
}

impl MemorySource {
    pub fn new(document: MemoryDocument) -> Self {
        MemorySource { document }
    }
}

impl DocumentSource for MemorySource {
    fn open(&self, _path: &Path) -> Result<Box<dyn Document + Send>, DocumentError> {
        Ok(Box::new(self.document.clone()))
    }
}

/// Document of `pages` pages, each with `sentences_per_page` short sentences
/// mentioning a few physics terms.
pub fn synthetic_document(pages: usize, sentences_per_page: usize) -> MemoryDocument {
    const TERMS: [&str; 6] = ["force", "mass", "energy", "momentum", "law", "motion"];
    let texts: Vec<String> = (0..pages)
        .map(|p| {
            (0..sentences_per_page)
                .map(|s| {
                    let term = TERMS[(p * 7 + s * 3) % TERMS.len()];
                    format!("Page {} sentence {} covers {}.", p + 1, s + 1, term)
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    MemoryDocument::new(texts.into_iter().map(Ok).collect())
}
