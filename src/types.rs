// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a sentence index.
//!
//! | Type             | Purpose                                            |
//! |------------------|----------------------------------------------------|
//! | `IndexEntry`     | One sentence and the 1-based page it came from     |
//! | `Index`          | Every entry of a document, ordered by page         |
//! | `SearchResult`   | One (keyword, entry) match with highlight markup   |
//! | `SearchResponse` | Results plus timing, the answer to one query       |
//!
//! # Invariants
//!
//! - **IndexEntry**: `page_number ≥ 1` (it is `page_index + 1`).
//! - **Index**: page numbers never decrease along the sequence. Within a page,
//!   entries keep the order the segmenter produced them in.
//!
//! `Index` only hands out shared slices, so once built it can be wrapped in an
//! `Arc` and read by any number of searches at once.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// One sentence of the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    /// 1-based page number.
    #[serde(alias = "Page Number")]
    pub page_number: u32,
    #[serde(alias = "Sentence")]
    pub sentence: String,
}

impl IndexEntry {
    pub fn new(page_number: u32, sentence: impl Into<String>) -> Self {
        IndexEntry {
            page_number,
            sentence: sentence.into(),
        }
    }
}

/// Violations of the [`Index`] ordering contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexInvariantError {
    /// Page numbers start at 1.
    ZeroPageNumber { position: usize },
    /// `entries[position - 1].page_number > entries[position].page_number`.
    DecreasingPageNumber {
        position: usize,
        previous: u32,
        current: u32,
    },
}

impl fmt::Display for IndexInvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexInvariantError::ZeroPageNumber { position } => {
                write!(f, "entry {} has page number 0", position)
            }
            IndexInvariantError::DecreasingPageNumber {
                position,
                previous,
                current,
            } => write!(
                f,
                "entry {} has page number {} after page {}",
                position, current, previous
            ),
        }
    }
}

impl std::error::Error for IndexInvariantError {}

/// The page-ordered sentence index of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Index {
    entries: Vec<IndexEntry>,
}

impl Index {
    /// Wrap entries that are already in page order, checking the invariant.
    pub fn new(entries: Vec<IndexEntry>) -> Result<Self, IndexInvariantError> {
        for (position, entry) in entries.iter().enumerate() {
            if entry.page_number == 0 {
                return Err(IndexInvariantError::ZeroPageNumber { position });
            }
            if position > 0 {
                let previous = entries[position - 1].page_number;
                if previous > entry.page_number {
                    return Err(IndexInvariantError::DecreasingPageNumber {
                        position,
                        previous,
                        current: entry.page_number,
                    });
                }
            }
        }
        Ok(Index { entries })
    }

    /// Order entries gathered in any order.
    ///
    /// The sort is stable, so entries of the same page keep their relative
    /// order. That is what makes the result independent of which worker
    /// finished first: each page's entries arrive as one contiguous run.
    pub fn from_unordered(mut entries: Vec<IndexEntry>) -> Self {
        entries.sort_by_key(|e| e.page_number);
        Index { entries }
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IndexEntry> {
        self.entries.iter()
    }

    /// Number of distinct pages that produced at least one sentence.
    pub fn page_count(&self) -> usize {
        let mut pages = 0;
        let mut last = None;
        for entry in &self.entries {
            if last != Some(entry.page_number) {
                pages += 1;
                last = Some(entry.page_number);
            }
        }
        pages
    }

    pub fn into_entries(self) -> Vec<IndexEntry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Index {
    type Item = &'a IndexEntry;
    type IntoIter = std::slice::Iter<'a, IndexEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// One keyword occurring in one sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub keyword: String,
    pub page_number: u32,
    /// The sentence as markup: text escaped, every occurrence of `keyword`
    /// wrapped in highlight markers.
    pub sentence: String,
}

/// Answer to one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub duration_seconds: f64,
    pub result_count: usize,
}

impl SearchResponse {
    pub fn new(results: Vec<SearchResult>, duration: Duration) -> Self {
        let result_count = results.len();
        SearchResponse {
            results,
            duration_seconds: duration.as_secs_f64(),
            result_count,
        }
    }

    /// Replace the measured duration, keeping results untouched.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_seconds = duration.as_secs_f64();
        self
    }
}
