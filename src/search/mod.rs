// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Keyword search over a built index.
//!
//! One pass over the index, in index order. For every entry, every keyword is
//! tried in the order the caller gave them; each hit becomes its own
//! [`SearchResult`], so a sentence containing two keywords shows up twice,
//! once per keyword, each copy highlighting only its own keyword.
//!
//! No ranking, no stemming, no fuzziness: a keyword either occurs in the
//! sentence (ignoring case) or it does not.
//!
//! The scan only reads the index, so any number of threads can search the
//! same `Arc<Index>` at once.

mod highlight;
mod matcher;

use std::time::Instant;

use crate::types::{Index, SearchResponse, SearchResult};

pub use highlight::HighlightMarkers;
pub use matcher::KeywordMatcher;

/// Runs keyword queries and formats highlighted results.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    markers: HighlightMarkers,
}

impl SearchEngine {
    pub fn new(markers: HighlightMarkers) -> Self {
        SearchEngine { markers }
    }

    pub fn markers(&self) -> &HighlightMarkers {
        &self.markers
    }

    /// Search `index` for `keywords`; the duration covers the scan only.
    pub fn search<K: AsRef<str>>(&self, index: &Index, keywords: &[K]) -> SearchResponse {
        let started = Instant::now();
        let results = self.matches(index, keywords);
        SearchResponse::new(results, started.elapsed())
    }

    /// The results of [`search`](Self::search) without timing.
    pub fn matches<K: AsRef<str>>(&self, index: &Index, keywords: &[K]) -> Vec<SearchResult> {
        let matchers: Vec<KeywordMatcher> = keywords
            .iter()
            .map(|k| KeywordMatcher::new(k.as_ref()))
            .collect();

        let mut results = Vec::new();
        if matchers.is_empty() {
            return results;
        }

        for entry in index {
            for matcher in &matchers {
                let ranges = matcher.find_all(&entry.sentence);
                if ranges.is_empty() {
                    continue;
                }
                results.push(SearchResult {
                    keyword: matcher.keyword().to_string(),
                    page_number: entry.page_number,
                    sentence: self.markers.apply(&entry.sentence, &ranges),
                });
            }
        }

        results
    }
}

/// Search with the default `<b>`…`</b>` markers.
pub fn search<K: AsRef<str>>(index: &Index, keywords: &[K]) -> SearchResponse {
    SearchEngine::default().search(index, keywords)
}
