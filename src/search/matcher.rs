// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Case-insensitive literal substring matching.
//!
//! Both sides are compared one character at a time after Unicode lower-case
//! folding. The keyword is plain text: `.`, `*`, `(` and friends match
//! themselves.
//!
//! Matches are found leftmost-first and never overlap. After a match the scan
//! resumes right after it, so `"aa"` in `"aaa"` matches once, at the start.
//! Every match starts and ends on a character boundary of the original
//! haystack, which is what lets highlighting slice the original text.
//!
//! A few characters lower-case to more than one character (`'İ'` becomes
//! `"i\u{307}"`). A match has to cover such an expansion completely, so the
//! keyword `"i"` does not match `"İ"`, while lower-casing both whole strings
//! and testing containment would. The keyword `"i\u{307}"` does match it.

use std::ops::Range;

/// A keyword prepared for repeated matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordMatcher {
    keyword: String,
    folded: Vec<char>,
}

impl KeywordMatcher {
    pub fn new(keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        let folded = keyword.chars().flat_map(char::to_lowercase).collect();
        KeywordMatcher { keyword, folded }
    }

    /// The keyword as the caller wrote it.
    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Does the keyword occur anywhere in `haystack`? An empty keyword never
    /// does.
    pub fn is_match(&self, haystack: &str) -> bool {
        let chars: Vec<(usize, char)> = haystack.char_indices().collect();
        (0..chars.len()).any(|start| self.match_len_at(&chars, start).is_some())
    }

    /// Byte ranges of every non-overlapping occurrence, left to right.
    pub fn find_all(&self, haystack: &str) -> Vec<Range<usize>> {
        let chars: Vec<(usize, char)> = haystack.char_indices().collect();
        let mut ranges = Vec::new();
        let mut pos = 0;

        while pos < chars.len() {
            match self.match_len_at(&chars, pos) {
                Some(len) => {
                    let end_char = pos + len;
                    let end = chars.get(end_char).map_or(haystack.len(), |(b, _)| *b);
                    ranges.push(chars[pos].0..end);
                    pos = end_char;
                }
                None => pos += 1,
            }
        }

        ranges
    }

    /// Number of haystack characters consumed by a match starting at
    /// `chars[start]`, if there is one.
    fn match_len_at(&self, chars: &[(usize, char)], start: usize) -> Option<usize> {
        if self.folded.is_empty() {
            return None;
        }

        let mut k = 0;
        let mut j = start;
        while k < self.folded.len() {
            let (_, c) = *chars.get(j)?;
            for lower in c.to_lowercase() {
                if self.folded.get(k) != Some(&lower) {
                    return None;
                }
                k += 1;
            }
            j += 1;
        }

        Some(j - start)
    }
}
