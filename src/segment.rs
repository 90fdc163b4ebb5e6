// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sentence segmentation: page text in, ordered sentences out.
//!
//! This is a heuristic, not a grammar. A sentence ends at a whitespace
//! character that directly follows `.` or `?`, unless the terminal looks like
//! part of an abbreviation:
//!
//! | Pattern before the whitespace  | Example        | Split? |
//! |--------------------------------|----------------|--------|
//! | `word . word terminal`         | "U.S.", "e.g." | no     |
//! | `[A-Z] [a-z] .`                | "Mr.", "Dr."   | no     |
//! | word-initial `[A-Z] .`         | "J. Smith"     | no     |
//! | anything else ending `.` / `?` | "holds. It"    | yes    |
//!
//! It will get some boundaries wrong: a sentence that really ends in a
//! single capital letter ("... plan B. Then") stays glued to the next one,
//! and "etc." always splits. Good enough for locating a keyword on a page,
//! not for linguistics.
//!
//! The split consumes exactly one whitespace character; every piece is then
//! trimmed, and pieces that are empty after trimming are dropped.

use crate::types::IndexEntry;

/// Splits page text into sentences.
///
/// Implementations must be deterministic: the same text always produces the
/// same sentences in the same order.
pub trait Segmenter: Sync {
    /// Split `text` into sentence slices, in reading order.
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Split `text` and tag each sentence with its page number.
    fn segment(&self, page_number: u32, text: &str) -> Vec<IndexEntry> {
        self.split(text)
            .into_iter()
            .map(|sentence| IndexEntry::new(page_number, sentence))
            .collect()
    }
}

/// The abbreviation-aware boundary heuristic described in the module docs.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicSegmenter;

impl Segmenter for HeuristicSegmenter {
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        split_sentences(text)
    }
}

/// Segment one page with [`HeuristicSegmenter`].
pub fn segment(page_number: u32, text: &str) -> Vec<IndexEntry> {
    HeuristicSegmenter.segment(page_number, text)
}

/// `\w` in the usual regex sense.
#[inline]
fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[inline]
fn is_terminal(c: char) -> bool {
    c == '.' || c == '?'
}

/// Decide whether the whitespace at `chars[i]` ends a sentence.
fn is_boundary(chars: &[(usize, char)], i: usize) -> bool {
    if i == 0 || !chars[i].1.is_whitespace() || !is_terminal(chars[i - 1].1) {
        return false;
    }
    let at = |back: usize| chars[i - back].1;

    // "U.S." / "e.g.": word, '.', word, terminal
    if i >= 4 && is_word(at(4)) && at(3) == '.' && is_word(at(2)) {
        return false;
    }

    // "Mr." / "Dr."
    if i >= 3 && at(3).is_ascii_uppercase() && at(2).is_ascii_lowercase() && at(1) == '.' {
        return false;
    }

    // "J. Smith": a lone capital that starts a word
    if i >= 2 && at(1) == '.' && at(2).is_ascii_uppercase() && (i == 2 || !is_word(at(3))) {
        return false;
    }

    true
}

fn split_sentences(text: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;

    for i in 0..chars.len() {
        if is_boundary(&chars, i) {
            let (byte, ws) = chars[i];
            push_trimmed(&mut sentences, &text[start..byte]);
            start = byte + ws.len_utf8();
        }
    }
    push_trimmed(&mut sentences, &text[start..]);

    sentences
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, piece: &'a str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        out.push(piece);
    }
}
