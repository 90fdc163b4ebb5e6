// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Highlight markup.
//!
//! Results are markup: the sentence text is escaped (`&`, `<`, `>` become
//! entities) and the markers are inserted around each match. Because escaped
//! text never contains `<` or `>`, markers that contain either character can
//! always be told apart from the sentence, and [`HighlightMarkers::strip`]
//! gives back the stored sentence exactly.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Opening and closing markup wrapped around each match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightMarkers {
    pub open: String,
    pub close: String,
}

impl Default for HighlightMarkers {
    fn default() -> Self {
        HighlightMarkers {
            open: "<b>".to_string(),
            close: "</b>".to_string(),
        }
    }
}

impl HighlightMarkers {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        HighlightMarkers {
            open: open.into(),
            close: close.into(),
        }
    }

    /// Both markers contain `<` or `>`, so they cannot collide with escaped
    /// sentence text.
    pub fn is_markup(&self) -> bool {
        let tagged = |m: &str| m.contains(['<', '>']);
        tagged(&self.open) && tagged(&self.close)
    }

    /// Escape `text` and wrap each range in markers. Ranges index the
    /// unescaped text and must be sorted, disjoint, and on character
    /// boundaries (as [`KeywordMatcher::find_all`] returns them).
    ///
    /// [`KeywordMatcher::find_all`]: super::KeywordMatcher::find_all
    pub fn apply(&self, text: &str, ranges: &[Range<usize>]) -> String {
        let extra = ranges.len() * (self.open.len() + self.close.len());
        let mut out = String::with_capacity(text.len() + extra);
        let mut last = 0;
        for range in ranges {
            escape_into(&mut out, &text[last..range.start]);
            out.push_str(&self.open);
            escape_into(&mut out, &text[range.clone()]);
            out.push_str(&self.close);
            last = range.end;
        }
        escape_into(&mut out, &text[last..]);
        out
    }

    /// Remove every marker and unescape, recovering the original text.
    pub fn strip(&self, text: &str) -> String {
        self.restyle(text, "", "")
    }

    /// Swap the markers in highlighted `text` for `open` / `close` and
    /// unescape the rest, e.g. to print matches with terminal styling.
    pub fn restyle(&self, text: &str, open: &str, close: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while !rest.is_empty() {
            let next_open = rest.find(&self.open).map(|i| (i, &self.open, open));
            let next_close = rest.find(&self.close).map(|i| (i, &self.close, close));
            let next = match (next_open, next_close) {
                (Some(o), Some(c)) => Some(if c.0 < o.0 { c } else { o }),
                (o, c) => o.or(c),
            };
            match next {
                Some((at, marker, replacement)) if !marker.is_empty() => {
                    out.push_str(&unescape(&rest[..at]));
                    out.push_str(replacement);
                    rest = &rest[at + marker.len()..];
                }
                _ => {
                    out.push_str(&unescape(rest));
                    break;
                }
            }
        }
        out
    }
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

/// Inverse of [`escape_into`]. `&amp;` goes last so `&amp;lt;` comes back as
/// `&lt;`, not `<`.
fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
