// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal output for the sentex CLI.
//!
//! OneDark colors on dark terminals, One Light on light ones. The theme comes
//! from `SENTEX_THEME` when set, then `COLORFGBG`, then defaults to dark.
//! `NO_COLOR` and non-TTY stdout turn styling off entirely, in which case
//! highlighted sentences are printed with their markup as-is.

use std::path::Path;
use std::sync::OnceLock;

use sentex::{CachedIndex, Config, EnsuredIndex, HighlightMarkers, IndexSource, SearchResponse};

// Width between │ and │, excluding the border chars
pub const BOX_WIDTH: usize = 80;

// ═══════════════════════════════════════════════════════════════════════════
// THEME DETECTION
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

static THEME: OnceLock<Theme> = OnceLock::new();

fn detect_theme() -> Theme {
    if let Ok(theme) = std::env::var("SENTEX_THEME") {
        match theme.to_lowercase().as_str() {
            "light" | "l" => return Theme::Light,
            "dark" | "d" => return Theme::Dark,
            _ => {}
        }
    }

    // "fg;bg", where bg 7 and up (except 8) is a light background
    if let Ok(colorfgbg) = std::env::var("COLORFGBG") {
        if let Some(bg) = colorfgbg.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                if bg_num >= 7 && bg_num != 8 {
                    return Theme::Light;
                }
            }
        }
    }

    Theme::Dark
}

pub fn theme() -> Theme {
    *THEME.get_or_init(detect_theme)
}

// ═══════════════════════════════════════════════════════════════════════════
// PALETTES
// ═══════════════════════════════════════════════════════════════════════════

fn rgb(r: u8, g: u8, b: u8) -> String {
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
}

pub use colors::*;

mod onedark {
    pub const RED: (u8, u8, u8) = (224, 108, 117); // #e06c75
    pub const GREEN: (u8, u8, u8) = (152, 195, 121); // #98c379
    pub const YELLOW: (u8, u8, u8) = (229, 192, 123); // #e5c07b
    pub const CYAN: (u8, u8, u8) = (86, 182, 194); // #56b6c2
    pub const GRAY: (u8, u8, u8) = (92, 99, 112); // #5c6370
}

mod onelight {
    pub const RED: (u8, u8, u8) = (228, 86, 73); // #e45649
    pub const GREEN: (u8, u8, u8) = (80, 161, 79); // #50a14f
    pub const YELLOW: (u8, u8, u8) = (193, 132, 1); // #c18401
    pub const CYAN: (u8, u8, u8) = (1, 132, 188); // #0184bc
    pub const GRAY: (u8, u8, u8) = (160, 161, 167); // #a0a1a7
}

macro_rules! theme_color {
    ($name:ident) => {
        #[allow(non_snake_case)]
        pub fn $name() -> String {
            let (r, g, b) = match theme() {
                Theme::Dark => onedark::$name,
                Theme::Light => onelight::$name,
            };
            rgb(r, g, b)
        }
    };
}

theme_color!(RED);
theme_color!(GREEN);
theme_color!(YELLOW);
theme_color!(CYAN);
theme_color!(GRAY);

// ═══════════════════════════════════════════════════════════════════════════
// CORE UTILITIES
// ═══════════════════════════════════════════════════════════════════════════

/// Styling is on only for a TTY stdout without `NO_COLOR`.
pub fn use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Progress bars go to stderr, so they follow stderr's TTY state.
pub fn use_progress() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn themed(color_fn: fn() -> String, modifiers: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}{}", modifiers.join(""), color_fn(), text, RESET)
    } else {
        text.to_string()
    }
}

/// Visible length, skipping ANSI escapes.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

/// Swap highlight markup for terminal styling. Without colors the markers
/// stay in the text; either way entities are decoded.
pub fn render_highlights(sentence: &str, markers: &HighlightMarkers, colors: bool) -> String {
    if !colors {
        return markers.restyle(sentence, &markers.open, &markers.close);
    }
    let open = format!("{}{}", BOLD, YELLOW());
    markers.restyle(sentence, &open, RESET)
}

/// Greedy word wrap on visible width. Words longer than `width` get a line
/// of their own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = visible_len(word);
        if current_len > 0 && current_len + 1 + word_len > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub fn format_duration(seconds: f64) -> String {
    let text = if seconds < 1.0 {
        format!("{:.2} ms", seconds * 1000.0)
    } else {
        format!("{:.2} s", seconds)
    };
    let color: fn() -> String = if seconds < 0.05 {
        GREEN
    } else if seconds < 1.0 {
        YELLOW
    } else {
        RED
    };
    themed(color, &[], &text)
}

// ═══════════════════════════════════════════════════════════════════════════
// BOX DRAWING
// ═══════════════════════════════════════════════════════════════════════════

/// │ content          │
pub fn row(content: &str) {
    let border = border();
    let len = visible_len(content);
    let pad = BOX_WIDTH.saturating_sub(len);
    println!(
        "{}│{}{}{}{}│{}",
        border,
        reset(),
        content,
        " ".repeat(pad),
        border,
        reset()
    );
}

/// ┌─ LABEL ──────────┐
pub fn section_top(label: &str) {
    section_line('┌', '┐', label);
}

/// ├─ LABEL ──────────┤
pub fn section_mid(label: &str) {
    section_line('├', '┤', label);
}

/// └──────────────────┘
pub fn section_bot() {
    println!("{}└{}┘{}", border(), "─".repeat(BOX_WIDTH), reset());
}

fn section_line(left: char, right: char, label: &str) {
    let border = border();
    let colored_label = themed(CYAN, &[BOLD], label);
    let label_part = format!("─ {} ", colored_label);
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}{}{}{}{}{}",
        border,
        left,
        reset(),
        label_part,
        border,
        "─".repeat(remaining),
        right,
        reset()
    );
}

fn border() -> String {
    if use_colors() {
        GRAY()
    } else {
        String::new()
    }
}

fn reset() -> &'static str {
    if use_colors() {
        RESET
    } else {
        ""
    }
}

fn key_value(key: &str, value: &str) {
    let label = themed(GRAY, &[], key);
    let pad = 14usize.saturating_sub(visible_len(&label));
    row(&format!(" {}{}{}", label, " ".repeat(pad), value));
}

// ═══════════════════════════════════════════════════════════════════════════
// REPORTS
// ═══════════════════════════════════════════════════════════════════════════

pub fn print_results(keywords: &[String], response: &SearchResponse, markers: &HighlightMarkers) {
    let colors = use_colors();
    // "p.1234 " plus the keyword tag
    const GUTTER: usize = 8;

    section_top(&format!("RESULTS: {}", keywords.join(", ")));
    if response.results.is_empty() {
        row(&format!(" {}", themed(GRAY, &[DIM], "no matches")));
    }
    for result in &response.results {
        let page = themed(CYAN, &[], &format!("p.{:<5}", result.page_number));
        let tag = themed(GRAY, &[], &format!("[{}]", result.keyword));
        row(&format!(" {} {}", page, tag));

        let sentence = render_highlights(&result.sentence, markers, colors);
        for line in wrap(&sentence, BOX_WIDTH - GUTTER - 1) {
            row(&format!("{}{}", " ".repeat(GUTTER), line));
        }
    }
    section_mid("SUMMARY");
    key_value("results", &response.result_count.to_string());
    key_value("duration", &format_duration(response.duration_seconds));
    section_bot();
}

pub fn print_index_summary(config: &Config, ensured: &EnsuredIndex) {
    let source = match ensured.source {
        IndexSource::Cache => "cache".to_string(),
        IndexSource::Built => "built".to_string(),
        IndexSource::Rebuilt(reason) => format!("rebuilt ({:?})", reason).to_lowercase(),
    };

    section_top("INDEX");
    key_value("document", &config.document_path.display().to_string());
    key_value("cache", &config.cache_path().display().to_string());
    key_value("source", &themed(GREEN, &[BOLD], &source));
    key_value("pages", &ensured.index.page_count().to_string());
    key_value("sentences", &ensured.index.len().to_string());
    section_bot();
}

pub fn print_cache_summary(path: &Path, cached: &CachedIndex) {
    let version = if cached.version == 0 {
        "0 (legacy)".to_string()
    } else {
        cached.version.to_string()
    };

    section_top("CACHE");
    key_value("file", &path.display().to_string());
    key_value("version", &version);
    key_value(
        "fingerprint",
        cached.fingerprint.as_deref().unwrap_or("none"),
    );
    key_value("pages", &cached.index.page_count().to_string());
    key_value("sentences", &cached.index.len().to_string());
    if let Some(first) = cached.index.iter().next() {
        key_value("first", &format!("p.{} {}", first.page_number, first.sentence));
    }
    section_bot();
}
