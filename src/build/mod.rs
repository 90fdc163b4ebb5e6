// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Index construction: documents in, page-ordered sentence index out.

pub mod parallel;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};

pub use parallel::*;

/// Cooperative cancellation flag shared between a build and its caller.
///
/// Checked before each page task starts and again at the merge barrier. A
/// page that is already being segmented runs to completion.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Create the progress style used while pages are indexed.
#[cfg(feature = "progress")]
pub fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("━━╸")
}

/// A progress bar for a document of `pages` pages, styled and labelled.
#[cfg(feature = "progress")]
pub fn page_progress_bar(pages: usize) -> ProgressBar {
    let bar = ProgressBar::new(pages as u64);
    bar.set_style(create_progress_style());
    bar.set_prefix("Indexing");
    bar.set_message("pages...");
    bar
}
