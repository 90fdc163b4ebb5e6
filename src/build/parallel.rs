// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel index construction.
//!
//! Reading and segmenting pages is embarrassingly parallel: every page is an
//! independent task that reads its own text and produces its own entries.
//! Rayon does the fan-out on a pool sized to the machine (or to whatever the
//! caller asked for). Nothing is shared between tasks except an atomic
//! progress counter.
//!
//! The only subtle part is the merge. Results are gathered first and sorted
//! by page number afterwards, with a stable sort, so the index comes out the
//! same no matter how many workers ran or which page finished first.
//!
//! Failures are collected, not short-circuited: every page is attempted and
//! the error names all the pages that could not be read.

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

#[cfg(feature = "progress")]
use indicatif::ProgressBar;

use super::CancelToken;
use crate::document::Document;
use crate::error::{BuildError, PageFailure};
use crate::segment::{HeuristicSegmenter, Segmenter};
use crate::types::{Index, IndexEntry};

/// What one page task produced.
enum PageOutcome {
    Sentences(Vec<IndexEntry>),
    Failed(PageFailure),
    /// Not attempted: the build was cancelled or ran out of time first.
    Skipped,
}

/// Builds a page-ordered [`Index`] from a [`Document`].
///
/// ```ignore
/// let index = IndexBuilder::new()
///     .workers(4)
///     .timeout(Duration::from_secs(60))
///     .build(&document)?;
/// ```
#[derive(Debug, Clone)]
pub struct IndexBuilder<S = HeuristicSegmenter> {
    segmenter: S,
    workers: Option<usize>,
    timeout: Option<Duration>,
    cancel: CancelToken,
}

impl IndexBuilder<HeuristicSegmenter> {
    pub fn new() -> Self {
        Self::with_segmenter(HeuristicSegmenter)
    }
}

impl Default for IndexBuilder<HeuristicSegmenter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Segmenter> IndexBuilder<S> {
    pub fn with_segmenter(segmenter: S) -> Self {
        IndexBuilder {
            segmenter,
            workers: None,
            timeout: None,
            cancel: CancelToken::new(),
        }
    }

    /// Fix the worker pool size. Zero is treated as one.
    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Abort the build if it runs longer than `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Share a token another thread can use to cancel the build.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Number of worker threads a build will use.
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(default_workers).max(1)
    }

    /// Build the index.
    pub fn build<D: Document + ?Sized>(&self, document: &D) -> Result<Index, BuildError> {
        self.build_inner(document, &|_| {})
    }

    /// Build the index, advancing `progress` once per finished page.
    #[cfg(feature = "progress")]
    pub fn build_with_progress<D: Document + ?Sized>(
        &self,
        document: &D,
        progress: &ProgressBar,
    ) -> Result<Index, BuildError> {
        let total = document.page_count();
        progress.set_length(total as u64);
        self.build_inner(document, &|done| {
            progress.set_position(done as u64);
            if done % 10 == 0 || done == total {
                progress.set_message(format!("{}/{}", done, total));
            }
        })
    }

    fn build_inner<D: Document + ?Sized>(
        &self,
        document: &D,
        on_page: &(dyn Fn(usize) + Sync),
    ) -> Result<Index, BuildError> {
        let started = Instant::now();
        let deadline = self.timeout.map(|t| started + t);
        let page_count = document.page_count();
        let workers = self.worker_count();

        info!(
            target: "sentex::build",
            pages = page_count,
            workers,
            "building sentence index"
        );

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("sentex-page-{}", i))
            .build()?;

        let counter = AtomicUsize::new(0);

        let outcomes: Vec<PageOutcome> = pool.install(|| {
            (0..page_count)
                .into_par_iter()
                .map(|page_index| {
                    if self.should_stop(deadline) {
                        return PageOutcome::Skipped;
                    }

                    let outcome = self.run_page(document, page_index);

                    let done = counter.fetch_add(1, Ordering::Relaxed) + 1;
                    on_page(done);

                    outcome
                })
                .collect()
        });

        // Barrier: every task has returned.
        if self.cancel.is_cancelled() {
            info!(target: "sentex::build", "build cancelled");
            return Err(BuildError::Cancelled);
        }
        if let (Some(deadline), Some(timeout)) = (deadline, self.timeout) {
            if Instant::now() >= deadline {
                warn!(target: "sentex::build", ?timeout, "build timed out");
                return Err(BuildError::TimedOut(timeout));
            }
        }

        let mut entries = Vec::new();
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                PageOutcome::Sentences(page_entries) => entries.extend(page_entries),
                PageOutcome::Failed(failure) => failures.push(failure),
                PageOutcome::Skipped => return Err(BuildError::Cancelled),
            }
        }

        if !failures.is_empty() {
            failures.sort_by_key(|f| f.page_number);
            return Err(BuildError::Extraction { failures });
        }

        // Sort by page number to maintain consistent ordering
        let index = Index::from_unordered(entries);

        info!(
            target: "sentex::build",
            entries = index.len(),
            pages = page_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "sentence index built"
        );

        Ok(index)
    }

    fn should_stop(&self, deadline: Option<Instant>) -> bool {
        self.cancel.is_cancelled() || deadline.is_some_and(|d| Instant::now() >= d)
    }

    fn run_page<D: Document + ?Sized>(&self, document: &D, page_index: usize) -> PageOutcome {
        let page_number = (page_index + 1) as u32;
        match document.page_text(page_index) {
            Ok(text) => {
                let entries = self.segmenter.segment(page_number, &text);
                debug!(
                    target: "sentex::build",
                    page = page_number,
                    sentences = entries.len(),
                    "page segmented"
                );
                PageOutcome::Sentences(entries)
            }
            Err(e) => {
                warn!(target: "sentex::build", page = page_number, error = %e, "page extraction failed");
                PageOutcome::Failed(PageFailure {
                    page_number,
                    reason: e.to_string(),
                })
            }
        }
    }
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Build an index with default settings.
pub fn build_index<D: Document + ?Sized>(document: &D) -> Result<Index, BuildError> {
    IndexBuilder::new().build(document)
}
