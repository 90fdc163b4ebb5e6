// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Orchestration: cache-or-build, then search.
//!
//! # The cache decision
//!
//! | Cache state                        | Action                                  |
//! |------------------------------------|-----------------------------------------|
//! | missing                            | build, save, use                        |
//! | present, fingerprint matches/absent| use as-is                               |
//! | present, fingerprint differs       | rebuild, save, use                      |
//! | corrupt                            | error (or rebuild, if configured)       |
//!
//! The document is opened before the cache is consulted, so a missing
//! document is always reported as such, even when a cache is lying around.
//!
//! A build that fails never reaches `save`: whatever cache was on disk before
//! is still there, byte for byte.
//!
//! # Entry points
//!
//! - [`ensure_index`]: make sure a usable cache exists, return the index.
//! - [`run_search`]: one-shot query, timed from the cache step onwards.
//! - [`Engine`]: long-lived; loads the index once and shares it between
//!   concurrent callers.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::build::{CancelToken, IndexBuilder};
use crate::cache::IndexCache;
use crate::config::{Config, CorruptCachePolicy};
use crate::document::{Document, DocumentSource, PagedTextSource};
use crate::error::{CacheError, EngineError};
use crate::search::SearchEngine;
use crate::types::{Index, SearchResponse, SearchResult};

/// Why an existing cache was replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildReason {
    /// The document changed since the cache was written.
    Stale,
    /// The cache could not be decoded and the config allows rebuilding.
    Corrupt,
    /// The caller asked for it.
    Forced,
}

/// Where the index handed back by [`ensure_index`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexSource {
    Cache,
    Built,
    Rebuilt(RebuildReason),
}

#[derive(Debug, Clone)]
pub struct EnsuredIndex {
    pub index: Arc<Index>,
    pub source: IndexSource,
}

/// One run of the cache-or-build pipeline for a given config.
pub struct Pipeline<'a> {
    config: &'a Config,
    source: &'a dyn DocumentSource,
    cancel: CancelToken,
    #[cfg_attr(not(feature = "progress"), allow(dead_code))]
    show_progress: bool,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config) -> Self {
        Pipeline {
            config,
            source: &PagedTextSource,
            cancel: CancelToken::new(),
            show_progress: false,
        }
    }

    pub fn source(mut self, source: &'a dyn DocumentSource) -> Self {
        self.source = source;
        self
    }

    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Draw a progress bar on stderr while pages are indexed. Ignored when
    /// the `progress` feature is off.
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Load the cache, building (and saving) the index when needed.
    pub fn ensure(&self) -> Result<EnsuredIndex, EngineError> {
        self.config.validate()?;
        let document = self.source.open(&self.config.document_path)?;
        let fingerprint = document.fingerprint();
        let cache = IndexCache::new(self.config.cache_path());

        match cache.load() {
            Ok(cached) => match (&cached.fingerprint, &fingerprint) {
                (Some(stored), Some(current)) if stored != current => {
                    warn!(
                        target: "sentex::engine",
                        cache = %cache.path().display(),
                        stored = %stored,
                        current = %current,
                        "index cache is stale, rebuilding"
                    );
                    self.build_and_save(
                        &*document,
                        &cache,
                        fingerprint.as_deref(),
                        IndexSource::Rebuilt(RebuildReason::Stale),
                    )
                }
                _ => {
                    info!(
                        target: "sentex::engine",
                        cache = %cache.path().display(),
                        entries = cached.index.len(),
                        "using cached index"
                    );
                    Ok(EnsuredIndex {
                        index: Arc::new(cached.index),
                        source: IndexSource::Cache,
                    })
                }
            },
            Err(CacheError::Missing(_)) => {
                info!(
                    target: "sentex::engine",
                    cache = %cache.path().display(),
                    "no index cache, building"
                );
                self.build_and_save(
                    &*document,
                    &cache,
                    fingerprint.as_deref(),
                    IndexSource::Built,
                )
            }
            Err(err @ CacheError::Corrupt { .. }) => match self.config.on_corrupt_cache {
                CorruptCachePolicy::Rebuild => {
                    warn!(
                        target: "sentex::engine",
                        error = %err,
                        "index cache is corrupt, rebuilding"
                    );
                    self.build_and_save(
                        &*document,
                        &cache,
                        fingerprint.as_deref(),
                        IndexSource::Rebuilt(RebuildReason::Corrupt),
                    )
                }
                CorruptCachePolicy::Fail => Err(err.into()),
            },
            Err(err) => Err(err.into()),
        }
    }

    /// Build from the document and replace the cache, whatever its state.
    pub fn rebuild(&self) -> Result<EnsuredIndex, EngineError> {
        self.config.validate()?;
        let document = self.source.open(&self.config.document_path)?;
        let fingerprint = document.fingerprint();
        let cache = IndexCache::new(self.config.cache_path());
        self.build_and_save(
            &*document,
            &cache,
            fingerprint.as_deref(),
            IndexSource::Rebuilt(RebuildReason::Forced),
        )
    }

    /// Ensure the index, then search it. The duration covers both steps.
    pub fn search<K: AsRef<str>>(&self, keywords: &[K]) -> Result<SearchResponse, EngineError> {
        let started = Instant::now();
        let ensured = self.ensure()?;
        let engine = SearchEngine::new(self.config.highlight.clone());
        let response = engine
            .search(&ensured.index, keywords)
            .with_duration(started.elapsed());

        info!(
            target: "sentex::engine",
            keywords = keywords.len(),
            results = response.result_count,
            duration_s = response.duration_seconds,
            "search complete"
        );
        Ok(response)
    }

    fn builder(&self) -> IndexBuilder {
        let mut builder = IndexBuilder::new().cancel_token(self.cancel.clone());
        if let Some(workers) = self.config.workers {
            builder = builder.workers(workers);
        }
        if let Some(timeout) = self.config.timeout() {
            builder = builder.timeout(timeout);
        }
        builder
    }

    fn build_and_save(
        &self,
        document: &dyn Document,
        cache: &IndexCache,
        fingerprint: Option<&str>,
        source: IndexSource,
    ) -> Result<EnsuredIndex, EngineError> {
        let index = self.build(document)?;
        cache.save(&index, fingerprint)?;
        Ok(EnsuredIndex {
            index: Arc::new(index),
            source,
        })
    }

    #[cfg(feature = "progress")]
    fn build(&self, document: &dyn Document) -> Result<Index, EngineError> {
        let builder = self.builder();
        if !self.show_progress {
            return Ok(builder.build(document)?);
        }

        let bar = crate::build::page_progress_bar(document.page_count());
        match builder.build_with_progress(document, &bar) {
            Ok(index) => {
                bar.finish_with_message(format!("{} sentences", index.len()));
                Ok(index)
            }
            Err(err) => {
                bar.abandon_with_message("failed");
                Err(err.into())
            }
        }
    }

    #[cfg(not(feature = "progress"))]
    fn build(&self, document: &dyn Document) -> Result<Index, EngineError> {
        Ok(self.builder().build(document)?)
    }
}

/// Build and persist the index unless a usable cache already exists.
pub fn ensure_index(config: &Config) -> Result<EnsuredIndex, EngineError> {
    Pipeline::new(config).ensure()
}

/// Build and persist the index, replacing any cache.
pub fn rebuild_index(config: &Config) -> Result<EnsuredIndex, EngineError> {
    Pipeline::new(config).rebuild()
}

/// Answer one query against the configured document.
pub fn run_search<K: AsRef<str>>(
    config: &Config,
    keywords: &[K],
) -> Result<SearchResponse, EngineError> {
    Pipeline::new(config).search(keywords)
}

/// Long-lived search front end.
///
/// The index is loaded (or built) by the first caller that needs it and kept
/// in memory. Later callers share the same `Arc<Index>`; searches never block
/// each other.
pub struct Engine {
    config: Config,
    source: Box<dyn DocumentSource>,
    cancel: CancelToken,
    search: SearchEngine,
    index: RwLock<Option<Arc<Index>>>,
}

impl Engine {
    pub fn new(config: Config) -> Result<Self, EngineError> {
        Self::with_source(config, PagedTextSource)
    }

    pub fn with_source(
        config: Config,
        source: impl DocumentSource + 'static,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let search = SearchEngine::new(config.highlight.clone());
        Ok(Engine {
            config,
            source: Box::new(source),
            cancel: CancelToken::new(),
            search,
            index: RwLock::new(None),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Token that cancels an in-flight build started by this engine.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    fn pipeline(&self) -> Pipeline<'_> {
        Pipeline::new(&self.config)
            .source(self.source.as_ref())
            .cancel_token(self.cancel.clone())
    }

    /// The loaded index, loading or building it on first use.
    pub fn index(&self) -> Result<Arc<Index>, EngineError> {
        if let Some(index) = self.index.read().clone() {
            return Ok(index);
        }

        let mut slot = self.index.write();
        if let Some(index) = slot.as_ref() {
            return Ok(Arc::clone(index));
        }
        let ensured = self.pipeline().ensure()?;
        *slot = Some(Arc::clone(&ensured.index));
        Ok(ensured.index)
    }

    /// Drop the in-memory index and go through the cache decision again.
    pub fn reload(&self) -> Result<Arc<Index>, EngineError> {
        self.index.write().take();
        self.index()
    }

    /// Search the loaded index. The duration includes loading the index when
    /// this is the first call.
    pub fn search<K: AsRef<str>>(&self, keywords: &[K]) -> Result<SearchResponse, EngineError> {
        let started = Instant::now();
        let index = self.index()?;
        Ok(self
            .search
            .search(&index, keywords)
            .with_duration(started.elapsed()))
    }
}

/// Serializable outcome of a search: a response, or an explicit error that
/// cannot be mistaken for "no matches". Errors still carry an empty result
/// list, so readers of `results` need no special case.
///
/// ```json
/// { "status": "ok", "results": [...], "durationSeconds": 0.01, "resultCount": 2 }
/// { "status": "error", "kind": "fileNotFound", "message": "no such file: book.txt",
///   "results": [], "resultCount": 0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum SearchReply {
    Ok(SearchResponse),
    #[serde(rename_all = "camelCase")]
    Error {
        kind: String,
        message: String,
        #[serde(default)]
        results: Vec<SearchResult>,
        #[serde(default)]
        result_count: usize,
    },
}

impl SearchReply {
    pub fn from_result(result: Result<SearchResponse, EngineError>) -> Self {
        match result {
            Ok(response) => SearchReply::Ok(response),
            Err(err) => SearchReply::Error {
                kind: err.kind().to_string(),
                message: err.to_string(),
                results: Vec::new(),
                result_count: 0,
            },
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, SearchReply::Ok(_))
    }
}
