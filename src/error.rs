// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types for every stage of the pipeline.
//!
//! Each stage owns its own enum so callers can match on exactly what went
//! wrong: the document could not be read, a page failed during the build, or
//! the cache is missing or unreadable. [`EngineError`] is the union the
//! orchestration layer hands back to its callers.
//!
//! `CacheError::Missing` is the one variant that is not really a failure: the
//! orchestration treats it as "build now" and never shows it to end callers.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Failures opening or reading a paginated document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document path does not exist.
    #[error("no such file: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The bytes were read but are not a document this reader understands.
    #[error("malformed document {}: {reason}", path.display())]
    Malformed { path: PathBuf, reason: String },

    #[error("page index {page_index} out of range (document has {page_count} pages)")]
    PageOutOfRange { page_index: usize, page_count: usize },

    /// Raised by readers that cannot produce text for one particular page.
    #[error("page {page_number}: {reason}")]
    Page { page_number: u32, reason: String },
}

/// One page that could not be extracted or segmented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageFailure {
    pub page_number: u32,
    pub reason: String,
}

impl fmt::Display for PageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {}: {}", self.page_number, self.reason)
    }
}

/// Failures building an index. A build that produced no sentences is not an
/// error; it returns an empty [`Index`](crate::Index).
#[derive(Debug, Error)]
pub enum BuildError {
    /// Every page was attempted; these are all the ones that failed.
    #[error("extraction failed on {} page(s): {}", failures.len(), join_failures(failures))]
    Extraction { failures: Vec<PageFailure> },

    #[error("build cancelled")]
    Cancelled,

    #[error("build exceeded timeout of {0:?}")]
    TimedOut(Duration),

    #[error("failed to start worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

impl BuildError {
    /// Page numbers that failed, empty for non-extraction errors.
    pub fn failed_pages(&self) -> Vec<u32> {
        match self {
            BuildError::Extraction { failures } => {
                failures.iter().map(|f| f.page_number).collect()
            }
            _ => Vec::new(),
        }
    }
}

fn join_failures(failures: &[PageFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failures loading or saving the persisted index.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Nothing persisted yet.
    #[error("no index cache at {}", .0.display())]
    Missing(PathBuf),

    /// A file exists but does not decode into a valid index.
    #[error("index cache at {} is corrupt: {reason}", path.display())]
    Corrupt { path: PathBuf, reason: String },

    #[error("cache i/o on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CacheError {
    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        CacheError::Corrupt {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CacheError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Invalid configuration values or an unreadable config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Everything the orchestration entry points can fail with.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl EngineError {
    /// Stable machine-readable name for the error class.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::Document(DocumentError::FileNotFound(_)) => "fileNotFound",
            EngineError::Document(_) => "document",
            EngineError::Build(BuildError::Extraction { .. }) => "extractionFailure",
            EngineError::Build(BuildError::Cancelled) => "cancelled",
            EngineError::Build(BuildError::TimedOut(_)) => "timedOut",
            EngineError::Build(BuildError::Pool(_)) => "workerPool",
            EngineError::Cache(CacheError::Missing(_)) => "cacheMissing",
            EngineError::Cache(CacheError::Corrupt { .. }) => "cacheCorrupt",
            EngineError::Cache(CacheError::Io { .. }) => "cacheIo",
            EngineError::Config(_) => "config",
        }
    }
}
