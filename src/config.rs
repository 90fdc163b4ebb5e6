// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Orchestration configuration.
//!
//! Everything the entry points need travels in one [`Config`]: no
//! process-wide paths. A config can be built in code, read from a JSON file,
//! or assembled from CLI flags (flags win over file values).
//!
//! ```json
//! {
//!   "documentPath": "resources/physics.txt",
//!   "cachePath": "resources/index.json",
//!   "workers": 8,
//!   "timeoutMs": 120000,
//!   "onCorruptCache": "fail",
//!   "highlight": { "open": "<b>", "close": "</b>" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::search::HighlightMarkers;

/// What to do when the cache file exists but cannot be decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptCachePolicy {
    /// Stop with an error; the file needs a human.
    #[default]
    Fail,
    /// Rebuild from the document and overwrite the corrupt file.
    Rebuild,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub document_path: PathBuf,
    /// Defaults to `<document stem>.index.json` beside the document.
    #[serde(default)]
    pub cache_path: Option<PathBuf>,
    #[serde(default)]
    pub workers: Option<usize>,
    /// Whole-build deadline in milliseconds.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    #[serde(default)]
    pub on_corrupt_cache: CorruptCachePolicy,
    #[serde(default)]
    pub highlight: HighlightMarkers,
}

impl Config {
    pub fn new(document_path: impl Into<PathBuf>) -> Self {
        Config {
            document_path: document_path.into(),
            cache_path: None,
            workers: None,
            timeout_ms: None,
            on_corrupt_cache: CorruptCachePolicy::default(),
            highlight: HighlightMarkers::default(),
        }
    }

    pub fn with_cache_path(mut self, cache_path: impl Into<PathBuf>) -> Self {
        self.cache_path = Some(cache_path.into());
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Sub-millisecond remainders round up, so only `Duration::ZERO` is
    /// stored as zero.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let millis = timeout.as_nanos().div_ceil(1_000_000);
        self.timeout_ms = Some(u64::try_from(millis).unwrap_or(u64::MAX));
        self
    }

    pub fn with_corrupt_cache_policy(mut self, policy: CorruptCachePolicy) -> Self {
        self.on_corrupt_cache = policy;
        self
    }

    /// Read a JSON config file. Relative paths inside it are resolved against
    /// the file's directory.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;

        if let Some(base) = path.parent() {
            config.document_path = resolve(base, &config.document_path);
            config.cache_path = config.cache_path.map(|p| resolve(base, &p));
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.document_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("documentPath is empty".to_string()));
        }
        if self.workers == Some(0) {
            return Err(ConfigError::Invalid("workers must be at least 1".to_string()));
        }
        if self.highlight.open.is_empty() || self.highlight.close.is_empty() {
            return Err(ConfigError::Invalid(
                "highlight markers must not be empty".to_string(),
            ));
        }
        if !self.highlight.is_markup() {
            return Err(ConfigError::Invalid(
                "highlight markers must be tags containing '<' or '>'".to_string(),
            ));
        }
        Ok(())
    }

    /// Where the index cache lives.
    pub fn cache_path(&self) -> PathBuf {
        match &self.cache_path {
            Some(path) => path.clone(),
            None => default_cache_path(&self.document_path),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

/// `book.txt` → `book.index.json` in the same directory.
pub fn default_cache_path(document_path: &Path) -> PathBuf {
    let stem = document_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    document_path.with_file_name(format!("{}.index.json", stem))
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path.to_path_buf()
    }
}
