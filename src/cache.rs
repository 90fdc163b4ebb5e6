// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! On-disk index cache.
//!
//! Building an index reads and segments every page, so it runs once per
//! document version and the result is kept as JSON next to the document:
//!
//! ```json
//! { "version": 1, "fingerprint": "9f3c1a2b",
//!   "entries": [ { "pageNumber": 1, "sentence": "..." } ] }
//! ```
//!
//! A bare array of entries (the older layout, without version or
//! fingerprint) still loads.
//!
//! # Writes
//!
//! `save` serializes into a temp file in the same directory, fsyncs it, and
//! renames it over the cache, so a reader sees either the old file or the new
//! one, never half of each. Concurrent writers are serialized with an
//! exclusive lock on `<cache>.lock`.

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::CacheError;
use crate::types::{Index, IndexEntry};

/// Current envelope version.
pub const CACHE_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    fingerprint: Option<&'a str>,
    entries: &'a [IndexEntry],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CacheFile {
    Envelope {
        version: u32,
        #[serde(default)]
        fingerprint: Option<String>,
        entries: Vec<IndexEntry>,
    },
    Legacy(Vec<IndexEntry>),
}

/// An index read back from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedIndex {
    pub index: Index,
    /// Envelope version; `0` for the legacy bare-array layout.
    pub version: u32,
    /// Fingerprint of the document the index was built from, if recorded.
    pub fingerprint: Option<String>,
}

/// A single cache file at a fixed path.
#[derive(Debug, Clone)]
pub struct IndexCache {
    path: PathBuf,
}

impl IndexCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        IndexCache { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load and validate the cached index.
    pub fn load(&self) -> Result<CachedIndex, CacheError> {
        let bytes = fs::read(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => CacheError::Missing(self.path.clone()),
            _ => CacheError::io(&self.path, e),
        })?;

        let cached = decode(&bytes).map_err(|reason| CacheError::corrupt(&self.path, reason))?;

        debug!(
            target: "sentex::cache",
            path = %self.path.display(),
            entries = cached.index.len(),
            version = cached.version,
            "index cache loaded"
        );
        Ok(cached)
    }

    /// Replace the cache with `index`.
    pub fn save(&self, index: &Index, fingerprint: Option<&str>) -> Result<(), CacheError> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|e| CacheError::io(&parent, e))?;

        let lock_path = self.sibling(".lock", false);
        let lock_file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)
            .map_err(|e| CacheError::io(&lock_path, e))?;
        lock_file
            .lock_exclusive()
            .map_err(|e| CacheError::io(&lock_path, e))?;

        let result = self.write_locked(&parent, index, fingerprint);

        let _ = FileExt::unlock(&lock_file);
        result
    }

    fn write_locked(
        &self,
        parent: &Path,
        index: &Index,
        fingerprint: Option<&str>,
    ) -> Result<(), CacheError> {
        let tmp_path = self.sibling(&format!(".tmp.{}", std::process::id()), true);

        let envelope = EnvelopeRef {
            version: CACHE_VERSION,
            fingerprint,
            entries: index.entries(),
        };

        if let Err(e) = write_json(&tmp_path, &envelope) {
            let _ = fs::remove_file(&tmp_path);
            return Err(CacheError::io(&tmp_path, e));
        }

        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(CacheError::io(&self.path, e));
        }

        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }

        info!(
            target: "sentex::cache",
            path = %self.path.display(),
            entries = index.len(),
            "index cache written"
        );
        Ok(())
    }

    /// `<name><suffix>` in the cache's directory, optionally hidden.
    fn sibling(&self, suffix: &str, hidden: bool) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "index.json".to_string());
        let name = if hidden {
            format!(".{}{}", name, suffix)
        } else {
            format!("{}{}", name, suffix)
        };
        self.path.with_file_name(name)
    }
}

fn write_json(path: &Path, value: &impl Serialize) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush()?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()
}

fn decode(bytes: &[u8]) -> Result<CachedIndex, String> {
    let file: CacheFile = serde_json::from_slice(bytes).map_err(|e| e.to_string())?;

    let (version, fingerprint, entries) = match file {
        CacheFile::Envelope {
            version,
            fingerprint,
            entries,
        } => {
            if version == 0 || version > CACHE_VERSION {
                return Err(format!("unsupported cache version {}", version));
            }
            (version, fingerprint, entries)
        }
        CacheFile::Legacy(entries) => (0, None, entries),
    };

    let index = Index::new(entries).map_err(|e| e.to_string())?;
    Ok(CachedIndex {
        index,
        version,
        fingerprint,
    })
}
