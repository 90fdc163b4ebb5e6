// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{fingerprint_bytes, Document};
use crate::error::DocumentError;

/// Page break emitted by `pdftotext` and friends.
const FORM_FEED: char = '\x0c';

#[derive(Deserialize)]
#[serde(untagged)]
enum PagesJson {
    List(Vec<String>),
    Object { pages: Vec<String> },
}

/// A document held in memory as one string per page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedDocument {
    path: Option<PathBuf>,
    pages: Vec<String>,
    fingerprint: Option<String>,
}

impl PagedDocument {
    /// Read a document from disk.
    ///
    /// `.json` files are parsed as a list of pages; anything else is UTF-8
    /// text split on form feeds.
    pub fn open(path: &Path) -> Result<Self, DocumentError> {
        let bytes = fs::read(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DocumentError::FileNotFound(path.to_path_buf()),
            _ => DocumentError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let pages = if is_json {
            match serde_json::from_slice::<PagesJson>(&bytes) {
                Ok(PagesJson::List(pages)) | Ok(PagesJson::Object { pages }) => pages,
                Err(e) => {
                    return Err(DocumentError::Malformed {
                        path: path.to_path_buf(),
                        reason: format!("expected a JSON list of pages: {}", e),
                    })
                }
            }
        } else {
            let text = std::str::from_utf8(&bytes).map_err(|e| DocumentError::Malformed {
                path: path.to_path_buf(),
                reason: format!("not UTF-8 text: {}", e),
            })?;
            split_pages(text)
        };

        Ok(PagedDocument {
            path: Some(path.to_path_buf()),
            pages,
            fingerprint: Some(fingerprint_bytes(&bytes)),
        })
    }

    /// Build a document from page strings already in memory.
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pages: Vec<String> = pages.into_iter().map(Into::into).collect();
        let fingerprint = fingerprint_bytes(pages.join("\x0c").as_bytes());
        PagedDocument {
            path: None,
            pages,
            fingerprint: Some(fingerprint),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }
}

impl Document for PagedDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, page_index: usize) -> Result<String, DocumentError> {
        self.pages
            .get(page_index)
            .cloned()
            .ok_or(DocumentError::PageOutOfRange {
                page_index,
                page_count: self.pages.len(),
            })
    }

    fn fingerprint(&self) -> Option<String> {
        self.fingerprint.clone()
    }
}

/// Split on form feeds. A single trailing form feed closes the last page
/// rather than opening an empty one.
fn split_pages(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let body = text.strip_suffix(FORM_FEED).unwrap_or(text);
    body.split(FORM_FEED).map(str::to_string).collect()
}
