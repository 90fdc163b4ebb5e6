// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Paginated documents: the text-extraction boundary.
//!
//! The index builder only ever sees a [`Document`]: a page count and a way to
//! get one page's raw text. Where that text comes from (a PDF text layer, an
//! OCR pass, a pre-extracted dump) is the reader's business.
//!
//! The crate ships one reader, [`PagedDocument`], which understands the two
//! formats PDF-to-text pipelines usually leave behind:
//!
//! - plain UTF-8 text with pages separated by form feeds (`\x0c`),
//! - JSON, either `["page 1", "page 2"]` or `{"pages": [...]}`.

mod paged;

use std::path::Path;

use crate::error::DocumentError;

pub use paged::PagedDocument;

/// A document whose pages can be read independently and concurrently.
///
/// `page_text` is called from worker threads, one call per page, so
/// implementations must be `Sync` and must not depend on call order.
pub trait Document: Sync {
    /// Total number of pages.
    fn page_count(&self) -> usize;

    /// Raw text of the page at 0-based `page_index`.
    fn page_text(&self, page_index: usize) -> Result<String, DocumentError>;

    /// Content fingerprint used to detect a stale cache, if the reader can
    /// compute one.
    fn fingerprint(&self) -> Option<String> {
        None
    }
}

impl<D: Document + ?Sized> Document for &D {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn page_text(&self, page_index: usize) -> Result<String, DocumentError> {
        (**self).page_text(page_index)
    }

    fn fingerprint(&self) -> Option<String> {
        (**self).fingerprint()
    }
}

impl<D: Document + ?Sized> Document for Box<D> {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn page_text(&self, page_index: usize) -> Result<String, DocumentError> {
        (**self).page_text(page_index)
    }

    fn fingerprint(&self) -> Option<String> {
        (**self).fingerprint()
    }
}

/// Opens documents by path.
pub trait DocumentSource: Send + Sync {
    fn open(&self, path: &Path) -> Result<Box<dyn Document + Send>, DocumentError>;
}

/// [`DocumentSource`] backed by [`PagedDocument`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PagedTextSource;

impl DocumentSource for PagedTextSource {
    fn open(&self, path: &Path) -> Result<Box<dyn Document + Send>, DocumentError> {
        Ok(Box::new(PagedDocument::open(path)?))
    }
}

/// Open a document with the default reader.
pub fn open_document(path: impl AsRef<Path>) -> Result<PagedDocument, DocumentError> {
    PagedDocument::open(path.as_ref())
}

/// CRC32 of the raw bytes, as eight lowercase hex digits.
pub fn fingerprint_bytes(bytes: &[u8]) -> String {
    format!("{:08x}", crc32fast::hash(bytes))
}
