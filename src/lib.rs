//! Sentence-level keyword search over paginated documents.
//!
//! Split every page of a document into sentences, keep them in a page-ordered
//! index cached on disk, and answer keyword queries with highlighted matches.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ document.rs  │──▶│  segment.rs  │──▶│  build/      │──▶│   cache.rs   │
//! │ (Document,   │   │ (Segmenter,  │   │ (IndexBuilder│   │ (IndexCache, │
//! │  page_text)  │   │  heuristic)  │   │  rayon pool) │   │  atomic save)│
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────┬───────┘
//!                                                                 │
//!        keywords ──▶ ┌──────────────┐   ┌──────────────┐         │
//!                     │  engine.rs   │──▶│  search/     │◀────────┘
//!                     │ (ensure,     │   │ (matcher,    │  Arc<Index>
//!                     │  run_search) │   │  highlight)  │
//!                     └──────────────┘   └──────────────┘
//! ```
//!
//! | Module     | Role                                                   |
//! |------------|--------------------------------------------------------|
//! | `document` | Paginated text source (`Document`, `PagedDocument`)    |
//! | `segment`  | Abbreviation-aware sentence splitting                  |
//! | `build`    | Parallel per-page build, deterministic merge           |
//! | `cache`    | Versioned JSON cache, temp-file + rename writes        |
//! | `search`   | Case-insensitive literal matching and highlighting     |
//! | `engine`   | Cache-or-build decision, timed search, shared `Engine` |
//! | `config`   | Explicit configuration, no global paths                |
//!
//! # Usage
//!
//! ```ignore
//! use sentex::{run_search, Config};
//!
//! let config = Config::new("resources/physics.txt");
//! let response = run_search(&config, &["law", "motion"])?;
//! for result in &response.results {
//!     println!("p.{} {}", result.page_number, result.sentence);
//! }
//! ```

pub mod build;
pub mod cache;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod search;
pub mod segment;
pub mod testing;
mod types;

pub use build::{build_index, CancelToken, IndexBuilder};
pub use cache::{CachedIndex, IndexCache, CACHE_VERSION};
pub use config::{Config, CorruptCachePolicy};
pub use document::{open_document, Document, DocumentSource, PagedDocument, PagedTextSource};
pub use engine::{
    ensure_index, rebuild_index, run_search, Engine, EnsuredIndex, IndexSource, Pipeline,
    RebuildReason, SearchReply,
};
pub use error::{BuildError, CacheError, ConfigError, DocumentError, EngineError, PageFailure};
pub use search::{search, HighlightMarkers, KeywordMatcher, SearchEngine};
pub use segment::{segment, HeuristicSegmenter, Segmenter};
pub use types::{Index, IndexEntry, IndexInvariantError, SearchResponse, SearchResult};
