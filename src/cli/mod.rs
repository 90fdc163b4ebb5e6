// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the sentex command-line interface.
//!
//! Three subcommands: `index` builds (or reuses) the sentence index cache,
//! `search` queries it, and `inspect` summarizes a cache file. Settings come
//! from an optional JSON config file; flags override it.

pub mod display;

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use sentex::{Config, ConfigError, CorruptCachePolicy};

#[derive(Parser)]
#[command(
    name = "sentex",
    about = "Sentence-level keyword search over paginated documents",
    version
)]
pub struct Cli {
    /// More log output on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the sentence index for a document, or reuse a valid cache
    Index {
        #[command(flatten)]
        source: SourceArgs,

        /// Rebuild even when the cache is current
        #[arg(long)]
        force: bool,
    },

    /// Search the document's sentences for keywords (case-insensitive)
    Search {
        #[command(flatten)]
        source: SourceArgs,

        /// Print the reply as JSON, including errors
        #[arg(long)]
        json: bool,

        /// Keywords; each match is reported once per keyword
        keywords: Vec<String>,
    },

    /// Show what an index cache file contains
    Inspect {
        /// Path to the cache file
        file: PathBuf,
    },
}

/// Where the document and its cache live, and how to build.
#[derive(Args)]
pub struct SourceArgs {
    /// Paginated document: form-feed separated text, or JSON pages
    #[arg(short, long)]
    pub document: Option<PathBuf>,

    /// Index cache file (default: <document stem>.index.json)
    #[arg(short, long)]
    pub cache: Option<PathBuf>,

    /// JSON config file; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Worker threads for the build (default: available parallelism)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Give up on the build after this many seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Rebuild instead of failing when the cache is corrupt
    #[arg(long)]
    pub rebuild_corrupt: bool,
}

impl SourceArgs {
    pub fn to_config(&self) -> Result<Config, ConfigError> {
        let mut config = match (&self.config, &self.document) {
            (Some(path), _) => Config::from_file(path)?,
            (None, Some(document)) => Config::new(document),
            (None, None) => {
                return Err(ConfigError::Invalid(
                    "either --document or --config is required".to_string(),
                ))
            }
        };

        if let Some(document) = &self.document {
            config.document_path = document.clone();
        }
        if let Some(cache) = &self.cache {
            config = config.with_cache_path(cache);
        }
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if self.rebuild_corrupt {
            config = config.with_corrupt_cache_policy(CorruptCachePolicy::Rebuild);
        }

        config.validate()?;
        Ok(config)
    }
}

/// Log to stderr. `RUST_LOG` wins; otherwise verbosity picks the level.
pub fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
