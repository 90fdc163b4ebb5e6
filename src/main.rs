use anyhow::Context;
use clap::Parser;

use sentex::{IndexCache, Pipeline, SearchReply};

mod cli;
use cli::{display, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    cli::init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("❌ {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the failure was already reported on stdout.
fn run(cli: Cli) -> anyhow::Result<bool> {
    match cli.command {
        Commands::Index { source, force } => {
            let config = source.to_config()?;
            let pipeline = Pipeline::new(&config).show_progress(display::use_progress());
            let ensured = if force {
                pipeline.rebuild()
            } else {
                pipeline.ensure()
            }
            .with_context(|| format!("indexing {}", config.document_path.display()))?;
            display::print_index_summary(&config, &ensured);
            Ok(true)
        }

        Commands::Search {
            source,
            json,
            keywords,
        } => {
            let config = source.to_config()?;
            let pipeline = Pipeline::new(&config).show_progress(!json && display::use_progress());
            let result = pipeline.search(&keywords);

            if json {
                let reply = SearchReply::from_result(result);
                println!("{}", serde_json::to_string_pretty(&reply)?);
                return Ok(reply.is_ok());
            }

            let response = result
                .with_context(|| format!("searching {}", config.document_path.display()))?;
            display::print_results(&keywords, &response, &config.highlight);
            Ok(true)
        }

        Commands::Inspect { file } => {
            let cached = IndexCache::new(&file)
                .load()
                .with_context(|| format!("reading {}", file.display()))?;
            display::print_cache_summary(&file, &cached);
            Ok(true)
        }
    }
}
