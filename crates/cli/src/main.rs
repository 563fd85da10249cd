//! quarry: rank a directory of text files against free-text queries.
//!
//! ```text
//! quarry --corpus papers/ --top 5 "household air pollution" "cookstove"
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `info`).

mod commands;
mod corpus;
mod format;
mod markdown;

use std::path::Path;
use std::process;

use quarry_core::{EngineConfig, Result};
use quarry_search::SearchEngine;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use format::{format_error, format_hits, OutputMode};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = build_cli().get_matches();
    let mode = if matches.get_flag("json") {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    if let Err(e) = run(&matches, mode) {
        eprintln!("{}", format_error(&e, mode));
        process::exit(1);
    }
}

fn run(matches: &clap::ArgMatches, mode: OutputMode) -> Result<()> {
    let config = match matches.get_one::<String>("config") {
        Some(path) => EngineConfig::from_file(Path::new(path))?,
        None => EngineConfig::default(),
    };
    let engine = SearchEngine::with_config(config)?;

    let corpus = matches
        .get_one::<String>("corpus")
        .map(String::as_str)
        .unwrap_or(".");
    let documents = corpus::load_corpus(Path::new(corpus))?;
    let report = engine.bulk_index(documents);
    engine.check_consistency()?;
    info!(
        indexed = report.indexed,
        rejected = report.failures.len(),
        corpus,
        "Corpus loaded"
    );

    let top = matches
        .get_one::<usize>("top")
        .copied()
        .unwrap_or(commands::DEFAULT_TOP);
    let queries: Vec<&String> = matches
        .get_many::<String>("query")
        .map(|q| q.collect())
        .unwrap_or_default();

    for query in &queries {
        if queries.len() > 1 && mode == OutputMode::Human {
            println!("== {} ==", query);
        }
        println!("{}", format_hits(&engine.search_top(query, top), mode));
    }
    Ok(())
}
