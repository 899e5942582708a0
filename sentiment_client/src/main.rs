//! Sentiment Client: a command-line report of Fear & Greed scores and broker costs.
//!
//! It resolves a list of symbols (from a text file, from `--symbols`, or the whole catalog),
//! pulls one batch per category from the simulated market feed, scores every instrument,
//! ranks each instrument's brokers by total cost and prints a table or JSON report.
//!
//! Usage example (CLI):
//! ```bash
//! sentiment_client --category cedears --category bonds --seed 42 --explain
//! sentiment_client --path ./symbols.txt --format json
//! ```
//!
//! The symbols file should contain symbols separated by commas, spaces, or new lines.
//! See `sentiment_common::symbols` for details.
#![warn(missing_docs)]
mod args;
mod output;

use crate::args::{Args, OutputFormat};
use crate::output::{CategoryReport, render_json, render_table};
use clap::Parser;
use log::{error, info, warn};
use sentiment_common::config::ProviderConfig;
use sentiment_common::symbols::{Category, SymbolParser, Symbols};
use sentiment_common::{Result, SentimentError};
use sentiment_feed::catalog;
use sentiment_feed::{FeedRequest, MarketFeed, SimulatedMarket, SimulationConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use strum::IntoEnumIterator;

fn main() -> Result<(), SentimentError> {
    init_logger();
    let args = Args::parse();

    let provider = ProviderConfig::from_env();
    info!("Upstream provider: {provider}; using the simulated market");

    let mut categories: Vec<Category> = if args.category.is_empty() {
        Category::iter().collect()
    } else {
        args.category.clone()
    };
    categories.sort();
    categories.dedup();

    let requested = match requested_symbols(&args) {
        Ok(symbols) => symbols,
        Err(e) => {
            error!("Failed to read symbols: {}", e);
            return Err(e);
        }
    };
    if let Some(symbols) = &requested {
        info!("Symbols: {:?}", symbols);
    }

    let requests = build_requests(&categories, requested.as_deref());
    if requests.is_empty() {
        warn!("Nothing to report for categories {:?}", categories);
        return Ok(());
    }

    let market = Arc::new(SimulatedMarket::new(SimulationConfig {
        seed: args.seed,
        ..SimulationConfig::default()
    }));
    let events = MarketFeed::start(market, requests);
    let batches = MarketFeed::collect(&events)?;

    for batch in &batches {
        let report = CategoryReport::from_batch(batch, args.explain);
        match args.format {
            OutputFormat::Table => println!("{}", render_table(&report)),
            OutputFormat::Json => println!("{}", render_json(&report)?),
        }
    }

    Ok(())
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Symbols asked for on the command line, `None` for the whole catalog.
///
/// `--path` wins over `--symbols`.
fn requested_symbols(args: &Args) -> Result<Option<Vec<String>>> {
    if let Some(raw_path) = &args.path {
        let file_path = normalize_path(raw_path);
        if !is_file_exist(&file_path) {
            return Err(SentimentError::ParseSymbolsFile(format!(
                "no such file: {}",
                file_path.display()
            )));
        }
        let text = String::from_utf8(fs::read(&file_path)?)?;
        return Symbols::parse_from_reader(text.as_bytes()).map(Some);
    }
    match &args.symbols {
        Some(list) => Symbols::parse_from_reader(list.as_bytes()).map(Some),
        None => Ok(None),
    }
}

/// One request per category with symbols to fetch.
///
/// Without an explicit list every category gets its whole catalog. With one, each symbol
/// goes to its catalog category. Symbols missing from the catalog are passed to the first
/// category left without known symbols, so the market reports them as unavailable.
fn build_requests(categories: &[Category], requested: Option<&[String]>) -> Vec<FeedRequest> {
    let Some(requested) = requested else {
        return categories
            .iter()
            .map(|&category| FeedRequest::new(category, catalog::symbols(category)))
            .collect();
    };

    let mut unknown: Vec<String> = Vec::new();
    for symbol in requested {
        if let Err(e) = catalog::lookup(symbol) {
            warn!("{}", e);
            unknown.push(symbol.clone());
        }
    }

    let mut requests = Vec::new();
    for &category in categories {
        let known: Vec<String> = requested
            .iter()
            .filter(|symbol| {
                catalog::lookup(symbol).is_ok_and(|entry| entry.category == category)
            })
            .cloned()
            .collect();
        if !known.is_empty() {
            requests.push(FeedRequest::new(category, known));
        } else if !unknown.is_empty() {
            requests.push(FeedRequest::new(category, std::mem::take(&mut unknown)));
        }
    }
    requests
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

/// Returns `true` if the provided path exists and is a regular file.
fn is_file_exist(path: &Path) -> bool {
    path.exists() && path.is_file()
}
