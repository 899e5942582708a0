//! Command-line arguments for the sentiment client.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use clap::{Parser, ValueEnum};
use sentiment_common::symbols::Category;

/// How reports are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human readable tables.
    #[default]
    Table,
    /// One pretty-printed JSON report per category.
    Json,
}

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Categories to report on. Repeat to select several; all of them when omitted.
    #[clap(long, value_enum)]
    pub category: Vec<Category>,

    /// Comma-separated symbols to report on instead of the whole catalog.
    #[clap(long)]
    pub symbols: Option<String>,

    /// Path to a text file with symbols to report on.
    /// Symbols may be separated by commas, spaces, or new lines.
    #[clap(long)]
    pub path: Option<String>,

    /// Seed for a reproducible simulated market.
    #[clap(long)]
    pub seed: Option<u64>,

    /// Output format.
    #[clap(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Print the factor breakdown behind each score.
    #[clap(long)]
    pub explain: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_all_categories_and_table() {
        let args = Args::try_parse_from(["sentiment_client"]).expect("valid args");
        assert!(args.category.is_empty());
        assert_eq!(args.format, OutputFormat::Table);
        assert!(!args.explain);
        assert!(args.seed.is_none());
    }

    #[test]
    fn accepts_repeated_categories() {
        let args = Args::try_parse_from([
            "sentiment_client",
            "--category",
            "bonds",
            "--category",
            "cedears",
            "--format",
            "json",
            "--seed",
            "7",
        ])
        .expect("valid args");
        assert_eq!(args.category, vec![Category::Bonds, Category::Cedears]);
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.seed, Some(7));
    }

    #[test]
    fn rejects_unknown_category() {
        assert!(Args::try_parse_from(["sentiment_client", "--category", "futures"]).is_err());
    }
}
