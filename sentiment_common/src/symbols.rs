//! Instrument categories and symbol list parsing shared by the feed and the client.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::BufRead;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::SentimentError;

/// Trait providing symbol list parsing from text.
pub trait SymbolParser {
    /// Parses symbols from a buffered reader.
    ///
    /// Symbols may be separated by commas, spaces or new lines. They are trimmed and
    /// upper-cased; empty tokens and repeated symbols are dropped (first occurrence wins).
    /// Returns an error for a token containing anything other than ASCII alphanumerics,
    /// `.` or `-`.
    fn parse_from_reader<R: BufRead>(reader: R) -> Result<Vec<String>, SentimentError>;
}

/// Marker type implementing [`SymbolParser`] for plain string symbols.
pub struct Symbols;

impl SymbolParser for Symbols {
    fn parse_from_reader<R: BufRead>(reader: R) -> Result<Vec<String>, SentimentError> {
        let mut symbols: Vec<String> = Vec::new();

        for line_result in reader.lines() {
            let line = line_result.map_err(SentimentError::Io)?;
            for token in line.split(|ch: char| ch == ',' || ch.is_whitespace()) {
                if token.is_empty() {
                    continue;
                }
                let symbol = normalize_symbol(token)?;
                if !symbols.contains(&symbol) {
                    symbols.push(symbol);
                }
            }
        }
        Ok(symbols)
    }
}

/// Trim and upper-case a single symbol, rejecting characters no exchange uses.
pub fn normalize_symbol(raw: &str) -> Result<String, SentimentError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SentimentError::ParseSymbolsFile(String::from("empty symbol")));
    }
    if let Some(ch) = trimmed
        .chars()
        .find(|ch| !(ch.is_ascii_alphanumeric() || *ch == '.' || *ch == '-'))
    {
        return Err(SentimentError::ParseSymbolsFile(format!(
            "invalid character '{}' in symbol '{}'",
            ch, trimmed
        )));
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// Instrument families the simulated brokers quote.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ValueEnum,
    Display,
    EnumString,
    EnumIter,
    Hash,
    PartialOrd,
    Ord,
    Eq,
    PartialEq,
)]
#[clap(rename_all = "lower")]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Category {
    /// Listed shares and ETFs.
    Stocks,
    /// Argentine depositary receipts for foreign shares.
    Cedears,
    /// Sovereign bonds and treasury bills.
    Bonds,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn splits_on_commas_spaces_and_lines() {
        let input = "aapl, msft\nGD30  al30\n\n tsla.ba,";
        let symbols = Symbols::parse_from_reader(Cursor::new(input)).expect("valid input");
        assert_eq!(symbols, vec!["AAPL", "MSFT", "GD30", "AL30", "TSLA.BA"]);
    }

    #[test]
    fn drops_repeated_symbols() {
        let symbols =
            Symbols::parse_from_reader(Cursor::new("AAPL aapl AAPL,SPY")).expect("valid input");
        assert_eq!(symbols, vec!["AAPL", "SPY"]);
    }

    #[test]
    fn rejects_invalid_characters() {
        let err = Symbols::parse_from_reader(Cursor::new("AAPL$")).expect_err("must fail");
        assert!(matches!(err, SentimentError::ParseSymbolsFile(_)));
    }

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("CEDEARS".parse::<Category>().expect("known"), Category::Cedears);
        assert_eq!(Category::Bonds.to_string(), "bonds");
    }
}
