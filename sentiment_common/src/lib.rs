//!
//! Scoring, ranking and shared types for the broker sentiment workspace.
//!
//! This crate aggregates:
//! - `error`: unified error type `SentimentError` used across the workspace.
//! - `result`: handy `Result<T, SentimentError>` alias.
//! - `model`: instrument snapshots, broker quotes and lenient upstream rows.
//! - `scorer`: Fear & Greed score per instrument and the market index.
//! - `ranker`: broker ranking by effective total cost.
//! - `sentiment`: sentiment bands, labels and colour lookups.
//! - `provider`: market-data, broker-quote and exchange-rate provider contracts.
//! - `symbols`: instrument categories and symbol list parsing.
//! - `config`: upstream provider configuration.
#![warn(missing_docs)]
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod ranker;
pub mod result;
pub mod scorer;
pub mod sentiment;
pub mod symbols;

pub use error::SentimentError;
pub use model::{BrokerQuote, InstrumentSnapshot, RawInstrument};
pub use provider::{
    BrokerQuoteProvider, FetchResult, MarketDataProvider, MarketSentiment, UsdRateProvider,
};
pub use ranker::{BrokerRanking, CostRanker, RankedQuote};
pub use result::Result;
pub use scorer::{MarketIndex, ScoredInstrument, SentimentScorer};
pub use sentiment::Sentiment;
