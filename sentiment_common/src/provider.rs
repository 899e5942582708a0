//! Contracts for the collaborators that feed the scorer and the ranker.
//!
//! A `MarketDataProvider` answers a symbol request with a `FetchResult`; a failed fetch is
//! an ordinary value, not an error, and scores to an empty market with the neutral index.
//! A `BrokerQuoteProvider` returns the broker quotes for one instrument in no particular
//! order; ranking them is the job of [`crate::ranker::CostRanker`]. A `UsdRateProvider`
//! supplies the USD/ARS rate shown next to CEDEAR quotes.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::model::{BrokerQuote, InstrumentSnapshot};
use crate::scorer::{MarketIndex, ScoredInstrument, SentimentScorer};

/// Outcome of a market-data fetch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FetchResult {
    /// Whether the provider produced usable data.
    pub success: bool,
    /// Snapshots returned by the provider.
    pub data: Vec<InstrumentSnapshot>,
    /// Provider-reported failure message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FetchResult {
    /// Successful fetch carrying `data`.
    pub fn ok(data: Vec<InstrumentSnapshot>) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }

    /// Failed fetch with a provider message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Vec::new(),
            error: Some(message.into()),
        }
    }
}

/// Source of instrument snapshots.
pub trait MarketDataProvider: Send + Sync {
    /// Fetch snapshots for `symbols`.
    fn fetch(&self, symbols: &[String]) -> FetchResult;
}

/// Source of per-broker quotes for one instrument.
pub trait BrokerQuoteProvider: Send + Sync {
    /// Broker quotes for `symbol`, in no guaranteed order. Empty when unknown.
    fn broker_quotes(&self, symbol: &str) -> Vec<BrokerQuote>;
}

/// Source of the USD/ARS exchange rate.
pub trait UsdRateProvider: Send + Sync {
    /// Current rate, `None` when unavailable.
    fn usd_rate(&self) -> Option<f64>;
}

/// Scored instruments plus the index derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSentiment {
    /// One entry per snapshot, in provider order.
    pub instruments: Vec<ScoredInstrument>,
    /// Aggregate index over `instruments`.
    #[serde(rename = "overallIndex")]
    pub index: MarketIndex,
}

impl MarketSentiment {
    /// Market with nothing to score.
    pub fn empty() -> Self {
        Self {
            instruments: Vec::new(),
            index: MarketIndex::NEUTRAL,
        }
    }
}

/// Score every snapshot in `result` and aggregate the index.
///
/// A fetch reported as failed counts as "no scorable data": the result is an empty
/// market with the neutral index, whatever `data` may contain.
pub fn score_batch(result: &FetchResult) -> MarketSentiment {
    if !result.success {
        warn!(
            "Market data unavailable: {}",
            result.error.as_deref().unwrap_or("unknown error")
        );
        return MarketSentiment::empty();
    }

    let instruments: Vec<ScoredInstrument> =
        result.data.iter().map(SentimentScorer::score).collect();
    let index = SentimentScorer::aggregate(&instruments);
    debug!(
        "Scored {} instruments, market index {}",
        instruments.len(),
        index
    );

    MarketSentiment { instruments, index }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn snapshot(symbol: &str, change_percent: f64) -> InstrumentSnapshot {
        InstrumentSnapshot::new(symbol, "", 10.0, 0.0, change_percent, 0, None, Utc::now())
            .expect("valid snapshot")
    }

    #[test]
    fn failed_fetch_scores_to_neutral_empty_market() {
        let market = score_batch(&FetchResult::failed("upstream timeout"));
        assert!(market.instruments.is_empty());
        assert_eq!(market.index, MarketIndex::NEUTRAL);
    }

    #[test]
    fn failed_fetch_ignores_stray_data() {
        let mut result = FetchResult::failed("partial response");
        result.data.push(snapshot("AL30", 9.0));
        assert_eq!(score_batch(&result), MarketSentiment::empty());
    }

    #[test]
    fn successful_fetch_keeps_provider_order() {
        let market = score_batch(&FetchResult::ok(vec![
            snapshot("GD30", 0.0),
            snapshot("AL30", -6.0),
        ]));
        let symbols: Vec<&str> = market
            .instruments
            .iter()
            .map(|i| i.snapshot.symbol.as_str())
            .collect();
        assert_eq!(symbols, vec!["GD30", "AL30"]);
        // no market caps: plain mean of 42 and 36
        assert_eq!(market.index.value(), 39);
    }

    #[test]
    fn empty_successful_fetch_is_neutral() {
        assert_eq!(score_batch(&FetchResult::ok(Vec::new())).index.value(), 50);
    }
}
