//! Broker ranking by effective total cost.
//!
//! `CostRanker::rank` computes `price + commission + spread` for each quote and orders the
//! quotes cheapest first. The sort is stable, so brokers with the same total cost keep
//! their input order and the output is reproducible across calls. Ranks run `1..=N`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::model::BrokerQuote;

/// Broker quote with its total cost and position in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedQuote {
    /// The ranked quote.
    #[serde(flatten)]
    pub quote: BrokerQuote,
    /// `price + commission + spread`.
    pub total_cost: f64,
    /// 1 for the cheapest broker.
    pub rank: usize,
}

/// Quotes ordered cheapest first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrokerRanking {
    quotes: Vec<RankedQuote>,
}

impl BrokerRanking {
    /// Ranked quotes, cheapest first.
    pub fn quotes(&self) -> &[RankedQuote] {
        &self.quotes
    }

    /// Number of ranked quotes.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Whether there is nothing ranked.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Cheapest entry.
    pub fn best(&self) -> Option<&RankedQuote> {
        self.quotes.first()
    }

    /// Total cost of the cheapest entry, 0 when empty.
    pub fn best_cost(&self) -> f64 {
        self.quotes.first().map_or(0.0, |q| q.total_cost)
    }

    /// Total cost of the most expensive entry, 0 when empty.
    pub fn worst_cost(&self) -> f64 {
        self.quotes.last().map_or(0.0, |q| q.total_cost)
    }

    /// What the trader saves by picking the cheapest broker over the most expensive one.
    pub fn max_savings(&self) -> f64 {
        self.worst_cost() - self.best_cost()
    }

    /// Extra cost of `quote` compared with the cheapest broker.
    pub fn savings_vs_best(&self, quote: &RankedQuote) -> f64 {
        quote.total_cost - self.best_cost()
    }

    /// Strip ranking data, returning the quotes in ranked order.
    pub fn into_quotes(self) -> Vec<BrokerQuote> {
        self.quotes.into_iter().map(|ranked| ranked.quote).collect()
    }
}

impl IntoIterator for BrokerRanking {
    type Item = RankedQuote;
    type IntoIter = std::vec::IntoIter<RankedQuote>;

    fn into_iter(self) -> Self::IntoIter {
        self.quotes.into_iter()
    }
}

impl<'a> IntoIterator for &'a BrokerRanking {
    type Item = &'a RankedQuote;
    type IntoIter = std::slice::Iter<'a, RankedQuote>;

    fn into_iter(self) -> Self::IntoIter {
        self.quotes.iter()
    }
}

/// Stateless ranker.
pub struct CostRanker;

impl CostRanker {
    /// Rank `quotes` by total cost, cheapest first.
    ///
    /// Duplicate broker names are ranked independently. Negative values are not rejected.
    pub fn rank(quotes: &[BrokerQuote]) -> BrokerRanking {
        let mut costed: Vec<(BrokerQuote, f64)> = quotes
            .iter()
            .map(|quote| (quote.clone(), quote.total_cost()))
            .collect();

        // `sort_by` is stable: equal costs keep input order.
        costed.sort_by(|(_, left), (_, right)| compare_cost(*left, *right));

        let quotes = costed
            .into_iter()
            .enumerate()
            .map(|(index, (quote, total_cost))| RankedQuote {
                quote,
                total_cost,
                rank: index + 1,
            })
            .collect();

        BrokerRanking { quotes }
    }
}

/// Numeric order with NaN after every number; NaNs compare equal to each other.
fn compare_cost(left: f64, right: f64) -> Ordering {
    left.partial_cmp(&right)
        .unwrap_or_else(|| left.is_nan().cmp(&right.is_nan()))
}

/// Free-function form of [`CostRanker::rank`].
pub fn rank_brokers(quotes: &[BrokerQuote]) -> BrokerRanking {
    CostRanker::rank(quotes)
}
