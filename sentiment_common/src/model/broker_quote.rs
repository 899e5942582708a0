//! One broker's quote for one instrument.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Price, commission and spread offered by a single broker.
///
/// Quotes are recomputed per request and never persisted. Values are not validated:
/// a negative commission or spread is accepted and behaves as a discount when ranked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerQuote {
    /// Broker display name. Not required to be unique within a quote set.
    #[serde(rename = "name")]
    pub broker_name: String,
    /// Quoted price.
    pub price: f64,
    /// Commission charged by the broker.
    pub commission: f64,
    /// Quoted spread.
    pub spread: f64,
    /// When the broker quote was observed.
    #[serde(rename = "lastUpdated")]
    pub observed_at: DateTime<Utc>,
}

impl BrokerQuote {
    /// Create a quote.
    pub fn new(
        broker_name: impl Into<String>,
        price: f64,
        commission: f64,
        spread: f64,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            broker_name: broker_name.into(),
            price,
            commission,
            spread,
            observed_at,
        }
    }

    /// Effective cost to the trader: price plus commission plus spread.
    pub fn total_cost(&self) -> f64 {
        self.price + self.commission + self.spread
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_cost_is_additive() {
        let quote = BrokerQuote::new("Balanz", 32.5, 0.25, 0.07, Utc::now());
        assert!((quote.total_cost() - 32.82).abs() < 1e-9);
    }

    #[test]
    fn negative_spread_acts_as_discount() {
        let quote = BrokerQuote::new("Cocos Capital", 100.0, 1.0, -2.0, Utc::now());
        assert_eq!(quote.total_cost(), 99.0);
    }
}
