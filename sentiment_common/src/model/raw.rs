//! Lenient decoding of upstream instrument rows.
//!
//! Upstream sources disagree on field names (`price`, `Price`, `lastPrice`, ...) and
//! sometimes send numbers as strings. `RawInstrument` accepts all of those spellings and
//! `into_snapshot` coerces anything missing or unparseable to a safe default instead of
//! failing, so one bad row never prevents the rest of a batch from being scored.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::model::InstrumentSnapshot;

/// A number that may arrive as JSON number or as numeric text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    /// Plain JSON number.
    Number(f64),
    /// Numeric text such as `"1234.5"`.
    Text(String),
}

impl LooseNumber {
    /// Numeric value, or `None` when the text does not parse or the value is not finite.
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            LooseNumber::Number(n) => *n,
            LooseNumber::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// Upstream instrument row with every field optional.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawInstrument {
    #[serde(default, alias = "Symbol")]
    pub symbol: Option<String>,
    #[serde(default, alias = "Name", alias = "description")]
    pub name: Option<String>,
    #[serde(default, alias = "Price", alias = "lastPrice")]
    pub price: Option<LooseNumber>,
    #[serde(default, alias = "Change", alias = "priceChange")]
    pub change: Option<LooseNumber>,
    #[serde(
        default,
        rename = "changePercent",
        alias = "ChangePercent",
        alias = "priceChangePercent"
    )]
    pub change_percent: Option<LooseNumber>,
    #[serde(default, alias = "Volume", alias = "tradedVolume")]
    pub volume: Option<LooseNumber>,
    #[serde(default, rename = "marketCap")]
    pub market_cap: Option<LooseNumber>,
    #[serde(default, rename = "lastUpdate", alias = "LastUpdate")]
    pub last_update: Option<String>,
}

impl RawInstrument {
    /// Coerce the row into a snapshot. Never fails.
    ///
    /// Missing numbers become 0, a negative price becomes 0, volume is truncated to a
    /// non-negative integer, an unusable market cap becomes absent and an unusable
    /// timestamp becomes `now`.
    pub fn into_snapshot(self, now: DateTime<Utc>) -> InstrumentSnapshot {
        let number = |n: &Option<LooseNumber>| n.as_ref().and_then(LooseNumber::value);

        let volume = number(&self.volume).map_or(0, |v| v.max(0.0).trunc() as u64);
        let market_cap = number(&self.market_cap).filter(|cap| *cap >= 0.0);
        let observed_at = self
            .last_update
            .as_deref()
            .and_then(|ts| DateTime::parse_from_rfc3339(ts.trim()).ok())
            .map_or(now, |ts| ts.with_timezone(&Utc));

        InstrumentSnapshot {
            symbol: self
                .symbol
                .map(|s| s.trim().to_ascii_uppercase())
                .unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            price: number(&self.price).unwrap_or(0.0).max(0.0),
            change_absolute: number(&self.change).unwrap_or(0.0),
            change_percent: number(&self.change_percent).unwrap_or(0.0),
            volume,
            market_cap,
            observed_at,
        }
    }
}
