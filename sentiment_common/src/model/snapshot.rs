//! Per-instrument market snapshot.
//!
//! An `InstrumentSnapshot` is produced once per symbol and fetch cycle and is never
//! mutated afterwards. The validated constructor enforces the domain constraints; the
//! lenient path for upstream rows lives in [`crate::model::raw`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SentimentError;
use crate::symbols::normalize_symbol;

/// Raw market snapshot for one instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentSnapshot {
    /// Upper-cased instrument symbol.
    pub symbol: String,
    /// Human-readable instrument name.
    pub name: String,
    /// Last price.
    pub price: f64,
    /// Absolute price change over the session.
    #[serde(rename = "change")]
    pub change_absolute: f64,
    /// Relative price change, in percent.
    pub change_percent: f64,
    /// Traded volume.
    pub volume: u64,
    /// Market capitalization, when the source knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    /// When the source observed these values.
    #[serde(rename = "lastUpdate")]
    pub observed_at: DateTime<Utc>,
}

impl InstrumentSnapshot {
    /// Build a validated snapshot.
    ///
    /// The symbol is trimmed and upper-cased. Price must be finite and non-negative, the
    /// change values finite, and the market cap (when present) finite and non-negative.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: &str,
        name: impl Into<String>,
        price: f64,
        change_absolute: f64,
        change_percent: f64,
        volume: u64,
        market_cap: Option<f64>,
        observed_at: DateTime<Utc>,
    ) -> Result<Self, SentimentError> {
        let symbol = normalize_symbol(symbol)
            .map_err(|e| SentimentError::invalid("symbol", e.to_string()))?;
        validate_non_negative("price", price)?;
        validate_finite("change", change_absolute)?;
        validate_finite("changePercent", change_percent)?;
        if let Some(cap) = market_cap {
            validate_non_negative("marketCap", cap)?;
        }

        Ok(Self {
            symbol,
            name: name.into(),
            price,
            change_absolute,
            change_percent,
            volume,
            market_cap,
            observed_at,
        })
    }
}

pub(crate) fn validate_finite(field: &'static str, value: f64) -> Result<(), SentimentError> {
    if !value.is_finite() {
        return Err(SentimentError::invalid(field, "must be a finite number"));
    }
    Ok(())
}

pub(crate) fn validate_non_negative(
    field: &'static str,
    value: f64,
) -> Result<(), SentimentError> {
    validate_finite(field, value)?;
    if value < 0.0 {
        return Err(SentimentError::invalid(field, "must be non-negative"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at() -> DateTime<Utc> {
        "2025-03-14T15:00:00Z".parse().expect("timestamp")
    }

    #[test]
    fn normalizes_symbol() {
        let snapshot =
            InstrumentSnapshot::new(" ggal ", "Grupo Galicia", 10.0, 0.1, 1.0, 5, None, at())
                .expect("valid snapshot");
        assert_eq!(snapshot.symbol, "GGAL");
    }

    #[test]
    fn rejects_negative_price() {
        let err = InstrumentSnapshot::new("GGAL", "", -1.0, 0.0, 0.0, 0, None, at())
            .expect_err("must fail");
        assert!(matches!(
            err,
            SentimentError::InvalidField { field: "price", .. }
        ));
    }

    #[test]
    fn rejects_empty_symbol_and_bad_market_cap() {
        assert!(InstrumentSnapshot::new("  ", "", 1.0, 0.0, 0.0, 0, None, at()).is_err());
        assert!(
            InstrumentSnapshot::new("YPFD", "", 1.0, 0.0, 0.0, 0, Some(f64::NAN), at()).is_err()
        );
    }

    #[test]
    fn serializes_with_camel_case_names() {
        let snapshot = InstrumentSnapshot::new(
            "PAMP",
            "Pampa Energia",
            2500.0,
            25.0,
            1.0,
            120_000,
            Some(3.2e9),
            at(),
        )
        .expect("valid snapshot");
        let json = serde_json::to_value(&snapshot).expect("serializable");
        assert_eq!(json["changePercent"], 1.0);
        assert_eq!(json["change"], 25.0);
        assert_eq!(json["marketCap"], 3.2e9);
        assert_eq!(json["lastUpdate"], "2025-03-14T15:00:00Z");
    }
}
