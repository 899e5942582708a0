//! Fear & Greed scoring for single instruments and for a whole market.
//!
//! `SentimentScorer::score` turns one [`InstrumentSnapshot`] into a 0–100 score from four
//! sub-factors:
//!
//! - price momentum: piecewise-linear in `change_percent`;
//! - volume: step function of traded volume;
//! - volatility: step function of `|change_percent|`;
//! - market cap: step function of capitalization (missing counts as 0).
//!
//! Each factor is an ordered table of bands evaluated top to bottom, first match wins.
//! The weighted sum is rounded and clamped to `[0, 100]`. `SentimentScorer::aggregate`
//! folds scored instruments into one [`MarketIndex`].
//!
//! Everything here is a pure function of its arguments.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::model::InstrumentSnapshot;
use crate::sentiment::Sentiment;

/// Index value reported when there is nothing to aggregate.
pub const NEUTRAL_INDEX: u8 = 50;

/// Weight of the price-momentum factor.
pub const MOMENTUM_WEIGHT: f64 = 0.40;
/// Weight of the volume factor.
pub const VOLUME_WEIGHT: f64 = 0.20;
/// Weight of the volatility factor.
pub const VOLATILITY_WEIGHT: f64 = 0.25;
/// Weight of the market-cap factor.
pub const MARKET_CAP_WEIGHT: f64 = 0.15;

/// One linear band: applies when `applies(x)` holds, evaluates to `score(x)`.
struct LinearBand {
    applies: fn(f64) -> bool,
    score: fn(f64) -> f64,
}

const MOMENTUM_BANDS: [LinearBand; 5] = [
    LinearBand {
        applies: |pct| pct >= 5.0,
        score: |pct| (80.0 + (pct - 5.0) * 2.0).min(100.0),
    },
    LinearBand {
        applies: |pct| pct >= 1.0,
        score: |pct| 60.0 + (pct - 1.0) * 5.0,
    },
    LinearBand {
        applies: |pct| pct >= -1.0,
        score: |pct| 50.0 + pct * 10.0,
    },
    LinearBand {
        applies: |pct| pct >= -5.0,
        score: |pct| 30.0 + (pct + 5.0) * 7.5,
    },
    LinearBand {
        applies: |_| true,
        score: |pct| (20.0 + (pct + 5.0) * 4.0).max(0.0),
    },
];

/// `(lower bound, factor)` steps, highest bound first.
const VOLUME_STEPS: [(u64, f64); 5] = [
    (2_000_000, 80.0),
    (1_000_000, 70.0),
    (500_000, 60.0),
    (100_000, 50.0),
    (50_000, 40.0),
];
const VOLUME_FLOOR: f64 = 30.0;

const VOLATILITY_STEPS: [(f64, f64); 5] = [
    (10.0, 90.0),
    (7.0, 80.0),
    (5.0, 70.0),
    (3.0, 60.0),
    (1.0, 50.0),
];
const VOLATILITY_FLOOR: f64 = 40.0;

const MARKET_CAP_STEPS: [(f64, f64); 4] = [
    (10_000_000_000.0, 60.0),
    (1_000_000_000.0, 55.0),
    (100_000_000.0, 50.0),
    (10_000_000.0, 45.0),
];
const MARKET_CAP_FLOOR: f64 = 40.0;

fn step<T: PartialOrd + Copy>(value: T, steps: &[(T, f64)], floor: f64) -> f64 {
    steps
        .iter()
        .find(|(bound, _)| value >= *bound)
        .map_or(floor, |(_, factor)| *factor)
}

/// Price-momentum factor for a percentage change.
pub fn momentum_factor(change_percent: f64) -> f64 {
    let pct = finite_or_zero(change_percent);
    MOMENTUM_BANDS
        .iter()
        .find(|band| (band.applies)(pct))
        .map_or(0.0, |band| (band.score)(pct))
}

/// Volume factor for a traded volume.
pub fn volume_factor(volume: u64) -> f64 {
    step(volume, &VOLUME_STEPS, VOLUME_FLOOR)
}

/// Volatility factor for a percentage change, independent of its sign.
pub fn volatility_factor(change_percent: f64) -> f64 {
    step(
        finite_or_zero(change_percent).abs(),
        &VOLATILITY_STEPS,
        VOLATILITY_FLOOR,
    )
}

/// Market-cap factor. A missing capitalization scores like zero.
pub fn market_cap_factor(market_cap: Option<f64>) -> f64 {
    step(
        market_cap.map_or(0.0, finite_or_zero),
        &MARKET_CAP_STEPS,
        MARKET_CAP_FLOOR,
    )
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// The four sub-factors behind one score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorBreakdown {
    /// Price-momentum factor.
    pub price_momentum: f64,
    /// Volume factor.
    pub volume: f64,
    /// Volatility factor.
    pub volatility: f64,
    /// Market-cap factor.
    pub market_cap: f64,
}

impl FactorBreakdown {
    /// Weighted sum before rounding and clamping.
    pub fn weighted(&self) -> f64 {
        self.price_momentum * MOMENTUM_WEIGHT
            + self.volume * VOLUME_WEIGHT
            + self.volatility * VOLATILITY_WEIGHT
            + self.market_cap * MARKET_CAP_WEIGHT
    }

    /// Final score: weighted sum rounded to the nearest integer, clamped to `[0, 100]`.
    pub fn score(&self) -> u8 {
        clamp_score(self.weighted())
    }
}

/// Snapshot with its sentiment score attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredInstrument {
    /// The scored snapshot.
    #[serde(flatten)]
    pub snapshot: InstrumentSnapshot,
    /// Score in `[0, 100]`.
    #[serde(rename = "fearGreedScore")]
    pub sentiment_score: u8,
}

impl ScoredInstrument {
    /// Band of this instrument's score.
    pub fn sentiment(&self) -> Sentiment {
        Sentiment::from_score(self.sentiment_score)
    }
}

/// Market-wide sentiment in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketIndex(u8);

impl MarketIndex {
    /// The neutral index returned for empty input.
    pub const NEUTRAL: MarketIndex = MarketIndex(NEUTRAL_INDEX);

    /// Index value.
    pub fn value(self) -> u8 {
        self.0
    }

    /// Band of the index.
    pub fn sentiment(self) -> Sentiment {
        Sentiment::from_score(self.0)
    }
}

impl Display for MarketIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stateless scorer.
pub struct SentimentScorer;

impl SentimentScorer {
    /// Sub-factors for `snapshot`.
    pub fn factors(snapshot: &InstrumentSnapshot) -> FactorBreakdown {
        FactorBreakdown {
            price_momentum: momentum_factor(snapshot.change_percent),
            volume: volume_factor(snapshot.volume),
            volatility: volatility_factor(snapshot.change_percent),
            market_cap: market_cap_factor(snapshot.market_cap),
        }
    }

    /// Attach a sentiment score to `snapshot`.
    pub fn score(snapshot: &InstrumentSnapshot) -> ScoredInstrument {
        ScoredInstrument {
            snapshot: snapshot.clone(),
            sentiment_score: Self::factors(snapshot).score(),
        }
    }

    /// Combine scored instruments into one index.
    ///
    /// Each score is weighted by `market_cap * max(volume, 1)`, saturating at `f64::MAX`,
    /// so the index is a convex combination of the scores. When every weight is zero
    /// (for instance no instrument reports a market cap) this falls back to the plain
    /// mean of the scores. Empty input yields [`MarketIndex::NEUTRAL`].
    pub fn aggregate(instruments: &[ScoredInstrument]) -> MarketIndex {
        if instruments.is_empty() {
            return MarketIndex::NEUTRAL;
        }

        let weights: Vec<f64> = instruments
            .iter()
            .map(|instrument| instrument_weight(&instrument.snapshot))
            .collect();
        let max_weight = weights.iter().copied().fold(0.0_f64, f64::max);

        let mean = if max_weight > 0.0 {
            // Weights relative to the largest one keep both sums finite.
            let (weighted_sum, total_weight) = instruments.iter().zip(&weights).fold(
                (0.0_f64, 0.0_f64),
                |(sum, total), (instrument, weight)| {
                    let weight = weight / max_weight;
                    (
                        sum + f64::from(instrument.sentiment_score) * weight,
                        total + weight,
                    )
                },
            );
            weighted_sum / total_weight
        } else {
            let sum: f64 = instruments
                .iter()
                .map(|instrument| f64::from(instrument.sentiment_score))
                .sum();
            sum / instruments.len() as f64
        };

        MarketIndex(clamp_score(mean))
    }
}

fn instrument_weight(snapshot: &InstrumentSnapshot) -> f64 {
    let market_cap = snapshot.market_cap.map_or(0.0, finite_or_zero).max(0.0);
    (market_cap * snapshot.volume.max(1) as f64).min(f64::MAX)
}

fn clamp_score(value: f64) -> u8 {
    if value.is_nan() {
        return NEUTRAL_INDEX;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Free-function form of [`SentimentScorer::score`].
pub fn score_instrument(snapshot: &InstrumentSnapshot) -> ScoredInstrument {
    SentimentScorer::score(snapshot)
}

/// Free-function form of [`SentimentScorer::aggregate`].
pub fn aggregate_index(instruments: &[ScoredInstrument]) -> MarketIndex {
    SentimentScorer::aggregate(instruments)
}
