//! Sentiment bands and their presentation lookups.
//!
//! A score maps to exactly one [`Sentiment`]. Bands are half-open on their lower bound
//! and checked from the highest threshold down; the first match wins.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Named sentiment band for a 0–100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Sentiment {
    /// Below 25.
    #[strum(serialize = "Extreme Fear")]
    #[serde(rename = "Extreme Fear")]
    ExtremeFear,
    /// 25 to 44.
    Fear,
    /// 45 to 54.
    Neutral,
    /// 55 to 74.
    Greed,
    /// 75 and above.
    #[strum(serialize = "Extreme Greed")]
    #[serde(rename = "Extreme Greed")]
    ExtremeGreed,
}

/// Lower bound of each band, highest first. Scores below the last bound are `ExtremeFear`.
const BANDS: [(u8, Sentiment); 4] = [
    (75, Sentiment::ExtremeGreed),
    (55, Sentiment::Greed),
    (45, Sentiment::Neutral),
    (25, Sentiment::Fear),
];

impl Sentiment {
    /// Band for `score`.
    pub fn from_score(score: u8) -> Self {
        BANDS
            .iter()
            .find(|(threshold, _)| score >= *threshold)
            .map_or(Sentiment::ExtremeFear, |(_, sentiment)| *sentiment)
    }

    /// Display label, e.g. `"Extreme Greed"`.
    pub fn label(self) -> &'static str {
        match self {
            Sentiment::ExtremeGreed => "Extreme Greed",
            Sentiment::Greed => "Greed",
            Sentiment::Neutral => "Neutral",
            Sentiment::Fear => "Fear",
            Sentiment::ExtremeFear => "Extreme Fear",
        }
    }

    /// Tailwind text colour class used by the dashboard.
    pub fn text_class(self) -> &'static str {
        match self {
            Sentiment::ExtremeGreed => "text-red-600",
            Sentiment::Greed => "text-orange-500",
            Sentiment::Neutral => "text-yellow-500",
            Sentiment::Fear => "text-blue-500",
            Sentiment::ExtremeFear => "text-red-700",
        }
    }

    /// Tailwind background colour class used by the dashboard.
    pub fn bg_class(self) -> &'static str {
        match self {
            Sentiment::ExtremeGreed => "bg-red-500",
            Sentiment::Greed => "bg-orange-500",
            Sentiment::Neutral => "bg-yellow-500",
            Sentiment::Fear => "bg-blue-500",
            Sentiment::ExtremeFear => "bg-red-600",
        }
    }

    /// Hex stroke colour for the gauge.
    pub fn gauge_color(self) -> &'static str {
        match self {
            Sentiment::ExtremeGreed => "#dc2626",
            Sentiment::Greed => "#ea580c",
            Sentiment::Neutral => "#ca8a04",
            Sentiment::Fear => "#2563eb",
            Sentiment::ExtremeFear => "#991b1b",
        }
    }
}

/// Label for `score`. Shorthand for `Sentiment::from_score(score).label()`.
pub fn sentiment_label(score: u8) -> &'static str {
    Sentiment::from_score(score).label()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges() {
        assert_eq!(sentiment_label(100), "Extreme Greed");
        assert_eq!(sentiment_label(75), "Extreme Greed");
        assert_eq!(sentiment_label(74), "Greed");
        assert_eq!(sentiment_label(55), "Greed");
        assert_eq!(sentiment_label(54), "Neutral");
        assert_eq!(sentiment_label(45), "Neutral");
        assert_eq!(sentiment_label(44), "Fear");
        assert_eq!(sentiment_label(25), "Fear");
        assert_eq!(sentiment_label(24), "Extreme Fear");
        assert_eq!(sentiment_label(0), "Extreme Fear");
    }

    #[test]
    fn display_matches_label() {
        for score in [0_u8, 30, 50, 60, 90] {
            let sentiment = Sentiment::from_score(score);
            assert_eq!(sentiment.to_string(), sentiment.label());
        }
    }

    #[test]
    fn colour_lookups_follow_bands() {
        assert_eq!(Sentiment::from_score(80).gauge_color(), "#dc2626");
        assert_eq!(Sentiment::from_score(10).text_class(), "text-red-700");
        assert_eq!(Sentiment::from_score(50).bg_class(), "bg-yellow-500");
    }
}
