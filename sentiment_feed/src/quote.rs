//! Synthetic price, volume and broker quote generation.
//!
//! Each fetch moves an instrument's price around its catalog base by a uniform variation,
//! then every broker quotes the moved price plus its own jitter. Amplitudes and rounding
//! depend on the category: CEDEARs trade in whole pesos, bonds and stocks in cents.

use chrono::{DateTime, Utc};
use rand::Rng;
use sentiment_common::BrokerQuote;
use sentiment_common::symbols::Category;

use crate::catalog::BrokerProfile;

/// Size of a random move, absolute or relative to the price it applies to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amplitude {
    /// Fixed amount in price units.
    Absolute(f64),
    /// Fraction of the reference price.
    Relative(f64),
}

impl Amplitude {
    /// Amplitude in price units for a reference `price`.
    pub fn of(self, price: f64) -> f64 {
        match self {
            Amplitude::Absolute(amount) => amount,
            Amplitude::Relative(fraction) => price * fraction,
        }
    }
}

/// How prices of one category move and round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceProfile {
    /// Largest price move away from base per fetch.
    pub variation: Amplitude,
    /// Full width of the broker price jitter around the current price.
    pub broker_jitter: Amplitude,
    /// Decimals kept in broker prices.
    pub price_decimals: i32,
    /// Decimals kept in broker spreads.
    pub spread_decimals: i32,
}

impl PriceProfile {
    /// Profile used for `category`.
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Stocks => PriceProfile {
                variation: Amplitude::Relative(0.01),
                broker_jitter: Amplitude::Relative(0.002),
                price_decimals: 2,
                spread_decimals: 3,
            },
            Category::Cedears => PriceProfile {
                variation: Amplitude::Absolute(100.0),
                broker_jitter: Amplitude::Absolute(100.0),
                price_decimals: 0,
                spread_decimals: 0,
            },
            Category::Bonds => PriceProfile {
                variation: Amplitude::Absolute(1.0),
                broker_jitter: Amplitude::Absolute(0.5),
                price_decimals: 2,
                spread_decimals: 3,
            },
        }
    }
}

/// Lowest price the simulation produces.
pub const MIN_PRICE: f64 = 0.01;

/// Round `value` to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Uniform move in `[-amplitude, amplitude)`.
pub fn variation(rng: &mut impl Rng, amplitude: f64) -> f64 {
    let u: f64 = rng.random();
    (u - 0.5) * 2.0 * amplitude
}

/// Price after one random move away from `base`, and the move itself.
///
/// The price never drops below [`MIN_PRICE`]; the returned move is the one actually applied.
pub fn next_price(rng: &mut impl Rng, base: f64, amplitude: Amplitude) -> (f64, f64) {
    let moved = (base + variation(rng, amplitude.of(base))).max(MIN_PRICE);
    (moved, moved - base)
}

/// Daily volume drawn from `[base / 2, base * 3 / 2]`.
pub fn synthetic_volume(rng: &mut impl Rng, base: u64) -> u64 {
    if base == 0 {
        return 0;
    }
    base / 2 + rng.random_range(0..=base)
}

/// One broker's quote around `current_price`.
pub fn broker_quote(
    rng: &mut impl Rng,
    profile: &PriceProfile,
    broker: &BrokerProfile,
    current_price: f64,
    observed_at: DateTime<Utc>,
) -> BrokerQuote {
    let jitter = variation(rng, profile.broker_jitter.of(current_price) / 2.0);
    let price = round_to((current_price + jitter).max(MIN_PRICE), profile.price_decimals);

    let (low, high) = broker.spread;
    let spread = if high > low {
        rng.random_range(low..=high)
    } else {
        low
    };

    BrokerQuote::new(
        broker.name,
        price,
        broker.commission,
        round_to(spread, profile.spread_decimals),
        observed_at,
    )
}
