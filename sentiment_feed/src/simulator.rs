//! In-process market that quotes catalog instruments through several brokers.
//!
//! `SimulatedMarket` owns one RNG and the last generated price per symbol behind a single
//! `Mutex`, so every caller observes the same sequence of prices, as the generator thread
//! did for its subscribers. Broker quotes are built around the last fetched price of a
//! symbol, or its catalog base when it was never fetched.

use chrono::Utc;
use log::{debug, error, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use sentiment_common::provider::{
    BrokerQuoteProvider, FetchResult, MarketDataProvider, UsdRateProvider,
};
use sentiment_common::{BrokerQuote, InstrumentSnapshot, Result, SentimentError};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::catalog::{self, CatalogEntry};
use crate::quote::{self, PriceProfile};

/// Message of a fetch where no requested symbol is in the catalog.
pub const NO_MARKET_DATA: &str = "no market data for requested symbols";

/// Knobs of the simulated market.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// RNG seed. `None` seeds from the thread RNG.
    pub seed: Option<u64>,
    /// Reference USD/ARS rate.
    pub usd_rate_base: f64,
    /// Full width of the USD/ARS rate jitter.
    pub usd_rate_jitter: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: None,
            usd_rate_base: 350.0,
            usd_rate_jitter: 20.0,
        }
    }
}

impl SimulationConfig {
    /// Default configuration with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

struct MarketState {
    rng: StdRng,
    current_prices: HashMap<&'static str, f64>,
}

/// Simulated multi-broker market over the static catalog.
pub struct SimulatedMarket {
    config: SimulationConfig,
    state: Mutex<MarketState>,
}

impl SimulatedMarket {
    /// Build a market from `config`.
    pub fn new(config: SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self {
            config,
            state: Mutex::new(MarketState {
                rng,
                current_prices: HashMap::new(),
            }),
        }
    }

    /// Configuration the market was built with.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    fn lock(&self) -> Result<MutexGuard<'_, MarketState>> {
        Ok(self.state.lock()?)
    }

    /// Fetch snapshots for `symbols`, skipping the ones missing from the catalog.
    ///
    /// Returns a failed `FetchResult` when none of them is known, and an error only when
    /// the market state lock is poisoned.
    pub fn try_fetch(&self, symbols: &[String]) -> Result<FetchResult> {
        let mut state = self.lock()?;
        let observed_at = Utc::now();
        let mut data = Vec::with_capacity(symbols.len());

        for symbol in symbols {
            let entry = match catalog::lookup(symbol) {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping symbol: {e}");
                    continue;
                }
            };
            let snapshot = state.snapshot(entry, observed_at)?;
            data.push(snapshot);
        }

        if data.is_empty() {
            return Ok(FetchResult::failed(NO_MARKET_DATA));
        }
        debug!("Simulated {} of {} requested symbols", data.len(), symbols.len());
        Ok(FetchResult::ok(data))
    }

    /// Quotes from every broker of the symbol's category, in table order.
    ///
    /// An unknown symbol yields `SymbolNotFound`.
    pub fn try_broker_quotes(&self, symbol: &str) -> Result<Vec<BrokerQuote>> {
        let entry = catalog::lookup(symbol)?;
        let mut state = self.lock()?;
        let current_price = state
            .current_prices
            .get(entry.symbol)
            .copied()
            .unwrap_or(entry.base_price);

        let profile = PriceProfile::for_category(entry.category);
        let observed_at = Utc::now();
        let quotes = catalog::brokers(entry.category)
            .iter()
            .map(|broker| {
                quote::broker_quote(&mut state.rng, &profile, broker, current_price, observed_at)
            })
            .collect();
        Ok(quotes)
    }

    /// USD/ARS rate drawn from `usd_rate_base ± usd_rate_jitter / 2`.
    pub fn try_usd_rate(&self) -> Result<f64> {
        let mut state = self.lock()?;
        let rate = self.config.usd_rate_base
            + quote::variation(&mut state.rng, self.config.usd_rate_jitter / 2.0);
        Ok(quote::round_to(rate, 2))
    }
}

impl MarketState {
    fn snapshot(
        &mut self,
        entry: &'static CatalogEntry,
        observed_at: chrono::DateTime<Utc>,
    ) -> Result<InstrumentSnapshot> {
        let profile = PriceProfile::for_category(entry.category);
        let (price, change) = quote::next_price(&mut self.rng, entry.base_price, profile.variation);
        let change_percent = if entry.base_price > 0.0 {
            change / entry.base_price * 100.0
        } else {
            0.0
        };
        let volume = quote::synthetic_volume(&mut self.rng, entry.base_volume);
        self.current_prices.insert(entry.symbol, price);

        InstrumentSnapshot::new(
            entry.symbol,
            entry.name,
            quote::round_to(price, 2),
            quote::round_to(change, 2),
            quote::round_to(change_percent, 2),
            volume,
            entry.market_cap,
            observed_at,
        )
    }
}

impl Default for SimulatedMarket {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

impl MarketDataProvider for SimulatedMarket {
    fn fetch(&self, symbols: &[String]) -> FetchResult {
        self.try_fetch(symbols).unwrap_or_else(|e| {
            error!("Simulated fetch failed: {e}");
            FetchResult::failed(e.to_string())
        })
    }
}

impl BrokerQuoteProvider for SimulatedMarket {
    fn broker_quotes(&self, symbol: &str) -> Vec<BrokerQuote> {
        match self.try_broker_quotes(symbol) {
            Ok(quotes) => quotes,
            Err(SentimentError::SymbolNotFound(_)) => Vec::new(),
            Err(e) => {
                error!("Simulated broker quotes failed: {e}");
                Vec::new()
            }
        }
    }
}

impl UsdRateProvider for SimulatedMarket {
    fn usd_rate(&self) -> Option<f64> {
        self.try_usd_rate()
            .inspect_err(|e| error!("Simulated USD rate failed: {e}"))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentiment_common::symbols::Category;

    fn symbols(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn same_seed_gives_same_prices() {
        let first = SimulatedMarket::new(SimulationConfig::seeded(11));
        let second = SimulatedMarket::new(SimulationConfig::seeded(11));
        let request = catalog::symbols(Category::Bonds);

        let prices = |market: &SimulatedMarket| -> Vec<f64> {
            market
                .fetch(&request)
                .data
                .iter()
                .map(|s| s.price)
                .collect()
        };
        assert_eq!(prices(&first), prices(&second));
    }

    #[test]
    fn unknown_symbols_are_skipped() {
        let market = SimulatedMarket::new(SimulationConfig::seeded(1));
        let result = market.fetch(&symbols(&["AL30", "NOPE", "gd30"]));
        assert!(result.success);
        let fetched: Vec<&str> = result.data.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(fetched, vec!["AL30", "GD30"]);
    }

    #[test]
    fn all_unknown_symbols_fail_the_fetch() {
        let market = SimulatedMarket::new(SimulationConfig::seeded(1));
        let result = market.fetch(&symbols(&["NOPE", "NADA"]));
        assert!(!result.success);
        assert!(result.data.is_empty());
        assert_eq!(result.error.as_deref(), Some(NO_MARKET_DATA));
        assert!(!market.fetch(&[]).success);
    }

    #[test]
    fn cedear_moves_stay_within_hundred_pesos() {
        let market = SimulatedMarket::new(SimulationConfig::seeded(3));
        for _ in 0..50 {
            let result = market.fetch(&symbols(&["AAPL.BA"]));
            let snapshot = &result.data[0];
            assert!((snapshot.price - 19_250.0).abs() <= 100.0);
            assert!(snapshot.change_percent.abs() <= 100.0 / 19_250.0 * 100.0 + 0.01);
            assert!(snapshot.market_cap.is_none());
        }
    }

    #[test]
    fn stocks_carry_market_cap_and_volume() {
        let market = SimulatedMarket::new(SimulationConfig::seeded(4));
        let result = market.fetch(&symbols(&["NVDA"]));
        let snapshot = &result.data[0];
        assert_eq!(snapshot.market_cap, Some(3.0e12));
        assert!((125_000_000..=375_000_000).contains(&snapshot.volume));
        assert!(snapshot.change_percent.abs() <= 1.0);
    }

    #[test]
    fn broker_quotes_follow_the_fetched_price() {
        let market = SimulatedMarket::new(SimulationConfig::seeded(5));
        let fetched = market.fetch(&symbols(&["TX26"])).data[0].price;
        let quotes = market.broker_quotes("TX26");

        assert_eq!(quotes.len(), catalog::BOND_BROKERS.len());
        for quote in &quotes {
            assert!((quote.price - fetched).abs() <= 0.26);
        }
        assert_eq!(quotes[0].broker_name, "Balanz");
        assert_eq!(quotes[0].commission, 0.25);
    }

    #[test]
    fn unknown_symbol_has_no_broker_quotes() {
        let market = SimulatedMarket::default();
        assert!(market.broker_quotes("NOPE").is_empty());
        assert!(matches!(
            market.try_broker_quotes("NOPE"),
            Err(SentimentError::SymbolNotFound(_))
        ));
    }

    #[test]
    fn usd_rate_stays_within_jitter() {
        let market = SimulatedMarket::new(SimulationConfig::seeded(6));
        for _ in 0..200 {
            let rate = market.try_usd_rate().expect("lock is healthy");
            assert!((340.0..=360.0).contains(&rate));
            assert!(market.usd_rate().is_some());
        }
    }

    #[test]
    fn poisoned_state_is_reported_as_lock_error() {
        let market = std::sync::Arc::new(SimulatedMarket::new(SimulationConfig::seeded(7)));
        let poisoner = std::sync::Arc::clone(&market);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.state.lock();
            panic!("poison the market state");
        })
        .join();

        assert!(matches!(market.try_usd_rate(), Err(SentimentError::MutexLock(_))));
        assert!(market.usd_rate().is_none());
        let result = market.fetch(&symbols(&["AL30"]));
        assert!(!result.success);
        assert!(market.broker_quotes("AL30").is_empty());
    }
}
