//! Static instrument and broker tables for the simulated market.
//!
//! Every quoted instrument lives in exactly one category table. Broker tables are per
//! category too: CEDEAR commissions and spreads are in pesos per certificate, bond ones
//! are per 100 nominal, stock ones are in dollars per share.

use sentiment_common::SentimentError;
use sentiment_common::symbols::Category;
use serde::Serialize;
use strum_macros::Display;

/// What kind of security an entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum InstrumentKind {
    /// Common shares.
    #[strum(serialize = "Stock")]
    Stock,
    /// Exchange traded fund.
    #[strum(serialize = "ETF")]
    Etf,
    /// Argentine depositary receipt.
    #[strum(serialize = "CEDEAR")]
    Cedear,
    /// Sovereign bond paying a coupon.
    #[strum(serialize = "Government Bond")]
    GovernmentBond,
    /// Short-term zero-coupon treasury bill.
    #[strum(serialize = "Treasury Bill")]
    TreasuryBill,
}

/// Category specific facts shown next to a quote.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum InstrumentDetails {
    /// Nothing beyond the common fields.
    Plain,
    /// Conversion into the foreign share.
    Cedear {
        /// Certificates per underlying share, e.g. `1:10`.
        ratio: &'static str,
        /// Symbol of the underlying share.
        underlying: &'static str,
    },
    /// Fixed income terms.
    Bond {
        /// Maturity date, ISO 8601.
        maturity: &'static str,
        /// Annual coupon.
        coupon: &'static str,
    },
}

/// One quoted instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Ticker symbol.
    pub symbol: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Category table the entry belongs to.
    pub category: Category,
    /// Security kind.
    pub kind: InstrumentKind,
    /// Reference price the simulation moves around.
    pub base_price: f64,
    /// Capitalization in dollars, when meaningful.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<f64>,
    /// Typical daily volume.
    pub base_volume: u64,
    /// Category specific facts.
    pub details: InstrumentDetails,
}

/// Fee schedule of one broker for one category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrokerProfile {
    /// Broker display name.
    pub name: &'static str,
    /// Flat commission per unit.
    pub commission: f64,
    /// Lowest and highest spread the broker quotes.
    pub spread: (f64, f64),
}

const fn stock(
    symbol: &'static str,
    name: &'static str,
    kind: InstrumentKind,
    base_price: f64,
    market_cap: f64,
    base_volume: u64,
) -> CatalogEntry {
    CatalogEntry {
        symbol,
        name,
        category: Category::Stocks,
        kind,
        base_price,
        market_cap: Some(market_cap),
        base_volume,
        details: InstrumentDetails::Plain,
    }
}

const fn cedear(
    symbol: &'static str,
    name: &'static str,
    ratio: &'static str,
    underlying: &'static str,
    base_price: f64,
) -> CatalogEntry {
    CatalogEntry {
        symbol,
        name,
        category: Category::Cedears,
        kind: InstrumentKind::Cedear,
        base_price,
        market_cap: None,
        base_volume: 180_000,
        details: InstrumentDetails::Cedear { ratio, underlying },
    }
}

const fn bond(
    symbol: &'static str,
    name: &'static str,
    kind: InstrumentKind,
    maturity: &'static str,
    coupon: &'static str,
    base_price: f64,
) -> CatalogEntry {
    CatalogEntry {
        symbol,
        name,
        category: Category::Bonds,
        kind,
        base_price,
        market_cap: None,
        base_volume: 2_000_000,
        details: InstrumentDetails::Bond { maturity, coupon },
    }
}

const fn broker(name: &'static str, commission: f64, low: f64, high: f64) -> BrokerProfile {
    BrokerProfile {
        name,
        commission,
        spread: (low, high),
    }
}

/// Listed shares and ETFs.
pub static STOCKS: [CatalogEntry; 7] = [
    stock("SPY", "SPDR S&P 500 ETF Trust", InstrumentKind::Etf, 545.0, 5.0e11, 60_000_000),
    stock("AAPL", "Apple Inc.", InstrumentKind::Stock, 192.5, 3.4e12, 55_000_000),
    stock("TSLA", "Tesla, Inc.", InstrumentKind::Stock, 248.5, 7.8e11, 95_000_000),
    stock("NVDA", "NVIDIA Corporation", InstrumentKind::Stock, 121.4, 3.0e12, 250_000_000),
    stock("MSFT", "Microsoft Corporation", InstrumentKind::Stock, 415.3, 3.1e12, 20_000_000),
    stock("GOOGL", "Alphabet Inc.", InstrumentKind::Stock, 172.6, 2.1e12, 25_000_000),
    stock("AMZN", "Amazon.com, Inc.", InstrumentKind::Stock, 185.2, 1.9e12, 40_000_000),
];

/// CEDEARs quoted in pesos.
pub static CEDEARS: [CatalogEntry; 4] = [
    cedear("AAPL.BA", "Apple Inc. CEDEAR", "1:10", "AAPL", 19_250.0),
    cedear("TSLA.BA", "Tesla Inc. CEDEAR", "1:5", "TSLA", 49_750.0),
    cedear("MSFT.BA", "Microsoft Corp. CEDEAR", "1:8", "MSFT", 52_400.0),
    cedear("NVDA.BA", "NVIDIA Corp. CEDEAR", "1:20", "NVDA", 43_750.0),
];

/// Sovereign bonds and treasury bills, priced per 100 nominal.
pub static BONDS: [CatalogEntry; 4] = [
    bond("AL30", "Bonar 2030", InstrumentKind::GovernmentBond, "2030-07-09", "1.00%", 32.5),
    bond("GD30", "Global 2030", InstrumentKind::GovernmentBond, "2030-07-09", "1.00%", 32.75),
    bond("TX26", "Boncer 2026", InstrumentKind::TreasuryBill, "2026-01-15", "0.00%", 85.2),
    bond("AE38", "Bonar 2038", InstrumentKind::GovernmentBond, "2038-01-09", "8.75%", 45.8),
];

/// Stock fees, in dollars per share.
pub static STOCK_BROKERS: [BrokerProfile; 6] = [
    broker("Balanz", 0.12, 0.01, 0.04),
    broker("Bull Market", 0.10, 0.02, 0.05),
    broker("InvertirOnline", 0.15, 0.01, 0.03),
    broker("Cocos Capital", 0.08, 0.03, 0.06),
    broker("Portfolio Personal", 0.18, 0.02, 0.04),
    broker("Galicia Invest", 0.20, 0.02, 0.05),
];

/// CEDEAR fees, in pesos per certificate.
pub static CEDEAR_BROKERS: [BrokerProfile; 6] = [
    broker("Balanz", 0.6, 5.0, 15.0),
    broker("Bull Market", 0.5, 8.0, 18.0),
    broker("InvertirOnline", 0.7, 6.0, 12.0),
    broker("Cocos Capital", 0.4, 10.0, 20.0),
    broker("Portfolio Personal", 0.8, 7.0, 16.0),
    broker("Galicia Invest", 0.9, 9.0, 19.0),
];

/// Bond fees, per 100 nominal.
pub static BOND_BROKERS: [BrokerProfile; 6] = [
    broker("Balanz", 0.25, 0.04, 0.10),
    broker("Bull Market", 0.20, 0.07, 0.12),
    broker("InvertirOnline", 0.30, 0.05, 0.08),
    broker("Cocos Capital", 0.15, 0.09, 0.15),
    broker("Portfolio Personal", 0.35, 0.06, 0.11),
    broker("Galicia Invest", 0.40, 0.08, 0.13),
];

/// Instruments of `category`.
pub fn entries(category: Category) -> &'static [CatalogEntry] {
    match category {
        Category::Stocks => &STOCKS,
        Category::Cedears => &CEDEARS,
        Category::Bonds => &BONDS,
    }
}

/// Brokers quoting `category`.
pub fn brokers(category: Category) -> &'static [BrokerProfile] {
    match category {
        Category::Stocks => &STOCK_BROKERS,
        Category::Cedears => &CEDEAR_BROKERS,
        Category::Bonds => &BOND_BROKERS,
    }
}

/// Symbols of `category` in table order.
pub fn symbols(category: Category) -> Vec<String> {
    entries(category)
        .iter()
        .map(|entry| entry.symbol.to_string())
        .collect()
}

/// Find the entry for `symbol`, ignoring ASCII case.
pub fn lookup(symbol: &str) -> Result<&'static CatalogEntry, SentimentError> {
    STOCKS
        .iter()
        .chain(CEDEARS.iter())
        .chain(BONDS.iter())
        .find(|entry| entry.symbol.eq_ignore_ascii_case(symbol.trim()))
        .ok_or_else(|| SentimentError::SymbolNotFound(symbol.to_string()))
}
