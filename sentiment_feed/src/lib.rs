//!
//! Simulated multi-broker market for stocks, CEDEARs and bonds.
//!
//! This crate aggregates:
//! - `catalog`: static instrument and broker tables.
//! - `quote`: random price moves, synthetic volume and broker quote generation.
//! - `simulator`: `SimulatedMarket`, implementing both provider contracts.
//! - `feed`: `MarketFeed`, fetching several categories concurrently over a channel.
#![warn(missing_docs)]
pub mod catalog;
pub mod feed;
pub mod quote;
pub mod simulator;

pub use catalog::{CatalogEntry, InstrumentDetails, InstrumentKind};
pub use feed::{CategoryBatch, FeedEvent, FeedRequest, MarketFeed};
pub use simulator::{SimulatedMarket, SimulationConfig};
