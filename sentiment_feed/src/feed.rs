//! Concurrent category fetches delivered over a channel.
//!
//! `MarketFeed::start` spawns a coordinator thread that runs one worker per requested
//! category against a shared market, any type implementing the market-data, broker-quote
//! and exchange-rate provider traits (`SimulatedMarket` in the client). Each worker sends
//! a `FeedEvent::Batch` as soon as its category is ready; the coordinator sends
//! `FeedEvent::Finished` after every worker has been joined.
//!
//! Event model:
//! - `FeedEvent::Batch(CategoryBatch)`: snapshots and broker quotes for one category.
//! - `FeedEvent::Finished`: no more batches follow.
//!
//! Provider failures travel inside the batch as a failed `FetchResult`, so consumers see
//! one batch per request.

use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, info};
use sentiment_common::provider::{
    BrokerQuoteProvider, FetchResult, MarketDataProvider, UsdRateProvider,
};
use sentiment_common::symbols::Category;
use sentiment_common::{BrokerQuote, Result, SentimentError};
use serde::Serialize;
use std::sync::Arc;
use std::thread;

/// Broker quotes for one symbol, in broker table order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolQuotes {
    /// Quoted symbol.
    pub symbol: String,
    /// Unranked quotes.
    pub quotes: Vec<BrokerQuote>,
}

/// Everything fetched for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBatch {
    /// Requested category.
    pub category: Category,
    /// Market data for the requested symbols.
    pub fetch: FetchResult,
    /// Broker quotes per fetched snapshot, in snapshot order.
    pub broker_quotes: Vec<SymbolQuotes>,
    /// USD/ARS rate, for CEDEAR batches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usd_rate: Option<f64>,
}

impl CategoryBatch {
    /// Batch for a category whose fetch failed.
    pub fn failed(category: Category, message: impl Into<String>) -> Self {
        Self {
            category,
            fetch: FetchResult::failed(message),
            broker_quotes: Vec::new(),
            usd_rate: None,
        }
    }

    /// Quotes for `symbol`, empty when the batch has none.
    pub fn quotes_for(&self, symbol: &str) -> &[BrokerQuote] {
        self.broker_quotes
            .iter()
            .find(|entry| entry.symbol == symbol)
            .map(|entry| entry.quotes.as_slice())
            .unwrap_or_default()
    }
}

/// Message sent by the feed to its consumer.
#[derive(Debug, Clone)]
pub enum FeedEvent {
    /// One category is ready.
    Batch(CategoryBatch),
    /// All workers are done.
    Finished,
}

/// One category and the symbols to fetch for it.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedRequest {
    /// Category the symbols belong to.
    pub category: Category,
    /// Symbols to fetch.
    pub symbols: Vec<String>,
}

impl FeedRequest {
    /// Request for `symbols` of `category`.
    pub fn new(category: Category, symbols: Vec<String>) -> Self {
        Self { category, symbols }
    }
}

/// Threaded front of a market provider.
pub struct MarketFeed;

impl MarketFeed {
    /// Start fetching `requests` and return the receiving end of the event channel.
    pub fn start<M>(market: Arc<M>, requests: Vec<FeedRequest>) -> Receiver<FeedEvent>
    where
        M: MarketDataProvider + BrokerQuoteProvider + UsdRateProvider + 'static,
    {
        let (events_tx, events_rx) = crossbeam_channel::unbounded::<FeedEvent>();

        thread::spawn(move || {
            info!(
                "Market feed started for {} categories (Thread ID: {:?})",
                requests.len(),
                thread::current().id()
            );

            thread::scope(|scope| {
                for request in &requests {
                    let market = Arc::clone(&market);
                    let events_tx = events_tx.clone();
                    scope.spawn(move || {
                        let batch = Self::build_batch(market.as_ref(), request);
                        if let Err(e) = send(&events_tx, FeedEvent::Batch(batch)) {
                            error!("{e}");
                        }
                    });
                }
            });

            if let Err(e) = send(&events_tx, FeedEvent::Finished) {
                error!("{e}");
            }
            info!("Market feed finished");
        });

        events_rx
    }

    /// Fetch one category: snapshots, broker quotes per snapshot and, for CEDEARs, the rate.
    pub fn build_batch<M>(market: &M, request: &FeedRequest) -> CategoryBatch
    where
        M: MarketDataProvider + BrokerQuoteProvider + UsdRateProvider + ?Sized,
    {
        let fetch = market.fetch(&request.symbols);
        let broker_quotes = fetch
            .data
            .iter()
            .map(|snapshot| SymbolQuotes {
                symbol: snapshot.symbol.clone(),
                quotes: market.broker_quotes(&snapshot.symbol),
            })
            .collect();
        let usd_rate = match request.category {
            Category::Cedears if fetch.success => market.usd_rate(),
            _ => None,
        };

        debug!(
            "Built {} batch: {} snapshots, success={}",
            request.category,
            fetch.data.len(),
            fetch.success
        );
        CategoryBatch {
            category: request.category,
            fetch,
            broker_quotes,
            usd_rate,
        }
    }

    /// Drain `events` until `Finished`, returning batches ordered by category.
    pub fn collect(events: &Receiver<FeedEvent>) -> Result<Vec<CategoryBatch>> {
        let mut batches = Vec::new();
        loop {
            match events.recv() {
                Ok(FeedEvent::Batch(batch)) => batches.push(batch),
                Ok(FeedEvent::Finished) => break,
                Err(e) => return Err(SentimentError::ChannelRecv(e.to_string())),
            }
        }
        batches.sort_by_key(|batch| batch.category);
        Ok(batches)
    }
}

fn send(events: &Sender<FeedEvent>, event: FeedEvent) -> Result<()> {
    events
        .send(event)
        .map_err(|e| SentimentError::ChannelSend(format!("Feed consumer is gone: {e}")))
}
