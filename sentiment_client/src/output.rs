//! Per-category reports and their table and JSON renderings.
//!
//! A `CategoryReport` composes the scored instruments of one feed batch with the ranked
//! broker quotes of each instrument. Scoring and ranking stay independent; the report only
//! puts their results side by side.

use serde::Serialize;
use std::fmt::Write;

use sentiment_common::provider::score_batch;
use sentiment_common::scorer::FactorBreakdown;
use sentiment_common::symbols::Category;
use sentiment_common::{
    BrokerRanking, CostRanker, MarketIndex, Result, ScoredInstrument, Sentiment, SentimentScorer,
};
use sentiment_feed::catalog;
use sentiment_feed::{CategoryBatch, InstrumentDetails, InstrumentKind};

/// One instrument with its score and broker ranking.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentReport {
    /// Snapshot and score.
    #[serde(flatten)]
    pub scored: ScoredInstrument,
    /// Label of the score.
    pub sentiment: Sentiment,
    /// Security kind, when the symbol is in the catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<InstrumentKind>,
    /// Category specific facts, when the symbol is in the catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<InstrumentDetails>,
    /// Sub-factors behind the score, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factors: Option<FactorBreakdown>,
    /// Brokers cheapest first.
    pub brokers: BrokerRanking,
    /// Cost gap between the most expensive and the cheapest broker.
    pub max_savings: f64,
}

/// Everything printed for one category.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryReport {
    /// Reported category.
    pub category: Category,
    /// Aggregate index of the category.
    pub overall_index: MarketIndex,
    /// Label of the index.
    pub sentiment: Sentiment,
    /// Gauge colour of the index.
    pub gauge_color: &'static str,
    /// USD/ARS rate, for CEDEARs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usd_rate: Option<f64>,
    /// Provider message when the fetch failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Scored instruments in provider order.
    pub instruments: Vec<InstrumentReport>,
}

impl CategoryReport {
    /// Score and rank everything in `batch`. `explain` keeps the factor breakdowns.
    pub fn from_batch(batch: &CategoryBatch, explain: bool) -> Self {
        let market = score_batch(&batch.fetch);
        let instruments = market
            .instruments
            .into_iter()
            .map(|scored| {
                let brokers = CostRanker::rank(batch.quotes_for(&scored.snapshot.symbol));
                let entry = catalog::lookup(&scored.snapshot.symbol).ok();
                InstrumentReport {
                    sentiment: scored.sentiment(),
                    kind: entry.map(|e| e.kind),
                    details: entry.map(|e| e.details),
                    factors: explain.then(|| SentimentScorer::factors(&scored.snapshot)),
                    max_savings: brokers.max_savings(),
                    brokers,
                    scored,
                }
            })
            .collect();

        let sentiment = market.index.sentiment();
        Self {
            category: batch.category,
            overall_index: market.index,
            sentiment,
            gauge_color: sentiment.gauge_color(),
            usd_rate: batch.usd_rate,
            error: batch.fetch.error.clone().filter(|_| !batch.fetch.success),
            instruments,
        }
    }
}

/// Pretty-printed JSON of one report.
pub fn render_json(report: &CategoryReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Plain-text tables of one report.
pub fn render_table(report: &CategoryReport) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_table(&mut out, report);
    out
}

fn write_table(out: &mut String, report: &CategoryReport) -> std::fmt::Result {
    write!(
        out,
        "== {} ==  index {} ({})",
        report.category.to_string().to_uppercase(),
        report.overall_index,
        report.sentiment
    )?;
    if let Some(rate) = report.usd_rate {
        write!(out, "  USD/ARS {rate:.2}")?;
    }
    writeln!(out)?;

    if let Some(error) = &report.error {
        writeln!(out, "market data unavailable: {error}")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<10} {:>12} {:>8} {:>6}  {}",
        "SYMBOL", "PRICE", "CHG%", "SCORE", "SENTIMENT"
    )?;
    for instrument in &report.instruments {
        let snapshot = &instrument.scored.snapshot;
        writeln!(
            out,
            "{:<10} {:>12.2} {:>+8.2} {:>6}  {}",
            snapshot.symbol,
            snapshot.price,
            snapshot.change_percent,
            instrument.scored.sentiment_score,
            instrument.sentiment
        )?;
        if let Some(factors) = &instrument.factors {
            writeln!(
                out,
                "{:<10} momentum {:.1}, volume {:.1}, volatility {:.1}, market cap {:.1}",
                "",
                factors.price_momentum,
                factors.volume,
                factors.volatility,
                factors.market_cap
            )?;
        }
    }

    for instrument in &report.instruments {
        write_brokers(out, instrument)?;
    }
    Ok(())
}

fn write_brokers(out: &mut String, instrument: &InstrumentReport) -> std::fmt::Result {
    writeln!(out)?;
    write!(out, "-- {}", instrument.scored.snapshot.symbol)?;
    if let Some(kind) = instrument.kind {
        write!(out, " [{kind}")?;
        match instrument.details {
            Some(InstrumentDetails::Cedear { ratio, underlying }) => {
                write!(out, " {ratio} {underlying}")?
            }
            Some(InstrumentDetails::Bond { maturity, coupon }) => {
                write!(out, " {maturity} {coupon}")?
            }
            Some(InstrumentDetails::Plain) | None => {}
        }
        write!(out, "]")?;
    }
    writeln!(out, " --")?;

    if instrument.brokers.is_empty() {
        return writeln!(out, "no broker quotes");
    }
    writeln!(
        out,
        "{:>2}  {:<20} {:>12} {:>8} {:>8} {:>12} {:>10}",
        "#", "BROKER", "PRICE", "COMM", "SPREAD", "TOTAL", "VS BEST"
    )?;
    for ranked in &instrument.brokers {
        writeln!(
            out,
            "{:>2}  {:<20} {:>12.2} {:>8.2} {:>8.3} {:>12.2} {:>+10.2}",
            ranked.rank,
            ranked.quote.broker_name,
            ranked.quote.price,
            ranked.quote.commission,
            ranked.quote.spread,
            ranked.total_cost,
            instrument.brokers.savings_vs_best(ranked)
        )?;
    }
    writeln!(out, "max savings: {:.2}", instrument.max_savings)
}
