//! Property sweeps over randomly generated snapshots and quote sets.
//!
//! Inputs come from a seeded `StdRng` so every run checks the same cases.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sentiment_common::ranker::rank_brokers;
use sentiment_common::scorer::{aggregate_index, score_instrument};
use sentiment_common::{BrokerQuote, InstrumentSnapshot, SentimentScorer};

const CASES: usize = 500;

fn at() -> DateTime<Utc> {
    "2025-06-02T14:00:00Z".parse().expect("timestamp")
}

fn random_snapshot(rng: &mut impl Rng, index: usize) -> InstrumentSnapshot {
    let change_percent = rng.random_range(-60.0..60.0);
    let market_cap = if rng.random_bool(0.3) {
        None
    } else {
        Some(rng.random_range(0.0..5e11))
    };
    InstrumentSnapshot::new(
        &format!("SYM{index}"),
        "Random instrument",
        rng.random_range(0.0..50_000.0),
        change_percent,
        change_percent,
        rng.random_range(0..10_000_000),
        market_cap,
        at(),
    )
    .expect("generated snapshot is valid")
}

fn random_quotes(rng: &mut impl Rng) -> Vec<BrokerQuote> {
    let len = rng.random_range(0..12);
    (0..len)
        .map(|i| {
            // Coarse prices so equal totals show up regularly.
            BrokerQuote::new(
                format!("Broker {i}"),
                f64::from(rng.random_range(95_u32..100)),
                f64::from(rng.random_range(0_u32..3)),
                f64::from(rng.random_range(0_u32..3)),
                at(),
            )
        })
        .collect()
}

#[test]
fn scores_stay_within_bounds_and_are_deterministic() {
    let mut rng = StdRng::seed_from_u64(0x5EED);
    for index in 0..CASES {
        let snapshot = random_snapshot(&mut rng, index);
        let first = score_instrument(&snapshot);
        let second = score_instrument(&snapshot);
        assert!(first.sentiment_score <= 100);
        assert_eq!(first, second);
        assert_eq!(
            first.sentiment_score,
            SentimentScorer::factors(&snapshot).score()
        );
    }
}

#[test]
fn index_stays_within_bounds() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..CASES / 5 {
        let count = rng.random_range(1..20);
        let scored: Vec<_> = (0..count)
            .map(|i| score_instrument(&random_snapshot(&mut rng, i)))
            .collect();
        let min = scored.iter().map(|s| s.sentiment_score).min().expect("non-empty");
        let max = scored.iter().map(|s| s.sentiment_score).max().expect("non-empty");

        let index = aggregate_index(&scored).value();
        assert!(index <= 100);
        assert!(index >= min && index <= max, "{index} outside [{min}, {max}]");
    }
    assert_eq!(aggregate_index(&[]).value(), 50);
}

#[test]
fn ranking_is_a_stable_permutation_with_contiguous_ranks() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..CASES {
        let quotes = random_quotes(&mut rng);
        let ranking = rank_brokers(&quotes);
        let ranked = ranking.quotes();

        assert_eq!(ranked.len(), quotes.len());
        for (position, entry) in ranked.iter().enumerate() {
            assert_eq!(entry.rank, position + 1);
            assert_eq!(entry.total_cost, entry.quote.total_cost());
        }
        for pair in ranked.windows(2) {
            assert!(pair[0].total_cost <= pair[1].total_cost);
            if pair[0].total_cost == pair[1].total_cost {
                let input_pos = |name: &str| {
                    quotes
                        .iter()
                        .position(|q| q.broker_name == name)
                        .expect("ranked quote comes from the input")
                };
                assert!(
                    input_pos(&pair[0].quote.broker_name) < input_pos(&pair[1].quote.broker_name)
                );
            }
        }

        let mut input_names: Vec<_> = quotes.iter().map(|q| q.broker_name.clone()).collect();
        let mut output_names: Vec<_> = ranked.iter().map(|q| q.quote.broker_name.clone()).collect();
        input_names.sort();
        output_names.sort();
        assert_eq!(input_names, output_names);

        assert!(ranking.max_savings() >= 0.0);
    }
}

#[test]
fn ranking_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..CASES {
        let ranking = rank_brokers(&random_quotes(&mut rng));
        let reranked = rank_brokers(&ranking.clone().into_quotes());
        assert_eq!(ranking, reranked);
    }
}

#[test]
fn scoring_is_safe_across_threads() {
    let mut rng = StdRng::seed_from_u64(2024);
    let snapshots: Vec<_> = (0..64).map(|i| random_snapshot(&mut rng, i)).collect();
    let expected: Vec<u8> = snapshots
        .iter()
        .map(|s| score_instrument(s).sentiment_score)
        .collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    snapshots
                        .iter()
                        .map(|s| score_instrument(s).sentiment_score)
                        .collect::<Vec<u8>>()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().expect("worker finished"), expected);
        }
    });
}
