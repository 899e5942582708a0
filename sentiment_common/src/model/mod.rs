//! Market data records consumed by the scorer and the ranker.
//!
//! - `snapshot`: validated per-instrument `InstrumentSnapshot`.
//! - `broker_quote`: one broker's `BrokerQuote` for an instrument.
//! - `raw`: lenient `RawInstrument` rows as delivered by upstream sources.

pub mod broker_quote;
pub mod raw;
pub mod snapshot;

pub use broker_quote::BrokerQuote;
pub use raw::RawInstrument;
pub use snapshot::InstrumentSnapshot;
