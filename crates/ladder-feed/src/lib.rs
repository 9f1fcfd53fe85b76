//! Market state registry and event ingestion.
//!
//! One [`MarketStore`] owns the mutable state of every quoted instrument:
//! the candle window, latest mid price, inventory, and the scheduler's
//! bookkeeping (last quote time, quoted mid, trigger baselines). Live data
//! arrives as typed [`MarketEvent`]s consumed by a dedicated task; the
//! scheduler reads consistent snapshots.

pub mod error;
pub mod events;
pub mod history;
pub mod store;

pub use error::{FeedError, FeedResult};
pub use events::{run_event_consumer, MarketEvent};
pub use history::{CandleHistory, DynCandleHistory, NullHistory, StaticHistory};
pub use store::{InstrumentSnapshot, InstrumentState, MarketStore};
