//! Signal estimation and ladder construction.
//!
//! Pure computation over a market snapshot:
//! - `signals`: rolling volatility and EMA trend from the candle window
//! - `ladder`: per-layer distances and sizes with inventory/trend skew and
//!   inventory scale, assembled into the final bid/ask ladder
//!
//! # Architecture
//!
//! ```text
//! CandleWindow ──► signals::volatility ─┐
//!              ──► signals::trend_skew ─┤
//! mid price, inventory ─────────────────┴─► ladder::build_ladder ─► QuoteLadder
//! ```

pub mod config;
pub mod ladder;
pub mod signals;

pub use config::InstrumentParams;
pub use ladder::{build_ladder, QuoteLadder, QuoteLevel};
pub use signals::{ema, trend_skew, volatility};
