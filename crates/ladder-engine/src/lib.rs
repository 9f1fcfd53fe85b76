//! Requote scheduler.
//!
//! One [`QuoteEngine`] per instrument runs a fixed-period control loop:
//! every tick it reads a market snapshot, walks the trigger conditions in
//! priority order, and on a match runs one quote cycle (build ladder,
//! cancel, place, record bookkeeping). An atomic busy flag guarantees at
//! most one cycle in flight per instrument.

pub mod engine;

pub use engine::{QuoteEngine, RequoteReason};
