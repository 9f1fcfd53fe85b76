//! Core domain types for the ladder quoting engine.
//!
//! This crate provides fundamental types used throughout the quoting system:
//! - `InstrumentId`, `InstrumentSpec`: instrument identity and venue precision
//! - `Price`, `Size`: precision-safe numeric types
//! - `Candle`, `CandleWindow`: bounded rolling one-minute OHLC window
//! - `OrderSide`, `TimeInForce`, `SlotId`: order vocabulary

pub mod candle;
pub mod decimal;
pub mod error;
pub mod instrument;
pub mod order;

pub use candle::{Candle, CandleWindow};
pub use decimal::{Price, Size};
pub use error::{CoreError, Result};
pub use instrument::{InstrumentId, InstrumentSpec};
pub use order::{OrderSide, SlotId, TimeInForce};
