//! Historical candle seeding.
//!
//! The venue's history fetch is an external collaborator behind a trait so
//! the engine can be wired without any network code.

use crate::error::FeedError;
use ladder_core::{Candle, InstrumentId};
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Fetch of one-minute OHLC candles, oldest first.
pub trait CandleHistory: Send + Sync {
    fn fetch<'a>(
        &'a self,
        instrument: &'a InstrumentId,
        lookback_minutes: usize,
    ) -> BoxFuture<'a, Result<Vec<Candle>, FeedError>>;
}

/// Arc wrapper for CandleHistory trait objects.
pub type DynCandleHistory = Arc<dyn CandleHistory>;

/// History source that returns no candles.
///
/// Used when running without a venue adapter; the window fills from live
/// events instead and the estimators stay at zero until then.
#[derive(Debug, Default)]
pub struct NullHistory;

impl CandleHistory for NullHistory {
    fn fetch<'a>(
        &'a self,
        _instrument: &'a InstrumentId,
        _lookback_minutes: usize,
    ) -> BoxFuture<'a, Result<Vec<Candle>, FeedError>> {
        Box::pin(async { Ok(Vec::new()) })
    }
}

/// Fixed candle set for tests and replay.
#[derive(Debug, Default)]
pub struct StaticHistory {
    candles: Vec<Candle>,
}

impl StaticHistory {
    pub fn new(candles: Vec<Candle>) -> Self {
        Self { candles }
    }
}

impl CandleHistory for StaticHistory {
    fn fetch<'a>(
        &'a self,
        _instrument: &'a InstrumentId,
        lookback_minutes: usize,
    ) -> BoxFuture<'a, Result<Vec<Candle>, FeedError>> {
        let skip = self.candles.len().saturating_sub(lookback_minutes);
        let candles = self.candles[skip..].to_vec();
        Box::pin(async move { Ok(candles) })
    }
}
