//! Feed error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Historical candle fetch failed: {0}")]
    History(String),

    #[error("Instrument not registered: {0}")]
    UnknownInstrument(String),
}

pub type FeedResult<T> = Result<T, FeedError>;
