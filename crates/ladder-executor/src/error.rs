//! Gateway error type.
//!
//! Transport failures and venue rejects surface identically; callers treat
//! the gateway as opaque and recover through the next scheduler tick.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("Gateway error: {0}")]
pub struct GatewayError(String);

impl GatewayError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self(message.into())
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
