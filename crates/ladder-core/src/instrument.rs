//! Instrument identity and venue precision.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for one tradable instrument on the venue (e.g. "BTC").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentId(String);

impl InstrumentId {
    pub fn new<S: Into<String>>(symbol: S) -> Self {
        Self(symbol.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for InstrumentId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for InstrumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Venue precision for one instrument.
///
/// Prices are rounded to `price_decimals` and base-asset quantities to
/// `size_decimals` before submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentSpec {
    /// Decimal places for order prices.
    #[serde(default)]
    pub price_decimals: u32,
    /// Decimal places for base-asset quantities.
    #[serde(default = "default_size_decimals")]
    pub size_decimals: u32,
}

fn default_size_decimals() -> u32 {
    5
}

impl Default for InstrumentSpec {
    fn default() -> Self {
        Self {
            price_decimals: 0,
            size_decimals: default_size_decimals(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instrument_id_display() {
        let id = InstrumentId::new("BTC");
        assert_eq!(id.to_string(), "BTC");
        assert_eq!(id.as_str(), "BTC");
    }

    #[test]
    fn test_spec_defaults() {
        let spec = InstrumentSpec::default();
        assert_eq!(spec.price_decimals, 0);
        assert_eq!(spec.size_decimals, 5);
    }

    #[test]
    fn test_instrument_id_serde_transparent() {
        let id: InstrumentId = serde_json::from_str("\"ETH\"").unwrap();
        assert_eq!(id, InstrumentId::new("ETH"));
    }
}
