//! Order vocabulary and stable slot identifiers.

use crate::InstrumentId;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Order side: buy or sell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// Time-in-force for orders. The resting ladder only ever quotes GTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good-til-cancelled.
    #[default]
    #[serde(rename = "Gtc")]
    GoodTilCancelled,
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoodTilCancelled => write!(f, "Gtc"),
        }
    }
}

/// Namespace for slot identifier derivation. Fixed so identifiers are
/// stable across processes and restarts.
const SLOT_NAMESPACE: Uuid = Uuid::from_u128(0x6f45_1bd2_9c0a_4a7e_b1d3_58aa_20c4_f0e7);

/// Stable identifier for one ladder position.
///
/// Derived deterministically from `(instrument, slot index)` so that every
/// quote cycle addresses the same logical order at the venue: cancelling and
/// re-placing a slot always targets the same client order id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(Uuid);

impl SlotId {
    /// Derive the identifier for a ladder slot.
    ///
    /// Slot indices run `0..layers` for bids and `layers..2×layers` for asks.
    pub fn derive(instrument: &InstrumentId, slot: u32) -> Self {
        let name = format!("{}:{}", instrument, slot);
        Self(Uuid::new_v5(&SLOT_NAMESPACE, name.as_bytes()))
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_id_deterministic() {
        let btc = InstrumentId::new("BTC");
        assert_eq!(SlotId::derive(&btc, 0), SlotId::derive(&btc, 0));
        assert_eq!(SlotId::derive(&btc, 3), SlotId::derive(&btc, 3));
    }

    #[test]
    fn test_slot_id_distinct_per_slot_and_instrument() {
        let btc = InstrumentId::new("BTC");
        let eth = InstrumentId::new("ETH");

        assert_ne!(SlotId::derive(&btc, 0), SlotId::derive(&btc, 1));
        assert_ne!(SlotId::derive(&btc, 0), SlotId::derive(&eth, 0));
    }
}
