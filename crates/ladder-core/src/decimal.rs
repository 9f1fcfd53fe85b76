//! Precision-safe decimal types for quoting.
//!
//! Uses `rust_decimal` for exact decimal arithmetic, avoiding
//! floating-point rounding errors critical in financial calculations.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Price with exact decimal precision.
///
/// Wraps `Decimal` to provide type safety and prevent mixing
/// prices with sizes in calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(pub Decimal);

impl Price {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Round to the venue's price precision, half away from zero.
    #[inline]
    pub fn round_dp(&self, decimals: u32) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Relative change from a reference price: `|self − other| / other`.
    ///
    /// Returns `None` when the reference is zero.
    #[inline]
    pub fn rel_change_from(&self, other: Price) -> Option<Decimal> {
        if other.is_zero() {
            return None;
        }
        Some(((self.0 - other.0) / other.0).abs())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Decimal> for Price {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

/// Base-asset quantity with exact decimal precision.
///
/// Quoted ladder sizes are denominated in notional (quote currency); a
/// `Size` only appears once notional has been converted to a venue
/// quantity at a concrete price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Size(pub Decimal);

impl Size {
    #[inline]
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    #[inline]
    pub fn inner(&self) -> Decimal {
        self.0
    }

    /// Round to the venue's size precision, half away from zero.
    #[inline]
    pub fn round_dp(&self, decimals: u32) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Size {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<Decimal> for Size {
    fn from(d: Decimal) -> Self {
        Self(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_rel_change() {
        let p1 = Price::new(dec!(100000));
        let p2 = Price::new(dec!(100050));

        assert_eq!(p2.rel_change_from(p1).unwrap(), dec!(0.0005));
        // Always absolute, regardless of direction
        assert!(p1.rel_change_from(p2).unwrap() > Decimal::ZERO);
    }

    #[test]
    fn test_price_rel_change_zero_reference() {
        let p = Price::new(dec!(100));
        assert!(p.rel_change_from(Price::ZERO).is_none());
    }

    #[test]
    fn test_price_round_dp() {
        let price = Price::new(dec!(99932.5));
        assert_eq!(price.round_dp(0).inner(), dec!(99933));
        assert_eq!(price.round_dp(1).inner(), dec!(99932.5));
    }

    #[test]
    fn test_size_round_dp() {
        let size = Size::new(dec!(0.00123456));
        assert_eq!(size.round_dp(5).inner(), dec!(0.00123));
    }
}
