//! Bid/ask ladder construction.
//!
//! Distances and sizes grow geometrically per layer. Inventory and trend
//! skew the two sides asymmetrically: the side whose fill would reduce the
//! dominant exposure is pulled toward mid, the other pushed away. Beyond
//! the soft inventory limit, sizes on the exposure-increasing side shrink,
//! down to a minimal clamp at the hard limit.

use ladder_core::{OrderSide, Price};
use rust_decimal::Decimal;
use tracing::trace;

use crate::config::InstrumentParams;

/// One rung of the ladder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteLevel {
    /// Quote price.
    pub price: Price,
    /// Quote size in notional (quote currency).
    pub notional: Decimal,
    /// Layer index (0 = tightest).
    pub layer: u32,
}

/// The full two-sided ladder for one quote cycle.
#[derive(Debug, Clone)]
pub struct QuoteLadder {
    /// Bid levels, tightest first.
    pub bids: Vec<QuoteLevel>,
    /// Ask levels, tightest first.
    pub asks: Vec<QuoteLevel>,
}

/// Raw per-layer distances from mid, before skew.
///
/// Layer 0 is half the base spread plus the volatility widening; each
/// further layer multiplies the previous distance.
pub fn raw_distances(params: &InstrumentParams, mid: Price, vol: Decimal) -> Vec<Decimal> {
    let mut distances = Vec::with_capacity(params.layers as usize);
    for i in 0..params.layers {
        if i == 0 {
            distances.push(params.base_spread * mid.inner() / Decimal::TWO + vol * params.vol_multiplier);
        } else {
            distances.push(distances[i as usize - 1] * params.distance_multiplier);
        }
    }
    distances
}

/// Raw per-layer sizes in notional, before inventory scaling.
pub fn raw_sizes(params: &InstrumentParams) -> Vec<Decimal> {
    let mut sizes = Vec::with_capacity(params.layers as usize);
    for i in 0..params.layers {
        if i == 0 {
            sizes.push(params.base_size);
        } else {
            sizes.push(sizes[i as usize - 1] * params.size_multiplier);
        }
    }
    sizes
}

/// Combined inventory + trend skew term.
///
/// Positive when long exposure or a downtrend dominates, negative when
/// short exposure or an uptrend dominates.
pub fn combined_skew(params: &InstrumentParams, inventory: Decimal, trend_skew: Decimal) -> Decimal {
    params.skew_adjustment * inventory / params.hard_limit - trend_skew
}

/// Apply the skew to one side's distances.
///
/// The pulled-in side clamps at zero distance; the pushed-out side is
/// unbounded, so a large skew can quote very wide.
fn skew_distances(distances: &[Decimal], skew: Decimal, side: OrderSide) -> Vec<Decimal> {
    let factor = if skew > Decimal::ZERO {
        // Long bias (or downtrend dominant): push bids away, pull asks in
        match side {
            OrderSide::Buy => Decimal::ONE + skew,
            OrderSide::Sell => (Decimal::ONE - skew).max(Decimal::ZERO),
        }
    } else {
        // Short bias (or uptrend dominant): pull bids in, push asks away
        match side {
            OrderSide::Buy => (Decimal::ONE - skew.abs()).max(Decimal::ZERO),
            OrderSide::Sell => Decimal::ONE + skew.abs(),
        }
    };
    distances.iter().map(|d| d * factor).collect()
}

/// Apply inventory scaling to one side's sizes.
///
/// No-op within the soft limit, and on the side that already reduces
/// inventory (bids while short, asks while long). At or past the hard
/// limit every size clamps to `kill_switch_notional`, halting meaningful
/// quoting on that side.
fn scale_sizes(
    params: &InstrumentParams,
    sizes: &[Decimal],
    inventory: Decimal,
    side: OrderSide,
) -> Vec<Decimal> {
    let reduces_inventory = match side {
        OrderSide::Buy => inventory < Decimal::ZERO,
        OrderSide::Sell => inventory > Decimal::ZERO,
    };
    if inventory.abs() <= params.soft_limit || reduces_inventory {
        return sizes.to_vec();
    }

    let inventory_factor = inventory / params.hard_limit;
    if inventory_factor.abs() >= Decimal::ONE {
        return sizes.iter().map(|_| params.kill_switch_notional).collect();
    }

    let factor = Decimal::ONE - inventory_factor.abs();
    sizes.iter().map(|s| s * factor).collect()
}

/// Build the full ladder for one quote cycle.
///
/// `vol` is the current volatility reading, `trend_skew` the output of
/// [`crate::signals::trend_skew`], `inventory` the signed notional
/// exposure (long positive).
pub fn build_ladder(
    params: &InstrumentParams,
    mid: Price,
    vol: Decimal,
    trend_skew: Decimal,
    inventory: Decimal,
) -> QuoteLadder {
    let distances = raw_distances(params, mid, vol);
    let skew = combined_skew(params, inventory, trend_skew);
    trace!(%mid, %vol, %trend_skew, %inventory, %skew, "Building ladder");

    let bid_distances = skew_distances(&distances, skew, OrderSide::Buy);
    let ask_distances = skew_distances(&distances, skew, OrderSide::Sell);

    let sizes = raw_sizes(params);
    let bid_sizes = scale_sizes(params, &sizes, inventory, OrderSide::Buy);
    let ask_sizes = scale_sizes(params, &sizes, inventory, OrderSide::Sell);

    let mut bids = Vec::with_capacity(params.layers as usize);
    let mut asks = Vec::with_capacity(params.layers as usize);
    for i in 0..params.layers as usize {
        bids.push(QuoteLevel {
            price: Price::new(mid.inner() - bid_distances[i]),
            notional: bid_sizes[i],
            layer: i as u32,
        });
        asks.push(QuoteLevel {
            price: Price::new(mid.inner() + ask_distances[i]),
            notional: ask_sizes[i],
            layer: i as u32,
        });
    }

    QuoteLadder { bids, asks }
}
