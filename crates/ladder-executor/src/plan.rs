//! Ladder submission plans.
//!
//! Each of the `layers x 2` ladder positions maps to a stable slot id
//! derived from `(instrument, slot index)`: bids take slots `0..layers`,
//! asks `layers..2*layers`. Resubmitting a plan therefore cancels and
//! replaces the same logical orders at the venue every cycle.

use ladder_core::{InstrumentId, InstrumentSpec, OrderSide, Price, Size, SlotId, TimeInForce};
use ladder_quote::{QuoteLadder, QuoteLevel};

/// One order of a ladder plan, priced and sized for the venue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LadderOrder {
    pub slot: SlotId,
    pub side: OrderSide,
    /// Limit price, rounded to the venue's price precision.
    pub price: Price,
    /// Base-asset quantity, rounded to the venue's size precision.
    pub quantity: Size,
    pub tif: TimeInForce,
}

/// A full cancel-then-place request for one quote cycle.
#[derive(Debug, Clone)]
pub struct LadderPlan {
    pub instrument: InstrumentId,
    /// Every slot id assigned to this instrument, cancelled up front.
    pub cancels: Vec<SlotId>,
    /// The new resting ladder, bids first.
    pub orders: Vec<LadderOrder>,
}

/// The stable slot ids for an instrument's full ladder.
pub fn ladder_slots(instrument: &InstrumentId, layers: u32) -> Vec<SlotId> {
    (0..layers * 2)
        .map(|slot| SlotId::derive(instrument, slot))
        .collect()
}

impl LadderPlan {
    /// Build the plan for one cycle.
    ///
    /// Notional converts to base-asset quantity as `notional / price`,
    /// using the unrounded price, then both are rounded to the venue
    /// precision.
    pub fn from_ladder(instrument: &InstrumentId, spec: &InstrumentSpec, ladder: &QuoteLadder) -> Self {
        let layers = ladder.bids.len() as u32;
        let mut orders = Vec::with_capacity(ladder.bids.len() + ladder.asks.len());

        let push = |orders: &mut Vec<LadderOrder>, level: &QuoteLevel, side: OrderSide, slot: u32| {
            let quantity = Size::new(level.notional / level.price.inner());
            orders.push(LadderOrder {
                slot: SlotId::derive(instrument, slot),
                side,
                price: level.price.round_dp(spec.price_decimals),
                quantity: quantity.round_dp(spec.size_decimals),
                tif: TimeInForce::GoodTilCancelled,
            });
        };

        for (i, level) in ladder.bids.iter().enumerate() {
            push(&mut orders, level, OrderSide::Buy, i as u32);
        }
        for (i, level) in ladder.asks.iter().enumerate() {
            push(&mut orders, level, OrderSide::Sell, layers + i as u32);
        }

        Self {
            instrument: instrument.clone(),
            cancels: ladder_slots(instrument, layers),
            orders,
        }
    }

    /// Whether either side of the ladder is empty.
    ///
    /// One-sided plans are not submitted.
    pub fn is_one_sided(&self) -> bool {
        let bids = self.orders.iter().filter(|o| o.side == OrderSide::Buy).count();
        bids == 0 || bids == self.orders.len()
    }
}
