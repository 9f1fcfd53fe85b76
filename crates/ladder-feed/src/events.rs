//! Typed market-data events and the consumer task.
//!
//! The venue adapter pushes events into an mpsc channel; one consumer task
//! applies them to the [`MarketStore`]. The scheduler never runs inside a
//! data callback, it only reads snapshots.

use crate::store::MarketStore;
use ladder_core::{Candle, InstrumentId};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// A live market-data event for one instrument.
#[derive(Debug, Clone)]
pub enum MarketEvent {
    /// Latest (possibly still-forming) one-minute candle.
    Candle {
        instrument: InstrumentId,
        candle: Candle,
    },
    /// Signed notional exposure update.
    Inventory {
        instrument: InstrumentId,
        notional: Decimal,
    },
}

impl MarketEvent {
    pub fn instrument(&self) -> &InstrumentId {
        match self {
            Self::Candle { instrument, .. } => instrument,
            Self::Inventory { instrument, .. } => instrument,
        }
    }
}

/// Consume events until the channel closes, applying each to the store.
pub async fn run_event_consumer(store: Arc<MarketStore>, mut rx: mpsc::Receiver<MarketEvent>) {
    while let Some(event) = rx.recv().await {
        match event {
            MarketEvent::Candle { instrument, candle } => {
                debug!(
                    instrument = %instrument,
                    time_ms = candle.time_ms,
                    close = %candle.close,
                    "Candle update"
                );
                store.apply_candle(&instrument, candle);
            }
            MarketEvent::Inventory { instrument, notional } => {
                debug!(instrument = %instrument, notional = %notional, "Inventory update");
                store.apply_inventory(&instrument, notional);
            }
        }
    }
    info!("Market event channel closed, consumer exiting");
}
