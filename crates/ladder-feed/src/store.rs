//! Per-instrument market state.
//!
//! The store keeps one state record per registered instrument. Data events
//! mutate the candle window, mid price, and inventory; the requote
//! scheduler owns the bookkeeping fields and updates them through the
//! dedicated methods below. Trigger baselines (`last_volatility`,
//! `last_inventory`) are written only from their own trigger branches,
//! never as part of a completed quote cycle.

use dashmap::DashMap;
use ladder_core::{Candle, CandleWindow, InstrumentId, Price};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;

/// Mutable state for one instrument.
#[derive(Debug)]
pub struct InstrumentState {
    /// Rolling candle window, capped at the instrument's lookback.
    pub window: CandleWindow,
    /// Latest mid price. `None` until the first candle arrives.
    pub mid: Option<Price>,
    /// Signed notional exposure, long positive.
    pub inventory: Decimal,
    /// When the last quote cycle completed (unix ms).
    pub last_quote_ms: Option<u64>,
    /// Mid price recorded at the last completed quote cycle.
    pub last_quoted_mid: Option<Price>,
    /// Volatility baseline for the requote trigger.
    pub last_volatility: Option<Decimal>,
    /// Inventory baseline for the requote trigger.
    pub last_inventory: Option<Decimal>,
}

impl InstrumentState {
    fn new(lookback: usize) -> Self {
        Self {
            window: CandleWindow::new(lookback),
            mid: None,
            inventory: Decimal::ZERO,
            last_quote_ms: None,
            last_quoted_mid: None,
            last_volatility: None,
            last_inventory: None,
        }
    }
}

/// Read-only view of one instrument's state at a point in time.
///
/// Market-data writes are not transactional with a quote cycle's reads; a
/// cycle works from the snapshot it took and may be superseded by newer
/// events mid-flight.
#[derive(Debug, Clone)]
pub struct InstrumentSnapshot {
    pub mid: Option<Price>,
    pub inventory: Decimal,
    pub window: CandleWindow,
    pub last_quote_ms: Option<u64>,
    pub last_quoted_mid: Option<Price>,
    pub last_volatility: Option<Decimal>,
    pub last_inventory: Option<Decimal>,
}

type StateEntry = Arc<RwLock<InstrumentState>>;

/// Registry of per-instrument market state.
///
/// Entries are independent; nothing is shared across instruments.
pub struct MarketStore {
    instruments: DashMap<InstrumentId, StateEntry>,
}

impl MarketStore {
    pub fn new() -> Self {
        Self {
            instruments: DashMap::new(),
        }
    }

    /// Register an instrument with its candle lookback.
    ///
    /// Events for unregistered instruments are dropped.
    pub fn register(&self, instrument: InstrumentId, lookback: usize) {
        self.instruments
            .entry(instrument)
            .or_insert_with(|| Arc::new(RwLock::new(InstrumentState::new(lookback))));
    }

    fn entry(&self, instrument: &InstrumentId) -> Option<StateEntry> {
        self.instruments.get(instrument).map(|e| e.clone())
    }

    /// All registered instruments.
    pub fn instruments(&self) -> Vec<InstrumentId> {
        self.instruments.iter().map(|e| e.key().clone()).collect()
    }

    /// Seed the candle window from a historical fetch, oldest first.
    pub fn seed_candles<I: IntoIterator<Item = Candle>>(&self, instrument: &InstrumentId, candles: I) {
        if let Some(entry) = self.entry(instrument) {
            let mut state = entry.write();
            state.window.seed(candles);
            state.mid = state.window.latest().map(|c| c.close);
        }
    }

    /// Apply a live candle update. The candle close becomes the mid price.
    pub fn apply_candle(&self, instrument: &InstrumentId, candle: Candle) {
        let Some(entry) = self.entry(instrument) else {
            debug!(instrument = %instrument, "Dropping candle for unregistered instrument");
            return;
        };
        let mut state = entry.write();
        if !state.window.update(candle) {
            debug!(
                instrument = %instrument,
                time_ms = candle.time_ms,
                "Dropping stale candle"
            );
            return;
        }
        state.mid = Some(candle.close);
    }

    /// Apply a live inventory update (signed notional).
    pub fn apply_inventory(&self, instrument: &InstrumentId, notional: Decimal) {
        let Some(entry) = self.entry(instrument) else {
            debug!(instrument = %instrument, "Dropping inventory for unregistered instrument");
            return;
        };
        entry.write().inventory = notional;
    }

    /// Take a snapshot for one scheduler evaluation.
    pub fn snapshot(&self, instrument: &InstrumentId) -> Option<InstrumentSnapshot> {
        self.entry(instrument).map(|entry| {
            let state = entry.read();
            InstrumentSnapshot {
                mid: state.mid,
                inventory: state.inventory,
                window: state.window.clone(),
                last_quote_ms: state.last_quote_ms,
                last_quoted_mid: state.last_quoted_mid,
                last_volatility: state.last_volatility,
                last_inventory: state.last_inventory,
            }
        })
    }

    /// Record a completed quote cycle (success or failure).
    ///
    /// Only the quote time and quoted mid move here. The volatility and
    /// inventory baselines stay untouched so their triggers keep comparing
    /// against the reading that last fired them.
    pub fn record_quote(&self, instrument: &InstrumentId, now_ms: u64, mid: Price) {
        if let Some(entry) = self.entry(instrument) {
            let mut state = entry.write();
            state.last_quote_ms = Some(now_ms);
            state.last_quoted_mid = Some(mid);
        }
    }

    /// Seed the quoted-mid baseline without counting as a quote cycle.
    pub fn set_quoted_mid(&self, instrument: &InstrumentId, mid: Price) {
        if let Some(entry) = self.entry(instrument) {
            entry.write().last_quoted_mid = Some(mid);
        }
    }

    /// Update the volatility trigger baseline.
    pub fn set_volatility_baseline(&self, instrument: &InstrumentId, vol: Decimal) {
        if let Some(entry) = self.entry(instrument) {
            entry.write().last_volatility = Some(vol);
        }
    }

    /// Update the inventory trigger baseline.
    pub fn set_inventory_baseline(&self, instrument: &InstrumentId, inventory: Decimal) {
        if let Some(entry) = self.entry(instrument) {
            entry.write().last_inventory = Some(inventory);
        }
    }
}

impl Default for MarketStore {
    fn default() -> Self {
        Self::new()
    }
}
