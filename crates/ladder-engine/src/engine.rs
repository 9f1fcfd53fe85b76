//! Per-instrument quote engine.
//!
//! Trigger evaluation runs in a fixed priority order and stops at the
//! first match. The volatility and inventory baselines are updated only
//! inside their own trigger branches, not after every cycle: each trigger
//! keeps comparing against the reading that last fired it, which gives the
//! two triggers independent staleness windows. This hysteresis is
//! deliberate and covered by tests; do not "fix" it by refreshing the
//! baselines in the quote cycle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use ladder_core::{InstrumentId, InstrumentSpec, Price};
use ladder_executor::{ladder_slots, DynOrderGateway, LadderPlan};
use ladder_feed::{InstrumentSnapshot, MarketStore};
use ladder_quote::{build_ladder, trend_skew, volatility, InstrumentParams};
use ladder_telemetry::Metrics;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Why a quote cycle was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequoteReason {
    /// No quote recorded yet for this instrument.
    ColdStart,
    /// Mid moved beyond the price-change trigger.
    PriceMove,
    /// Volatility moved beyond the change trigger relative to its baseline.
    VolatilityShift,
    /// Inventory moved by at least one base size relative to its baseline.
    InventoryChange,
    /// Maximum quote interval elapsed.
    MaxInterval,
}

impl RequoteReason {
    /// Label used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ColdStart => "cold_start",
            Self::PriceMove => "price",
            Self::VolatilityShift => "volatility",
            Self::InventoryChange => "inventory",
            Self::MaxInterval => "interval",
        }
    }
}

impl std::fmt::Display for RequoteReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed-period requote scheduler for one instrument.
pub struct QuoteEngine {
    instrument: InstrumentId,
    spec: InstrumentSpec,
    params: InstrumentParams,
    store: Arc<MarketStore>,
    gateway: DynOrderGateway,
    /// At most one quote cycle in flight. Set before submission, cleared
    /// only after the gateway call fully resolves, success or failure.
    busy: AtomicBool,
}

impl QuoteEngine {
    pub fn new(
        instrument: InstrumentId,
        spec: InstrumentSpec,
        params: InstrumentParams,
        store: Arc<MarketStore>,
        gateway: DynOrderGateway,
    ) -> Self {
        Self {
            instrument,
            spec,
            params,
            store,
            gateway,
            busy: AtomicBool::new(false),
        }
    }

    pub fn instrument(&self) -> &InstrumentId {
        &self.instrument
    }

    /// One scheduler tick.
    ///
    /// No-op while a cycle is in flight or before the first market data
    /// arrives. Returns the trigger that fired, if any.
    pub async fn tick(&self, now_ms: u64) -> Option<RequoteReason> {
        if self.busy.load(Ordering::Acquire) {
            debug!(instrument = %self.instrument, "Quote cycle in flight, tick skipped");
            return None;
        }

        let snap = self.store.snapshot(&self.instrument)?;
        let Some(mid) = snap.mid else {
            debug!(instrument = %self.instrument, "No mid price yet, tick skipped");
            return None;
        };

        let reason = self.evaluate(&snap, mid, now_ms)?;

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return None;
        }
        self.quote_cycle(&snap, mid, reason, now_ms).await;
        self.busy.store(false, Ordering::Release);

        Some(reason)
    }

    /// Walk the triggers in priority order, stopping at the first match.
    ///
    /// A missing baseline seeds from the current reading without
    /// triggering, so the process start never fires a spurious requote. A
    /// zero volatility baseline counts as missing to keep the relative
    /// comparison away from a division by zero.
    fn evaluate(&self, snap: &InstrumentSnapshot, mid: Price, now_ms: u64) -> Option<RequoteReason> {
        // 1. Cold start
        if snap.last_quote_ms.is_none() {
            return Some(RequoteReason::ColdStart);
        }

        // 2. Price change vs the last quoted mid
        match snap.last_quoted_mid {
            None => self.store.set_quoted_mid(&self.instrument, mid),
            Some(last) => {
                if let Some(change) = mid.rel_change_from(last) {
                    if change > self.params.price_change_trigger {
                        return Some(RequoteReason::PriceMove);
                    }
                }
            }
        }

        // 3. Volatility change vs its own baseline
        let vol = volatility(&snap.window);
        match snap.last_volatility {
            Some(last) if !last.is_zero() => {
                if ((vol - last) / last).abs() > self.params.vol_change_trigger {
                    self.store.set_volatility_baseline(&self.instrument, vol);
                    return Some(RequoteReason::VolatilityShift);
                }
            }
            _ => self.store.set_volatility_baseline(&self.instrument, vol),
        }

        // 4. Inventory change vs its own baseline
        match snap.last_inventory {
            None => self
                .store
                .set_inventory_baseline(&self.instrument, snap.inventory),
            Some(last) => {
                if (snap.inventory - last).abs() >= self.params.base_size {
                    self.store
                        .set_inventory_baseline(&self.instrument, snap.inventory);
                    return Some(RequoteReason::InventoryChange);
                }
            }
        }

        // 5. Maximum quote interval
        if let Some(last_ms) = snap.last_quote_ms {
            if now_ms.saturating_sub(last_ms) > self.params.max_quote_interval_ms {
                return Some(RequoteReason::MaxInterval);
            }
        }

        None
    }

    /// One full quote cycle: build the ladder, cancel the previous one,
    /// place the new one, record bookkeeping.
    ///
    /// Bookkeeping is recorded whether or not submission succeeded, so a
    /// failed placement is retried only once a trigger fires again.
    async fn quote_cycle(&self, snap: &InstrumentSnapshot, mid: Price, reason: RequoteReason, now_ms: u64) {
        let started = Instant::now();

        let vol = volatility(&snap.window);
        let trend = trend_skew(&snap.window, mid, self.params.trend_factor);
        let ladder = build_ladder(&self.params, mid, vol, trend, snap.inventory);
        let plan = LadderPlan::from_ladder(&self.instrument, &self.spec, &ladder);

        debug!(
            instrument = %self.instrument,
            reason = %reason,
            mid = %mid,
            volatility = %vol,
            trend_skew = %trend,
            inventory = %snap.inventory,
            "Quote cycle started"
        );
        Metrics::signals(
            self.instrument.as_str(),
            decimal_to_f64(vol),
            decimal_to_f64(snap.inventory),
            decimal_to_f64(mid.inner()),
        );

        if plan.is_one_sided() {
            debug!(instrument = %self.instrument, "One-sided ladder, submission skipped");
        } else {
            // Expected to fail at cold start or after fills; never fatal
            if let Err(e) = self.gateway.cancel_slots(&self.instrument, &plan.cancels).await {
                debug!(instrument = %self.instrument, error = %e, "Cancel ignored");
            }
            if let Err(e) = self.gateway.place_orders(&self.instrument, &plan.orders).await {
                warn!(instrument = %self.instrument, error = %e, "Order placement failed");
                Metrics::submission_failure(self.instrument.as_str());
            }
        }

        // The mid may have moved while the submission was in flight; the
        // price trigger compares against the freshest value
        let current_mid = self
            .store
            .snapshot(&self.instrument)
            .and_then(|s| s.mid)
            .unwrap_or(mid);
        self.store.record_quote(&self.instrument, now_ms, current_mid);

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        info!(
            instrument = %self.instrument,
            reason = %reason,
            elapsed_ms,
            "Quote cycle complete"
        );
        Metrics::quote_cycle(self.instrument.as_str(), reason.as_str(), elapsed_ms);
    }

    /// Run the fixed-period ticker until shutdown.
    ///
    /// On shutdown the engine issues a best-effort cancel of the resting
    /// ladder before exiting.
    pub async fn run(self: Arc<Self>, tick_interval: Duration, shutdown: CancellationToken) {
        let mut ticker = tokio::time::interval(tick_interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        info!(instrument = %self.instrument, interval_ms = tick_interval.as_millis() as u64, "Quote engine started");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.tick(epoch_ms()).await;
                }
                _ = shutdown.cancelled() => break,
            }
        }

        let slots = ladder_slots(&self.instrument, self.params.layers);
        if let Err(e) = self.gateway.cancel_slots(&self.instrument, &slots).await {
            warn!(instrument = %self.instrument, error = %e, "Shutdown cancel failed");
        }
        info!(instrument = %self.instrument, "Quote engine stopped");
    }
}

fn epoch_ms() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}
