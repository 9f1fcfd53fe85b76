//! Prometheus metrics for the ladder quoting engine.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()` intentionally. A registration
//! failure means duplicate metric names, a fatal configuration error that
//! should crash at startup rather than fail silently. These panics only
//! occur during static initialization, never at runtime.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_gauge_vec, register_histogram_vec, CounterVec, GaugeVec,
    HistogramVec,
};

/// Completed quote cycles by trigger reason.
pub static QUOTE_CYCLES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "ladder_quote_cycles_total",
        "Total quote cycles by trigger reason",
        &["instrument", "reason"]
    )
    .unwrap()
});

/// Quote cycle latency in milliseconds (cancel through place).
pub static QUOTE_CYCLE_MS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "ladder_quote_cycle_ms",
        "Quote cycle latency in milliseconds",
        &["instrument"],
        vec![1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0, 2000.0]
    )
    .unwrap()
});

/// Order placement failures.
pub static SUBMISSION_FAILURES_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "ladder_submission_failures_total",
        "Total order placement failures",
        &["instrument"]
    )
    .unwrap()
});

/// Current volatility reading.
pub static VOLATILITY: Lazy<GaugeVec> = Lazy::new(|| {
    register_gauge_vec!(
        "ladder_volatility",
        "Current true-range volatility reading",
        &["instrument"]
    )
    .unwrap()
});

/// Current signed notional inventory.
pub static INVENTORY_NOTIONAL: Lazy<GaugeVec> = Lazy::new(|| {
    register_gauge_vec!(
        "ladder_inventory_notional",
        "Current signed notional inventory",
        &["instrument"]
    )
    .unwrap()
});

/// Latest mid price.
pub static MID_PRICE: Lazy<GaugeVec> = Lazy::new(|| {
    register_gauge_vec!(
        "ladder_mid_price",
        "Latest mid price",
        &["instrument"]
    )
    .unwrap()
});

/// Metrics facade for easy access.
pub struct Metrics;

impl Metrics {
    /// Record a completed quote cycle.
    pub fn quote_cycle(instrument: &str, reason: &str, elapsed_ms: f64) {
        QUOTE_CYCLES_TOTAL
            .with_label_values(&[instrument, reason])
            .inc();
        QUOTE_CYCLE_MS
            .with_label_values(&[instrument])
            .observe(elapsed_ms);
    }

    /// Record an order placement failure.
    pub fn submission_failure(instrument: &str) {
        SUBMISSION_FAILURES_TOTAL
            .with_label_values(&[instrument])
            .inc();
    }

    /// Update the per-instrument signal gauges.
    pub fn signals(instrument: &str, volatility: f64, inventory: f64, mid: f64) {
        VOLATILITY.with_label_values(&[instrument]).set(volatility);
        INVENTORY_NOTIONAL
            .with_label_values(&[instrument])
            .set(inventory);
        MID_PRICE.with_label_values(&[instrument]).set(mid);
    }
}
