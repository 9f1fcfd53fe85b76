//! One-minute OHLC candles and the bounded rolling window over them.
//!
//! The window is ordered oldest to newest; the last entry is the current,
//! possibly still-forming period. Live updates for the same period replace
//! the existing entry in place, new periods append and evict the oldest.

use crate::Price;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One OHLC candle, keyed by its period-start timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candle {
    /// Period start in unix milliseconds.
    pub time_ms: u64,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
}

impl Candle {
    pub fn new(time_ms: u64, open: Price, high: Price, low: Price, close: Price) -> Self {
        Self {
            time_ms,
            open,
            high,
            low,
            close,
        }
    }
}

/// Bounded rolling window of candles, oldest first.
///
/// Invariants: `len() <= cap`, timestamps strictly increasing.
/// Out-of-order candles that match no existing period are dropped so the
/// ordering invariant holds under replayed or delayed feed data.
#[derive(Debug, Clone)]
pub struct CandleWindow {
    candles: VecDeque<Candle>,
    cap: usize,
}

impl CandleWindow {
    /// Create an empty window holding at most `cap` candles.
    pub fn new(cap: usize) -> Self {
        Self {
            candles: VecDeque::with_capacity(cap),
            cap,
        }
    }

    /// Apply one candle update.
    ///
    /// A candle whose timestamp matches an existing entry replaces it (the
    /// live period refreshing). Otherwise the candle appends as a new period
    /// and the oldest entry is evicted once the window exceeds its cap.
    ///
    /// Returns `false` when the candle was dropped as stale (older than the
    /// newest entry and matching no existing period).
    pub fn update(&mut self, candle: Candle) -> bool {
        if let Some(pos) = self
            .candles
            .iter()
            .rposition(|c| c.time_ms == candle.time_ms)
        {
            self.candles[pos] = candle;
            return true;
        }

        if let Some(last) = self.candles.back() {
            if candle.time_ms < last.time_ms {
                return false;
            }
        }

        self.candles.push_back(candle);
        while self.candles.len() > self.cap {
            self.candles.pop_front();
        }
        true
    }

    /// Seed from a historical fetch, oldest first.
    ///
    /// Goes through the regular update path so duplicates and disorder in
    /// the fetched data are handled the same way as live updates.
    pub fn seed<I: IntoIterator<Item = Candle>>(&mut self, candles: I) {
        for candle in candles {
            self.update(candle);
        }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Iterate oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &Candle> {
        self.candles.iter()
    }

    /// The current (possibly still-forming) period, if any.
    pub fn latest(&self) -> Option<&Candle> {
        self.candles.back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn candle(time_ms: u64, close: &str) -> Candle {
        let px = Price::new(close.parse().unwrap());
        Candle::new(time_ms, px, px, px, px)
    }

    #[test]
    fn test_append_and_evict() {
        let mut window = CandleWindow::new(3);
        for t in 0..5u64 {
            assert!(window.update(candle(t * 60_000, "100")));
        }

        assert_eq!(window.len(), 3);
        let times: Vec<u64> = window.iter().map(|c| c.time_ms).collect();
        assert_eq!(times, vec![120_000, 180_000, 240_000]);
    }

    #[test]
    fn test_same_period_replaces() {
        let mut window = CandleWindow::new(3);
        window.update(candle(0, "100"));
        window.update(candle(60_000, "101"));

        // Live period refreshes in place
        let mut updated = candle(60_000, "102");
        updated.high = Price::new(dec!(103));
        assert!(window.update(updated));

        assert_eq!(window.len(), 2);
        assert_eq!(window.latest().unwrap().close.inner(), dec!(102));
        assert_eq!(window.latest().unwrap().high.inner(), dec!(103));
    }

    #[test]
    fn test_stale_candle_dropped() {
        let mut window = CandleWindow::new(5);
        window.update(candle(120_000, "100"));
        window.update(candle(180_000, "101"));

        // Older than the newest entry, matches no period
        assert!(!window.update(candle(60_000, "99")));
        assert_eq!(window.len(), 2);
        assert_eq!(window.iter().next().unwrap().time_ms, 120_000);
    }

    #[test]
    fn test_timestamps_strictly_increasing() {
        let mut window = CandleWindow::new(4);
        for t in [0u64, 60_000, 60_000, 120_000, 90_000] {
            window.update(candle(t, "100"));
        }

        let times: Vec<u64> = window.iter().map(|c| c.time_ms).collect();
        assert_eq!(times, vec![0, 60_000, 120_000]);
        assert!(times.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_seed_keeps_newest() {
        let mut window = CandleWindow::new(2);
        window.seed((0..4u64).map(|t| candle(t * 60_000, "100")));

        assert_eq!(window.len(), 2);
        assert_eq!(window.latest().unwrap().time_ms, 180_000);
    }
}
