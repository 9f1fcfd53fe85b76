//! Rolling volatility and trend estimation over the candle window.
//!
//! Both estimators degrade gracefully on short windows: volatility reads
//! zero and the EMA is absent until at least two candles exist.

use ladder_core::{CandleWindow, Price};
use rust_decimal::Decimal;

/// True-range volatility over the window.
///
/// For each consecutive candle pair the term is
/// `max(cur.high - cur.low, |cur.close - prev.high|, |cur.close - prev.low|)`,
/// and the result is the arithmetic mean of all terms. Anchoring to the
/// previous candle's extremes keeps a just-opened live candle (whose own
/// high-low range is still near zero) from dragging the reading down.
pub fn volatility(window: &CandleWindow) -> Decimal {
    if window.len() < 2 {
        return Decimal::ZERO;
    }

    let mut sum = Decimal::ZERO;
    let mut prev: Option<&ladder_core::Candle> = None;
    for candle in window.iter() {
        if let Some(p) = prev {
            let range = candle.high.inner() - candle.low.inner();
            let vs_prev_high = (candle.close.inner() - p.high.inner()).abs();
            let vs_prev_low = (candle.close.inner() - p.low.inner()).abs();
            sum += range.max(vs_prev_high).max(vs_prev_low);
        }
        prev = Some(candle);
    }

    sum / Decimal::from(window.len() as u64 - 1)
}

/// Exponential moving average of closes, or `None` below two candles.
///
/// `k = 2 / (n + 1)` with `n` the current window length; the seed is the
/// oldest close.
pub fn ema(window: &CandleWindow) -> Option<Decimal> {
    if window.len() < 2 {
        return None;
    }

    let k = Decimal::TWO / Decimal::from(window.len() as u64 + 1);
    let one_minus_k = Decimal::ONE - k;

    let mut iter = window.iter();
    let mut value = iter.next()?.close.inner();
    for candle in iter {
        value = candle.close.inner() * k + value * one_minus_k;
    }
    Some(value)
}

/// Directional trend skew: `(mid - ema) / mid * trend_factor`.
///
/// Positive in an uptrend. Zero when the EMA is undefined or mid is zero.
pub fn trend_skew(window: &CandleWindow, mid: Price, trend_factor: Decimal) -> Decimal {
    if mid.is_zero() {
        return Decimal::ZERO;
    }
    match ema(window) {
        Some(ema) => (mid.inner() - ema) / mid.inner() * trend_factor,
        None => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ladder_core::Candle;
    use rust_decimal_macros::dec;

    fn candle(t: u64, o: Decimal, h: Decimal, l: Decimal, c: Decimal) -> Candle {
        Candle::new(
            t * 60_000,
            Price::new(o),
            Price::new(h),
            Price::new(l),
            Price::new(c),
        )
    }

    fn flat(t: u64, px: Decimal) -> Candle {
        candle(t, px, px, px, px)
    }

    fn window_of(candles: Vec<Candle>) -> CandleWindow {
        let mut window = CandleWindow::new(candles.len().max(2));
        window.seed(candles);
        window
    }

    #[test]
    fn test_volatility_short_window_is_zero() {
        assert_eq!(volatility(&CandleWindow::new(5)), Decimal::ZERO);
        let one = window_of(vec![flat(0, dec!(100))]);
        assert_eq!(volatility(&one), Decimal::ZERO);
    }

    #[test]
    fn test_volatility_uses_previous_extremes() {
        // A just-opened candle with zero own range still produces a term
        // because close is compared against the previous high/low.
        let window = window_of(vec![
            candle(0, dec!(100), dec!(110), dec!(90), dec!(105)),
            flat(1, dec!(120)),
        ]);
        // term = max(0, |120-110|, |120-90|) = 30
        assert_eq!(volatility(&window), dec!(30));
    }

    #[test]
    fn test_volatility_is_mean_of_terms() {
        let window = window_of(vec![
            candle(0, dec!(100), dec!(102), dec!(98), dec!(100)),
            candle(1, dec!(100), dec!(104), dec!(100), dec!(103)),
            candle(2, dec!(103), dec!(103), dec!(101), dec!(102)),
        ]);
        // pair 1: max(104-100, |103-102|, |103-98|) = max(4, 1, 5) = 5
        // pair 2: max(103-101, |102-104|, |102-100|) = max(2, 2, 2) = 2
        assert_eq!(volatility(&window), dec!(3.5));
    }

    #[test]
    fn test_volatility_monotone_in_range_widening() {
        let base = window_of(vec![
            candle(0, dec!(100), dec!(102), dec!(98), dec!(100)),
            candle(1, dec!(100), dec!(101), dec!(99), dec!(100)),
        ]);
        let widened = window_of(vec![
            candle(0, dec!(100), dec!(102), dec!(98), dec!(100)),
            candle(1, dec!(100), dec!(106), dec!(94), dec!(100)),
        ]);
        assert!(volatility(&widened) >= volatility(&base));
    }

    #[test]
    fn test_ema_short_window_undefined() {
        assert!(ema(&CandleWindow::new(5)).is_none());
        let one = window_of(vec![flat(0, dec!(100))]);
        assert!(ema(&one).is_none());
    }

    #[test]
    fn test_ema_constant_closes() {
        for len in 2u64..=7 {
            let window = window_of((0..len).map(|t| flat(t, dec!(42))).collect());
            assert_eq!(ema(&window), Some(dec!(42)));
        }
    }

    #[test]
    fn test_ema_moves_toward_recent_closes() {
        let window = window_of(vec![flat(0, dec!(100)), flat(1, dec!(110)), flat(2, dec!(110))]);
        let value = ema(&window).unwrap();
        assert!(value > dec!(100));
        assert!(value < dec!(110));
    }

    #[test]
    fn test_trend_skew_sign() {
        let window = window_of(vec![flat(0, dec!(100)), flat(1, dec!(100))]);
        // mid above EMA: uptrend, positive skew
        let up = trend_skew(&window, Price::new(dec!(101)), dec!(100));
        assert!(up > Decimal::ZERO);
        // mid below EMA: downtrend, negative skew
        let down = trend_skew(&window, Price::new(dec!(99)), dec!(100));
        assert!(down < Decimal::ZERO);
    }

    #[test]
    fn test_trend_skew_zero_without_ema() {
        let window = window_of(vec![flat(0, dec!(100))]);
        assert_eq!(
            trend_skew(&window, Price::new(dec!(100)), dec!(100)),
            Decimal::ZERO
        );
    }
}
