//! Per-instrument quoting parameters.

use ladder_core::CoreError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Quoting parameters for one instrument.
///
/// Fixed at startup. Distances and sizes grow geometrically per layer,
/// so both multipliers are expected to be > 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentParams {
    /// Base spread as a fraction of mid price (full spread, both sides).
    #[serde(default = "default_base_spread")]
    pub base_spread: Decimal,

    /// Number of quote layers per side.
    #[serde(default = "default_layers")]
    pub layers: u32,

    /// Distance growth factor per layer.
    #[serde(default = "default_distance_multiplier")]
    pub distance_multiplier: Decimal,

    /// Size growth factor per layer.
    #[serde(default = "default_size_multiplier")]
    pub size_multiplier: Decimal,

    /// How much the volatility reading widens the layer-0 distance.
    #[serde(default = "default_vol_multiplier")]
    pub vol_multiplier: Decimal,

    /// Relative volatility change that triggers a requote.
    #[serde(default = "default_vol_change_trigger")]
    pub vol_change_trigger: Decimal,

    /// Relative mid-price change that triggers a requote.
    #[serde(default = "default_price_change_trigger")]
    pub price_change_trigger: Decimal,

    /// Layer-0 order size in notional (quote currency).
    #[serde(default = "default_base_size")]
    pub base_size: Decimal,

    /// Hard inventory limit in notional. At this exposure the offending
    /// side is reduced to `kill_switch_notional` per layer.
    #[serde(default = "default_hard_limit")]
    pub hard_limit: Decimal,

    /// Soft inventory limit in notional. Size scaling starts beyond it.
    #[serde(default = "default_soft_limit")]
    pub soft_limit: Decimal,

    /// Weight of inventory in the distance skew.
    #[serde(default = "default_skew_adjustment")]
    pub skew_adjustment: Decimal,

    /// Weight of the EMA trend in the distance skew. Large because
    /// `(mid - ema) / mid` is small.
    #[serde(default = "default_trend_factor")]
    pub trend_factor: Decimal,

    /// Candle window length in minutes. Doubles as the EMA period.
    #[serde(default = "default_candle_lookback")]
    pub candle_lookback: usize,

    /// Maximum time between quote cycles before a requote is forced (ms).
    #[serde(default = "default_max_quote_interval_ms")]
    pub max_quote_interval_ms: u64,

    /// Minimal per-layer notional used once the hard limit is reached.
    #[serde(default = "default_kill_switch_notional")]
    pub kill_switch_notional: Decimal,
}

impl InstrumentParams {
    /// Reject parameter sets the ladder cannot be built from.
    pub fn validate(&self) -> ladder_core::Result<()> {
        if self.layers == 0 {
            return Err(CoreError::InvalidConfig("layers must be at least 1".into()));
        }
        if self.hard_limit <= Decimal::ZERO {
            return Err(CoreError::InvalidConfig("hard_limit must be positive".into()));
        }
        if self.soft_limit > self.hard_limit {
            return Err(CoreError::InvalidConfig(
                "soft_limit must not exceed hard_limit".into(),
            ));
        }
        if self.distance_multiplier <= Decimal::ONE || self.size_multiplier <= Decimal::ONE {
            return Err(CoreError::InvalidConfig(
                "distance_multiplier and size_multiplier must exceed 1".into(),
            ));
        }
        if self.candle_lookback < 2 {
            return Err(CoreError::InvalidConfig(
                "candle_lookback must be at least 2".into(),
            ));
        }
        Ok(())
    }
}

impl Default for InstrumentParams {
    fn default() -> Self {
        Self {
            base_spread: default_base_spread(),
            layers: default_layers(),
            distance_multiplier: default_distance_multiplier(),
            size_multiplier: default_size_multiplier(),
            vol_multiplier: default_vol_multiplier(),
            vol_change_trigger: default_vol_change_trigger(),
            price_change_trigger: default_price_change_trigger(),
            base_size: default_base_size(),
            hard_limit: default_hard_limit(),
            soft_limit: default_soft_limit(),
            skew_adjustment: default_skew_adjustment(),
            trend_factor: default_trend_factor(),
            candle_lookback: default_candle_lookback(),
            max_quote_interval_ms: default_max_quote_interval_ms(),
            kill_switch_notional: default_kill_switch_notional(),
        }
    }
}

fn default_base_spread() -> Decimal {
    Decimal::new(6, 4) // 0.0006 = 6 bps full spread
}
fn default_layers() -> u32 {
    3
}
fn default_distance_multiplier() -> Decimal {
    Decimal::new(15, 1) // 1.5
}
fn default_size_multiplier() -> Decimal {
    Decimal::new(15, 1) // 1.5
}
fn default_vol_multiplier() -> Decimal {
    Decimal::new(5, 1) // 0.5
}
fn default_vol_change_trigger() -> Decimal {
    Decimal::new(1, 1) // 0.1 = 10%
}
fn default_price_change_trigger() -> Decimal {
    Decimal::new(5, 4) // 0.0005 = 5 bps
}
fn default_base_size() -> Decimal {
    Decimal::new(100, 0) // $100
}
fn default_hard_limit() -> Decimal {
    Decimal::new(10_000, 0) // $10k
}
fn default_soft_limit() -> Decimal {
    Decimal::new(5_000, 0) // $5k
}
fn default_skew_adjustment() -> Decimal {
    Decimal::TWO
}
fn default_trend_factor() -> Decimal {
    Decimal::new(100, 0)
}
fn default_candle_lookback() -> usize {
    7
}
fn default_max_quote_interval_ms() -> u64 {
    20_000
}
fn default_kill_switch_notional() -> Decimal {
    Decimal::new(3, 0) // $3, effectively no quoting on this side
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_params() {
        let params = InstrumentParams::default();
        assert_eq!(params.base_spread, dec!(0.0006));
        assert_eq!(params.layers, 3);
        assert_eq!(params.distance_multiplier, dec!(1.5));
        assert_eq!(params.size_multiplier, dec!(1.5));
        assert_eq!(params.vol_multiplier, dec!(0.5));
        assert_eq!(params.vol_change_trigger, dec!(0.1));
        assert_eq!(params.price_change_trigger, dec!(0.0005));
        assert_eq!(params.base_size, dec!(100));
        assert_eq!(params.hard_limit, dec!(10000));
        assert_eq!(params.soft_limit, dec!(5000));
        assert_eq!(params.skew_adjustment, dec!(2));
        assert_eq!(params.trend_factor, dec!(100));
        assert_eq!(params.candle_lookback, 7);
        assert_eq!(params.max_quote_interval_ms, 20_000);
        assert_eq!(params.kill_switch_notional, dec!(3));
    }

    #[test]
    fn test_default_params_valid() {
        assert!(InstrumentParams::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_layers() {
        let params = InstrumentParams {
            layers: 0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_soft_above_hard() {
        let params = InstrumentParams {
            soft_limit: dec!(20000),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_flat_multipliers() {
        let params = InstrumentParams {
            distance_multiplier: dec!(1),
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_params_serde_defaults() {
        let toml_str = r#"
layers = 5
base_size = 250
"#;
        let params: InstrumentParams = toml::from_str(toml_str).unwrap();
        assert_eq!(params.layers, 5);
        assert_eq!(params.base_size, dec!(250));
        // Unspecified fields fall back to defaults
        assert_eq!(params.base_spread, dec!(0.0006));
        assert_eq!(params.max_quote_interval_ms, 20_000);
    }
}
