//! Application configuration.

use crate::error::{AppError, AppResult};
use ladder_core::InstrumentSpec;
use ladder_quote::InstrumentParams;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Scheduler configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Requote scheduler tick period in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

fn default_tick_interval_ms() -> u64 {
    500
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// One quoted instrument: venue precision plus quoting parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstrumentConfig {
    /// Venue symbol (e.g. "BTC").
    pub name: String,
    /// Venue precision for prices and quantities.
    #[serde(flatten)]
    pub spec: InstrumentSpec,
    /// Quoting parameters.
    #[serde(default)]
    pub params: InstrumentParams,
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    /// Instruments to quote.
    #[serde(default = "default_instruments")]
    pub instruments: Vec<InstrumentConfig>,
}

fn default_instruments() -> Vec<InstrumentConfig> {
    vec![InstrumentConfig {
        name: "BTC".to_string(),
        spec: InstrumentSpec {
            price_decimals: 0,
            size_decimals: 5,
        },
        params: InstrumentParams::default(),
    }]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            instruments: default_instruments(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or fall back to defaults when the file is absent.
    pub fn load(path: &str) -> AppResult<Self> {
        if Path::new(path).exists() {
            Self::from_file(path)
        } else {
            tracing::warn!(path = %path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the engine cannot quote sanely.
    pub fn validate(&self) -> AppResult<()> {
        if self.engine.tick_interval_ms == 0 {
            return Err(AppError::Config("tick_interval_ms must be positive".into()));
        }
        for inst in &self.instruments {
            inst.params
                .validate()
                .map_err(|e| AppError::Config(format!("{}: {e}", inst.name)))?;
        }
        Ok(())
    }
}
