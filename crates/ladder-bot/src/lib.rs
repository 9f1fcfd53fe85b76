//! Ladder market-making bot.
//!
//! Wires the market store, event consumer, and one quote engine per
//! configured instrument. Venue adapters (history fetch, event feed, order
//! gateway) are injected; by default the bot runs in paper mode with the
//! logging gateway and no history.

pub mod app;
pub mod config;
pub mod error;

pub use app::Application;
pub use config::{AppConfig, EngineConfig, InstrumentConfig};
pub use error::{AppError, AppResult};
