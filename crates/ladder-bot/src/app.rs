//! Application wiring.
//!
//! Owns the market store and the channel the venue adapter feeds, seeds
//! candle windows from history, then runs one quote engine task per
//! instrument until shutdown. Shutdown cancels every engine's ticker; each
//! engine issues a best-effort cancel of its resting ladder on the way
//! out.

use std::sync::Arc;
use std::time::Duration;

use ladder_core::InstrumentId;
use ladder_engine::QuoteEngine;
use ladder_executor::{DynOrderGateway, LogGateway};
use ladder_feed::{run_event_consumer, DynCandleHistory, MarketEvent, MarketStore, NullHistory};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};

const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// The assembled bot.
pub struct Application {
    config: AppConfig,
    store: Arc<MarketStore>,
    history: DynCandleHistory,
    gateway: DynOrderGateway,
    event_tx: mpsc::Sender<MarketEvent>,
    event_rx: Option<mpsc::Receiver<MarketEvent>>,
    shutdown: CancellationToken,
}

impl Application {
    /// Build the application with paper defaults: the logging gateway and
    /// no candle history.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        config.validate()?;

        let store = Arc::new(MarketStore::new());
        for inst in &config.instruments {
            store.register(InstrumentId::new(&inst.name), inst.params.candle_lookback);
        }

        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self {
            config,
            store,
            history: Arc::new(NullHistory),
            gateway: Arc::new(LogGateway),
            event_tx,
            event_rx: Some(event_rx),
            shutdown: CancellationToken::new(),
        })
    }

    /// Replace the order gateway (venue adapter).
    pub fn with_gateway(mut self, gateway: DynOrderGateway) -> Self {
        self.gateway = gateway;
        self
    }

    /// Replace the candle history source (venue adapter).
    pub fn with_history(mut self, history: DynCandleHistory) -> Self {
        self.history = history;
        self
    }

    /// Sender for live market-data events.
    pub fn event_sender(&self) -> mpsc::Sender<MarketEvent> {
        self.event_tx.clone()
    }

    /// Token that stops the bot when cancelled.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    pub fn store(&self) -> Arc<MarketStore> {
        self.store.clone()
    }

    /// Run until ctrl-c or the shutdown token fires.
    pub async fn run(mut self) -> AppResult<()> {
        // Seed candle windows from history before quoting starts
        for inst in &self.config.instruments {
            let id = InstrumentId::new(&inst.name);
            let candles = self.history.fetch(&id, inst.params.candle_lookback).await?;
            info!(instrument = %id, candles = candles.len(), "Seeded candle history");
            self.store.seed_candles(&id, candles);
        }

        let event_rx = self
            .event_rx
            .take()
            .ok_or_else(|| AppError::Config("Application already running".into()))?;
        let consumer = tokio::spawn(run_event_consumer(self.store.clone(), event_rx));

        let tick_interval = Duration::from_millis(self.config.engine.tick_interval_ms);
        let mut engines = Vec::with_capacity(self.config.instruments.len());
        for inst in &self.config.instruments {
            let engine = Arc::new(QuoteEngine::new(
                InstrumentId::new(&inst.name),
                inst.spec,
                inst.params.clone(),
                self.store.clone(),
                self.gateway.clone(),
            ));
            engines.push(tokio::spawn(
                engine.run(tick_interval, self.shutdown.child_token()),
            ));
        }
        info!(instruments = engines.len(), "All quote engines running");

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                self.shutdown.cancel();
            }
            _ = self.shutdown.cancelled() => {
                info!("Shutdown token cancelled");
            }
        }

        // Engines cancel their resting ladders before exiting
        for handle in engines {
            if let Err(e) = handle.await {
                warn!(error = %e, "Engine task failed");
            }
        }
        consumer.abort();

        info!("Shutdown complete");
        Ok(())
    }
}
