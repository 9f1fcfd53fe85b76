//! Ladder market-making bot entry point.
//!
//! Runs in paper mode out of the box: quote cycles are computed and logged
//! but no venue is contacted. Integrations supply a real gateway, history
//! source, and event feed through [`ladder_bot::Application`].

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Single-venue ladder market-making bot
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via LADDER_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    ladder_telemetry::init_logging()?;

    info!("Starting ladder-bot v{}", env!("CARGO_PKG_VERSION"));

    // Config path: CLI arg > LADDER_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("LADDER_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");
    let config = ladder_bot::AppConfig::load(&config_path)?;
    info!(
        instruments = ?config.instruments.iter().map(|i| &i.name).collect::<Vec<_>>(),
        tick_interval_ms = config.engine.tick_interval_ms,
        "Configuration loaded"
    );

    let app = ladder_bot::Application::new(config)?;
    app.run().await?;

    Ok(())
}
