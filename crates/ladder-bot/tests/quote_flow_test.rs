//! End-to-end quote flow against the mock gateway.
//!
//! Drives the assembled application the way a venue adapter would: seed
//! history, push live events, and watch the cancel-then-place requests
//! that come out.

use std::sync::Arc;
use std::time::Duration;

use ladder_bot::{AppConfig, Application};
use ladder_core::{Candle, InstrumentId, OrderSide, Price};
use ladder_executor::MockGateway;
use ladder_feed::{MarketEvent, StaticHistory};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn btc() -> InstrumentId {
    InstrumentId::new("BTC")
}

fn flat_candle(t: u64, close: Decimal) -> Candle {
    let px = Price::new(close);
    Candle::new(t * 60_000, px, px, px, px)
}

fn fast_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.engine.tick_interval_ms = 20;
    config
}

#[tokio::test]
async fn test_cold_start_places_reference_ladder() {
    let gateway = Arc::new(MockGateway::new());
    // One seeded candle: volatility zero, trend undefined, mid 100000
    let history = Arc::new(StaticHistory::new(vec![flat_candle(0, dec!(100000))]));

    let app = Application::new(fast_config())
        .unwrap()
        .with_gateway(gateway.clone())
        .with_history(history);
    let shutdown = app.shutdown_token();

    let handle = tokio::spawn(app.run());
    tokio::time::sleep(Duration::from_millis(80)).await;
    shutdown.cancel();
    handle.await.unwrap().unwrap();

    assert!(gateway.placement_count() >= 1);
    let (instrument, orders) = gateway.placements()[0].clone();
    assert_eq!(instrument, btc());
    assert_eq!(orders.len(), 6);

    // No skew, no scale: the ladder is symmetric around mid
    let bids: Vec<_> = orders
        .iter()
        .filter(|o| o.side == OrderSide::Buy)
        .collect();
    let asks: Vec<_> = orders
        .iter()
        .filter(|o| o.side == OrderSide::Sell)
        .collect();

    let bid_px: Vec<Decimal> = bids.iter().map(|o| o.price.inner()).collect();
    let ask_px: Vec<Decimal> = asks.iter().map(|o| o.price.inner()).collect();
    assert_eq!(bid_px, vec![dec!(99970), dec!(99955), dec!(99933)]);
    assert_eq!(ask_px, vec![dec!(100030), dec!(100045), dec!(100068)]);

    let bid_qty: Vec<Decimal> = bids.iter().map(|o| o.quantity.inner()).collect();
    assert_eq!(bid_qty, vec![dec!(0.00100), dec!(0.00150), dec!(0.00225)]);
}

#[tokio::test]
async fn test_inventory_event_forces_requote_with_stable_slots() {
    let gateway = Arc::new(MockGateway::new());
    let history = Arc::new(StaticHistory::new(vec![flat_candle(0, dec!(100000))]));

    let app = Application::new(fast_config())
        .unwrap()
        .with_gateway(gateway.clone())
        .with_history(history);
    let events = app.event_sender();
    let shutdown = app.shutdown_token();

    let handle = tokio::spawn(app.run());

    // Let the cold-start cycle run and the baselines seed
    tokio::time::sleep(Duration::from_millis(80)).await;
    let before = gateway.placement_count();
    assert!(before >= 1);

    // A fill worth more than one base size arrives
    events
        .send(MarketEvent::Inventory {
            instrument: btc(),
            notional: dec!(500),
        })
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(80)).await;
    shutdown.cancel();
    handle.await.unwrap().unwrap();

    let placements = gateway.placements();
    assert!(placements.len() > before);

    // Every cycle re-targets the same logical orders
    let first_slots: Vec<_> = placements[0].1.iter().map(|o| o.slot).collect();
    let last_slots: Vec<_> = placements.last().unwrap().1.iter().map(|o| o.slot).collect();
    assert_eq!(first_slots, last_slots);

    // Shutdown issued a final cancel for the full ladder
    let cancels = gateway.cancel_requests();
    assert_eq!(cancels.last().unwrap().1.len(), 6);
}

#[tokio::test]
async fn test_no_market_data_no_orders() {
    let gateway = Arc::new(MockGateway::new());

    let app = Application::new(fast_config())
        .unwrap()
        .with_gateway(gateway.clone());
    let shutdown = app.shutdown_token();

    let handle = tokio::spawn(app.run());
    tokio::time::sleep(Duration::from_millis(80)).await;
    shutdown.cancel();
    handle.await.unwrap().unwrap();

    // No history and no events: ticks stay no-ops, only the shutdown
    // cancel goes out
    assert_eq!(gateway.placement_count(), 0);
    assert_eq!(gateway.cancel_requests().len(), 1);
}

#[tokio::test]
async fn test_candle_stream_moves_the_ladder() {
    let gateway = Arc::new(MockGateway::new());
    let history = Arc::new(StaticHistory::new(vec![flat_candle(0, dec!(100000))]));

    let app = Application::new(fast_config())
        .unwrap()
        .with_gateway(gateway.clone())
        .with_history(history);
    let events = app.event_sender();
    let shutdown = app.shutdown_token();

    let handle = tokio::spawn(app.run());
    tokio::time::sleep(Duration::from_millis(80)).await;

    // Mid jumps by 1%: well past the price-change trigger
    events
        .send(MarketEvent::Candle {
            instrument: btc(),
            candle: flat_candle(1, dec!(101000)),
        })
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(80)).await;
    shutdown.cancel();
    handle.await.unwrap().unwrap();

    let placements = gateway.placements();
    assert!(placements.len() >= 2);
    // The new ladder centers on the new mid
    let last_orders = &placements.last().unwrap().1;
    let best_bid = last_orders
        .iter()
        .filter(|o| o.side == OrderSide::Buy)
        .map(|o| o.price)
        .max()
        .unwrap();
    assert!(best_bid.inner() > dec!(100000));
    assert!(best_bid.inner() < dec!(101000));
}
