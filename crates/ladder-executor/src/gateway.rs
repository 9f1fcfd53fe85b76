//! Order gateway trait for venue submission.
//!
//! Abstracts the cancel/place transport so the engine can be exercised
//! against a mock and run in paper mode without a venue connection.

use std::pin::Pin;
use std::sync::Arc;

use ladder_core::{InstrumentId, SlotId};
use tracing::info;

use crate::error::GatewayResult;
use crate::plan::LadderOrder;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Venue order transport.
///
/// Cancelling a slot with no resting order must succeed at the venue
/// level; callers ignore cancel errors either way.
pub trait OrderGateway: Send + Sync {
    /// Cancel any resting orders for the given slots.
    fn cancel_slots<'a>(
        &'a self,
        instrument: &'a InstrumentId,
        slots: &'a [SlotId],
    ) -> BoxFuture<'a, GatewayResult<()>>;

    /// Place the new ladder as resting limit orders.
    fn place_orders<'a>(
        &'a self,
        instrument: &'a InstrumentId,
        orders: &'a [LadderOrder],
    ) -> BoxFuture<'a, GatewayResult<()>>;
}

/// Arc wrapper for OrderGateway trait objects.
pub type DynOrderGateway = Arc<dyn OrderGateway>;

/// Paper gateway: logs every request and always succeeds.
#[derive(Debug, Default)]
pub struct LogGateway;

impl OrderGateway for LogGateway {
    fn cancel_slots<'a>(
        &'a self,
        instrument: &'a InstrumentId,
        slots: &'a [SlotId],
    ) -> BoxFuture<'a, GatewayResult<()>> {
        Box::pin(async move {
            info!(instrument = %instrument, count = slots.len(), "Paper cancel");
            Ok(())
        })
    }

    fn place_orders<'a>(
        &'a self,
        instrument: &'a InstrumentId,
        orders: &'a [LadderOrder],
    ) -> BoxFuture<'a, GatewayResult<()>> {
        Box::pin(async move {
            for order in orders {
                info!(
                    instrument = %instrument,
                    slot = %order.slot,
                    side = %order.side,
                    price = %order.price,
                    quantity = %order.quantity,
                    tif = %order.tif,
                    "Paper order"
                );
            }
            Ok(())
        })
    }
}

/// Recording gateway for tests.
#[derive(Debug)]
pub struct MockGateway {
    cancels: parking_lot::Mutex<Vec<(InstrumentId, Vec<SlotId>)>>,
    placements: parking_lot::Mutex<Vec<(InstrumentId, Vec<LadderOrder>)>>,
    next_cancel_result: parking_lot::Mutex<GatewayResult<()>>,
    next_place_result: parking_lot::Mutex<GatewayResult<()>>,
    /// Artificial latency applied to `place_orders`, for in-flight tests.
    place_delay_ms: std::sync::atomic::AtomicU64,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    pub fn new() -> Self {
        Self {
            cancels: parking_lot::Mutex::new(Vec::new()),
            placements: parking_lot::Mutex::new(Vec::new()),
            next_cancel_result: parking_lot::Mutex::new(Ok(())),
            next_place_result: parking_lot::Mutex::new(Ok(())),
            place_delay_ms: std::sync::atomic::AtomicU64::new(0),
        }
    }

    pub fn set_next_cancel_result(&self, result: GatewayResult<()>) {
        *self.next_cancel_result.lock() = result;
    }

    pub fn set_next_place_result(&self, result: GatewayResult<()>) {
        *self.next_place_result.lock() = result;
    }

    pub fn set_place_delay_ms(&self, delay_ms: u64) {
        self.place_delay_ms
            .store(delay_ms, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn cancel_requests(&self) -> Vec<(InstrumentId, Vec<SlotId>)> {
        self.cancels.lock().clone()
    }

    pub fn placements(&self) -> Vec<(InstrumentId, Vec<LadderOrder>)> {
        self.placements.lock().clone()
    }

    pub fn placement_count(&self) -> usize {
        self.placements.lock().len()
    }
}

impl OrderGateway for MockGateway {
    fn cancel_slots<'a>(
        &'a self,
        instrument: &'a InstrumentId,
        slots: &'a [SlotId],
    ) -> BoxFuture<'a, GatewayResult<()>> {
        Box::pin(async move {
            self.cancels
                .lock()
                .push((instrument.clone(), slots.to_vec()));
            self.next_cancel_result.lock().clone()
        })
    }

    fn place_orders<'a>(
        &'a self,
        instrument: &'a InstrumentId,
        orders: &'a [LadderOrder],
    ) -> BoxFuture<'a, GatewayResult<()>> {
        Box::pin(async move {
            let delay = self.place_delay_ms.load(std::sync::atomic::Ordering::SeqCst);
            if delay > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(delay)).await;
            }
            self.placements
                .lock()
                .push((instrument.clone(), orders.to_vec()));
            self.next_place_result.lock().clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use ladder_core::{OrderSide, Price, Size, TimeInForce};
    use rust_decimal_macros::dec;

    fn btc() -> InstrumentId {
        InstrumentId::new("BTC")
    }

    fn sample_order() -> LadderOrder {
        LadderOrder {
            slot: SlotId::derive(&btc(), 0),
            side: OrderSide::Buy,
            price: Price::new(dec!(99970)),
            quantity: Size::new(dec!(0.001)),
            tif: TimeInForce::GoodTilCancelled,
        }
    }

    #[tokio::test]
    async fn test_mock_records_cancels_and_placements() {
        let gateway = MockGateway::new();
        let slots = vec![SlotId::derive(&btc(), 0), SlotId::derive(&btc(), 1)];

        gateway.cancel_slots(&btc(), &slots).await.unwrap();
        gateway.place_orders(&btc(), &[sample_order()]).await.unwrap();

        assert_eq!(gateway.cancel_requests().len(), 1);
        assert_eq!(gateway.cancel_requests()[0].1, slots);
        assert_eq!(gateway.placement_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_returns_configured_failure() {
        let gateway = MockGateway::new();
        gateway.set_next_place_result(Err(GatewayError::new("venue rejected")));

        let result = gateway.place_orders(&btc(), &[sample_order()]).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_log_gateway_always_succeeds() {
        let gateway = LogGateway;
        let slots = vec![SlotId::derive(&btc(), 0)];
        assert!(gateway.cancel_slots(&btc(), &slots).await.is_ok());
        assert!(gateway.place_orders(&btc(), &[sample_order()]).await.is_ok());
    }
}
