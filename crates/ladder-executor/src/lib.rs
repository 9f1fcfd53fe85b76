//! Order submission interface.
//!
//! Turns a [`ladder_quote::QuoteLadder`] into a venue-ready plan: stable
//! per-slot identifiers, notional converted to base-asset quantity, and
//! venue precision applied. The transport itself sits behind the
//! [`OrderGateway`] trait; this crate ships a logging paper gateway and a
//! recording mock, nothing that touches the network.

pub mod error;
pub mod gateway;
pub mod plan;

pub use error::{GatewayError, GatewayResult};
pub use gateway::{BoxFuture, DynOrderGateway, LogGateway, MockGateway, OrderGateway};
pub use plan::{ladder_slots, LadderOrder, LadderPlan};
