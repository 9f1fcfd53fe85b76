//! Prometheus metrics and structured logging.
//!
//! Diagnostic telemetry is the engine's only output besides orders:
//! quote-cycle counters and latency, submission failures, and gauges for
//! the current signal readings per instrument.

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::Metrics;
