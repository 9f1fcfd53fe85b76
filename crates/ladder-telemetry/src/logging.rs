//! Structured logging initialization.

use crate::error::TelemetryResult;
use tracing_subscriber::{fmt, EnvFilter};

/// Default directives: engine internals at debug, everything else at info.
const DEFAULT_FILTER: &str = "info,ladder_engine=debug,ladder_feed=debug,ladder_bot=debug";

/// Initialize structured logging.
///
/// Output is JSON when `RUST_ENV=production`, human-readable otherwise.
/// `RUST_LOG` overrides the default filter directives.
pub fn init_logging() -> TelemetryResult<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let production = std::env::var("RUST_ENV")
        .map(|v| v == "production")
        .unwrap_or(false);

    let builder = fmt().with_env_filter(filter);
    if production {
        builder
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .init();
    } else {
        builder.pretty().with_thread_names(true).init();
    }

    Ok(())
}
