//! Process-wide `tracing` subscriber for the server binary.

use chess_backend::config::server::LogFormat;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is unset: our own events at `info`, actix
/// request internals at `warn` since `StructuredLogger` already covers them.
const DEFAULT_FILTER: &str = "info,actix_web=warn,actix_server=info";

pub fn init_tracing(format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let base = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_ansi(false);

    // Boxed so both formats share one registry type.
    let layer = match format {
        LogFormat::Json => base.json().flatten_event(true).boxed(),
        LogFormat::Text => base.compact().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layer)
        .init();
}
