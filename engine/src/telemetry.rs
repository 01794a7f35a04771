//! Telemetry and Observability
//!
//! Handles setting up `tracing-subscriber` for structured logging.
//! Diagnostics go to stderr so the console transcript on stdout stays
//! readable.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log level used when neither `RUST_LOG` nor `--log` is given
pub const DEFAULT_LOG_LEVEL: &str = "error";

/// Initialize the tracing subscriber with the given log level.
///
/// Priority: `RUST_LOG` env var > `log_level` parameter.
///
/// In debug builds: pretty-printed terminal output.
/// In release builds: JSON structured output with spans.
pub fn init_telemetry_with_level(log_level: &str) {
    let default_filter = format!("{},memprobe_engine={}", log_level, log_level);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    #[cfg(debug_assertions)]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .pretty()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .ok();
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .ok();
    }
}

/// Initialize the tracing subscriber at [`DEFAULT_LOG_LEVEL`].
pub fn init_telemetry() {
    init_telemetry_with_level(DEFAULT_LOG_LEVEL);
}
