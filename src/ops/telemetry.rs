// * Telemetry
// * Structured logging for the run. JSON lines by default, pretty output for local use.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "course_sweep=info,warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Builds the filter, letting `RUST_LOG` win over `fallback`.
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Initializes JSON tracing with the default filter.
pub fn init_tracing() {
    init_tracing_with(LogFormat::Json, DEFAULT_FILTER);
}

/// Initializes tracing with an explicit format and fallback filter.
///
/// A second call is a no-op so tests and embedders can call it freely.
pub fn init_tracing_with(format: LogFormat, fallback: &str) {
    let registry = tracing_subscriber::registry().with(env_filter(fallback));

    let _ = match format {
        LogFormat::Json => registry.with(fmt::layer().json().with_target(false)).try_init(),
        LogFormat::Pretty => registry.with(fmt::layer().pretty()).try_init(),
    };
}
