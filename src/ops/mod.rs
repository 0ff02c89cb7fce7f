// * Operations
// * Logging setup shared by the binary and the integration tests.

pub mod telemetry;

pub use telemetry::{env_filter, init_tracing, init_tracing_with, LogFormat, DEFAULT_FILTER};
