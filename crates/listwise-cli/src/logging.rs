//! Tracing setup for the CLI.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding the log filter (e.g. `listwise_core=debug`).
pub const LOG_ENV: &str = "LISTWISE_LOG";

/// Installs a stderr subscriber. The guard must live until exit.
pub fn init() -> WorkerGuard {
    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());

    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true)
                .compact(),
        )
        .init();

    guard
}
