//! # breakgate-logging
//!
//! Logging for the breakgate pre-commit gate.
//!
//! ## Key Types
//!
//! - [`Logger`] - Renders gate events to stderr
//! - [`LogEvent`] - One event per pipeline stage
//! - [`LogFormat`] - Output formats (Pretty, JSON, Compact)
//!
//! Stdout is never written here; it belongs to the checker's forwarded output.

mod events;

pub use events::{progress_enabled, LogEvent, LogFormat, Logger};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing for the application
pub fn init_tracing(level: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogFormat::Pretty | LogFormat::Compact => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
                .init();
        }
    }
}
