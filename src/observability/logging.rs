//! Fault log sink.
//!
//! # Responsibilities
//! - Define the logger capability fault listeners write to
//! - Provide the default `tracing`-backed logger
//! - Initialize the subscriber for binaries that want one
//!
//! # Design Decisions
//! - Every fault line and verbose trace goes through `FaultLogger::error`
//! - A missing logger is a silent no-op, not an error
//! - Default subscriber writes to stderr, filter overridable through `RUST_LOG`

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::events::FaultError;

/// Destination for fault lines and verbose traces.
pub trait FaultLogger: Send + Sync {
    /// Log `message`, followed by the accompanying error value when there is one.
    fn error(&self, message: &str, error: Option<&FaultError>);
}

/// Shared logger reference as stored in configuration.
pub type SharedLogger = Arc<dyn FaultLogger>;

/// Logs through `tracing::error!`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl FaultLogger for TracingLogger {
    fn error(&self, message: &str, error: Option<&FaultError>) {
        match error {
            Some(error) => tracing::error!(error = %error, "{}", message),
            None => tracing::error!("{}", message),
        }
    }
}

/// Log through `logger` if there is one.
pub fn log_error(logger: Option<&SharedLogger>, message: &str, error: Option<&FaultError>) {
    if let Some(logger) = logger {
        logger.error(message, error);
    }
}

/// Install a stderr fmt subscriber. `verbose` lowers the default filter to `debug`.
///
/// Keeps an already installed global subscriber.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "fault_watch=debug"
    } else {
        "fault_watch=info"
    };

    let installed = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    if let Err(e) = installed {
        tracing::debug!(error = %e, "Tracing subscriber already installed");
    }
}
