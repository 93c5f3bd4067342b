//! Process fault listeners.
//!
//! Routes process-level fault events (panics, unhandled background failures, SIGINT and
//! SIGTERM) to logging or user handlers, optionally exiting afterwards.
//!
//! ```no_run
//! use fault_watch::{unhandled, FaultConfig};
//!
//! unhandled(FaultConfig {
//!     exit: Some(true),
//!     ..FaultConfig::default()
//! });
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod handler;
pub mod lifecycle;
pub mod observability;

pub use config::{EventOverride, FaultConfig, FaultSettings};
pub use error::{ConfigError, HandlerError};
pub use events::{EventKind, FaultError, FaultEvent};
pub use handler::FaultHandler;

/// Resolve `config` and subscribe the fault listeners it asks for.
pub fn unhandled(config: FaultConfig) {
    lifecycle::register_all(config::resolve_all(&config));
}
