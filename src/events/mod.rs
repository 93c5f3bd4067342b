//! Fault event sources.
//!
//! # Data Flow
//! ```text
//! panic hook / SIGINT / SIGTERM / report_rejection
//!     → process.rs (ProcessEvents, process-wide singleton)
//!     → EventSource::on listeners
//!
//! tests / embedding applications:
//!     EventBus::emit → EventSource::on listeners
//! ```
//!
//! # Design Decisions
//! - The event source is an injected capability, never reached through globals by the registrar
//! - Listeners are invoked synchronously on the dispatching thread
//! - Listener lists are snapshotted before dispatch so listeners may re-enter the source

pub mod bus;
pub mod process;

use std::error::Error;
use std::fmt;
use std::sync::Arc;

pub use bus::EventBus;
pub use process::{report_rejection, spawn_watched, ProcessEvents};

/// Error value carried by a fault event.
pub type FaultError = Arc<dyn Error + Send + Sync + 'static>;

/// Callback subscribed to an [`EventSource`] for one event kind.
pub type Listener = Arc<dyn Fn(Option<FaultError>) + Send + Sync + 'static>;

/// Build a [`FaultError`] from a plain message.
pub fn fault_error(message: impl Into<String>) -> FaultError {
    Arc::from(Box::<dyn Error + Send + Sync>::from(message.into()))
}

/// The watched process-level fault kinds, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A panic escaped to the panic hook.
    Exception,
    /// A background failure was reported with nobody awaiting it.
    Rejection,
    /// The process received SIGINT.
    Sigint,
    /// The process received SIGTERM.
    Sigterm,
}

impl EventKind {
    /// All kinds in the order listeners are registered.
    pub const ALL: [EventKind; 4] = [
        EventKind::Exception,
        EventKind::Rejection,
        EventKind::Sigint,
        EventKind::Sigterm,
    ];

    /// Event name used in log lines and handler payloads.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Exception => "uncaughtException",
            EventKind::Rejection => "unhandledRejection",
            EventKind::Sigint => "SIGINT",
            EventKind::Sigterm => "SIGTERM",
        }
    }

    /// Primary log message used when no handler is configured.
    pub fn display_message(self) -> &'static str {
        match self {
            EventKind::Exception => "Un-caught Exception",
            EventKind::Rejection => "Un-handled Promise Rejection",
            EventKind::Sigint => "SIGINT Received",
            EventKind::Sigterm => "SIGTERM Received",
        }
    }

    /// Whether this kind is delivered by an OS signal.
    pub fn is_signal(self) -> bool {
        matches!(self, EventKind::Sigint | EventKind::Sigterm)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload handed to a fault handler.
#[derive(Debug, Clone)]
pub struct FaultEvent {
    pub kind: EventKind,
    pub error: Option<FaultError>,
}

/// A source of fault events listeners can subscribe to.
pub trait EventSource: Send + Sync {
    /// Subscribe `listener` to every future occurrence of `kind`.
    fn on(&self, kind: EventKind, listener: Listener);
}
