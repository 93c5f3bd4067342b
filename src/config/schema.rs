//! Configuration schema definitions.
//!
//! `FaultConfig` is the in-code configuration: it carries handlers, the logger and the
//! injected collaborators. `FaultSettings` is its data-only subset, deserializable from
//! TOML, and lifts into a `FaultConfig` with [`FaultConfig::from_settings`].

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::events::{EventKind, EventSource, ProcessEvents};
use crate::handler::SharedHandler;
use crate::lifecycle::exit::{process_exit, ExitFn};
use crate::observability::{SharedLogger, TracingLogger};

/// Root configuration passed to [`unhandled`](crate::unhandled).
#[derive(Clone)]
pub struct FaultConfig {
    /// Fallback handler for every kind without its own.
    pub handler: Option<SharedHandler>,

    /// Destination for fault lines. `None` drops all output.
    pub logger: Option<SharedLogger>,

    /// Emit trace lines for setup, dispatch and exit decisions.
    pub verbose: bool,

    /// Default for whether to exit after a fault.
    pub exit: Option<bool>,

    /// Override for `uncaughtException`.
    pub exception: EventOverride,

    /// Override for `unhandledRejection`.
    pub rejection: EventOverride,

    /// Override for `SIGINT`.
    pub sigint: EventOverride,

    /// Override for `SIGTERM`.
    pub sigterm: EventOverride,

    /// Injected event source and exit capability.
    pub context: Context,
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            handler: None,
            logger: Some(Arc::new(TracingLogger)),
            verbose: false,
            exit: None,
            exception: EventOverride::default(),
            rejection: EventOverride::default(),
            sigint: EventOverride::default(),
            sigterm: EventOverride::default(),
            context: Context::default(),
        }
    }
}

impl FaultConfig {
    /// Build a config from file settings, keeping the default logger and context.
    pub fn from_settings(settings: &FaultSettings) -> Self {
        Self {
            verbose: settings.verbose,
            exit: settings.exit,
            exception: settings.exception.into(),
            rejection: settings.rejection.into(),
            sigint: settings.sigint.into(),
            sigterm: settings.sigterm.into(),
            ..Self::default()
        }
    }

    /// The override block for `kind`.
    pub fn override_for(&self, kind: EventKind) -> &EventOverride {
        match kind {
            EventKind::Exception => &self.exception,
            EventKind::Rejection => &self.rejection,
            EventKind::Sigint => &self.sigint,
            EventKind::Sigterm => &self.sigterm,
        }
    }
}

impl fmt::Debug for FaultConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaultConfig")
            .field("handler", &self.handler.is_some())
            .field("logger", &self.logger.is_some())
            .field("verbose", &self.verbose)
            .field("exit", &self.exit)
            .field("exception", &self.exception)
            .field("rejection", &self.rejection)
            .field("sigint", &self.sigint)
            .field("sigterm", &self.sigterm)
            .finish_non_exhaustive()
    }
}

/// Per-kind override block.
#[derive(Clone, Default)]
pub struct EventOverride {
    /// Handler for this kind only.
    pub handler: Option<SharedHandler>,

    /// Whether to exit after this kind, overriding the global flag.
    pub exit: Option<bool>,

    /// Register no listener for this kind.
    pub ignore: bool,
}

impl fmt::Debug for EventOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventOverride")
            .field("handler", &self.handler.is_some())
            .field("exit", &self.exit)
            .field("ignore", &self.ignore)
            .finish()
    }
}

impl From<EventSettings> for EventOverride {
    fn from(settings: EventSettings) -> Self {
        Self {
            handler: None,
            exit: settings.exit,
            ignore: settings.ignore,
        }
    }
}

/// Collaborators the listeners are wired to.
#[derive(Clone)]
pub struct Context {
    /// Where listeners subscribe.
    pub events: Arc<dyn EventSource>,

    /// Called with the exit code when exiting is configured. `None` never exits.
    pub exit: Option<ExitFn>,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            events: ProcessEvents::global(),
            exit: Some(process_exit()),
        }
    }
}

/// Data-only settings, as read from a config file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FaultSettings {
    pub verbose: bool,
    pub exit: Option<bool>,
    pub exception: EventSettings,
    pub rejection: EventSettings,
    pub sigint: EventSettings,
    pub sigterm: EventSettings,
}

/// Data-only per-kind settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct EventSettings {
    pub exit: Option<bool>,
    pub ignore: bool,
}
