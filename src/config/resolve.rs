//! Per-kind configuration resolution.
//!
//! Merges the global settings with each kind's override block into one
//! [`ResolvedEventConfig`]. Resolution is pure and happens once, at registration.

use std::sync::Arc;

use crate::config::schema::FaultConfig;
use crate::events::{EventKind, EventSource};
use crate::handler::SharedHandler;
use crate::lifecycle::exit::ExitFn;
use crate::observability::SharedLogger;

/// First present value, in order. Explicit `false`/`0` counts as present.
pub fn coalesce<T, I>(candidates: I) -> Option<T>
where
    I: IntoIterator<Item = Option<T>>,
{
    candidates.into_iter().flatten().next()
}

/// Final settings for one event kind.
#[derive(Clone)]
pub struct ResolvedEventConfig {
    pub kind: EventKind,
    pub message: &'static str,
    pub logger: Option<SharedLogger>,
    pub verbose: bool,
    pub handler: Option<SharedHandler>,
    pub exit: Option<bool>,
    pub ignore: bool,
    pub events: Arc<dyn EventSource>,
    pub exit_fn: Option<ExitFn>,
}

impl ResolvedEventConfig {
    /// Exit only on an explicit `true`.
    pub fn should_exit(&self) -> bool {
        self.exit == Some(true) && self.exit_fn.is_some()
    }
}

/// Resolve the settings for a single kind.
pub fn resolve(config: &FaultConfig, kind: EventKind) -> ResolvedEventConfig {
    let overrides = config.override_for(kind);

    ResolvedEventConfig {
        kind,
        message: kind.display_message(),
        logger: config.logger.clone(),
        verbose: config.verbose,
        handler: coalesce([overrides.handler.clone(), config.handler.clone()]),
        exit: coalesce([overrides.exit, config.exit]),
        ignore: overrides.ignore,
        events: config.context.events.clone(),
        exit_fn: config.context.exit.clone(),
    }
}

/// Resolve every watched kind, in registration order.
pub fn resolve_all(config: &FaultConfig) -> Vec<ResolvedEventConfig> {
    EventKind::ALL
        .iter()
        .map(|&kind| resolve(config, kind))
        .collect()
}
