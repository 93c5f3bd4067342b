//! In-memory event source.

use std::sync::Arc;

use dashmap::DashMap;

use super::{EventKind, EventSource, FaultError, Listener};

/// A plain emitter: listeners subscribe with [`EventSource::on`] and run on [`EventBus::emit`].
#[derive(Clone, Default)]
pub struct EventBus {
    listeners: Arc<DashMap<EventKind, Vec<Listener>>>,
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every listener of `kind` with `error`. Returns whether any listener ran.
    pub fn emit(&self, kind: EventKind, error: Option<FaultError>) -> bool {
        // Snapshot so listeners can emit or subscribe without holding the shard lock.
        let snapshot: Vec<Listener> = match self.listeners.get(&kind) {
            Some(entry) => entry.value().clone(),
            None => return false,
        };

        for listener in &snapshot {
            listener(error.clone());
        }
        !snapshot.is_empty()
    }

    /// Number of listeners subscribed to `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map(|entry| entry.len()).unwrap_or(0)
    }
}

impl EventSource for EventBus {
    fn on(&self, kind: EventKind, listener: Listener) {
        self.listeners.entry(kind).or_default().push(listener);
    }
}
