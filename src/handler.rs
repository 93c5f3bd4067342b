//! User-supplied fault handlers.

use std::fmt::Display;
use std::sync::Arc;

use crate::error::HandlerError;
use crate::events::FaultEvent;

/// Receives fault events in place of the default log line.
pub trait FaultHandler: Send + Sync {
    /// Handle one fault occurrence. An `Err` is logged and swallowed by the listener.
    fn handle(&self, event: &FaultEvent) -> Result<(), HandlerError>;
}

impl<F, E> FaultHandler for F
where
    F: Fn(&FaultEvent) -> Result<(), E> + Send + Sync,
    E: Display,
{
    fn handle(&self, event: &FaultEvent) -> Result<(), HandlerError> {
        self(event).map_err(HandlerError::msg)
    }
}

/// Shared handler reference as stored in configuration.
pub type SharedHandler = Arc<dyn FaultHandler>;

/// Wrap an infallible closure as a [`SharedHandler`].
pub fn from_fn<F>(f: F) -> SharedHandler
where
    F: Fn(&FaultEvent) + Send + Sync + 'static,
{
    Arc::new(move |event: &FaultEvent| -> Result<(), HandlerError> {
        f(event);
        Ok(())
    })
}
