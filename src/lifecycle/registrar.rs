//! Listener registration and fault dispatch.
//!
//! # Responsibilities
//! - Subscribe one listener per non-ignored event kind, in fixed order
//! - Route each fault to the handler, or to the default log line
//! - Contain handler failures and apply the exit decision
//!
//! # Design Decisions
//! - Handler failures (`Err` or panic) are logged and swallowed; the exit decision still runs
//! - Exit happens only on an explicit `true`, once per fault occurrence
//! - Listeners keep no state between occurrences, so reentrant dispatch is safe

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::config::ResolvedEventConfig;
use crate::error::HandlerError;
use crate::events::process::{payload_message, run_contained};
use crate::events::{EventKind, FaultError, FaultEvent};
use crate::handler::SharedHandler;
use crate::lifecycle::exit::{ExitFn, FAULT_EXIT_CODE};
use crate::observability::logging::{log_error, SharedLogger};

/// Register listeners for every resolved kind, in order.
pub fn register_all(resolved: Vec<ResolvedEventConfig>) {
    for config in resolved {
        register(config);
    }
}

/// Register the listener for one kind, unless it is ignored.
pub fn register(config: ResolvedEventConfig) {
    let dispatcher = Dispatcher::from(&config);

    if config.ignore {
        dispatcher.trace(&format!("Ignoring event \"{}\"", config.kind));
        return;
    }

    dispatcher.trace(&format!("Setting up listener for event \"{}\"", config.kind));
    let dispatcher = Arc::new(dispatcher);
    config.events.on(
        config.kind,
        Arc::new(move |error: Option<FaultError>| dispatcher.dispatch(error)),
    );
}

/// What a subscribed listener needs. Holds no reference to the event source.
struct Dispatcher {
    kind: EventKind,
    message: &'static str,
    logger: Option<SharedLogger>,
    verbose: bool,
    handler: Option<SharedHandler>,
    exit_fn: Option<ExitFn>,
    should_exit: bool,
}

impl From<&ResolvedEventConfig> for Dispatcher {
    fn from(config: &ResolvedEventConfig) -> Self {
        Self {
            kind: config.kind,
            message: config.message,
            logger: config.logger.clone(),
            verbose: config.verbose,
            handler: config.handler.clone(),
            exit_fn: config.exit_fn.clone(),
            should_exit: config.should_exit(),
        }
    }
}

impl Dispatcher {
    fn log(&self, message: &str, error: Option<&FaultError>) {
        log_error(self.logger.as_ref(), message, error);
    }

    fn trace(&self, message: &str) {
        if self.verbose {
            self.log(message, None);
        }
    }

    fn dispatch(&self, error: Option<FaultError>) {
        match &self.handler {
            None => match &error {
                Some(error) => self.log(&format!("{} :", self.message), Some(error)),
                None => self.log(self.message, None),
            },
            Some(handler) => {
                self.trace(&format!("Passing event \"{}\" to handler.", self.kind));
                let event = FaultEvent {
                    kind: self.kind,
                    error,
                };
                if let Err(e) = run_handler(handler, &event) {
                    let e: FaultError = Arc::new(e);
                    self.log(
                        &format!("Error in handler for '{}' event :", self.kind),
                        Some(&e),
                    );
                }
            }
        }

        match &self.exit_fn {
            Some(exit) if self.should_exit => {
                self.trace(&format!("Exiting process with code {}", FAULT_EXIT_CODE));
                exit(FAULT_EXIT_CODE);
            }
            _ => self.trace("Not exiting process per config"),
        }
    }
}

fn run_handler(handler: &SharedHandler, event: &FaultEvent) -> Result<(), HandlerError> {
    run_contained(|| panic::catch_unwind(AssertUnwindSafe(|| handler.handle(event))))
        .unwrap_or_else(|payload| Err(HandlerError::Panicked(payload_message(payload.as_ref()))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{resolve_all, FaultConfig};
    use crate::events::{fault_error, EventBus};
    use crate::handler::from_fn;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn bus_config(bus: &EventBus) -> FaultConfig {
        let mut config = FaultConfig::default();
        config.logger = None;
        config.context.events = Arc::new(bus.clone());
        config.context.exit = None;
        config
    }

    #[test]
    fn test_ignored_kinds_get_no_listener() {
        let bus = EventBus::new();
        let mut config = bus_config(&bus);
        config.sigint.ignore = true;

        register_all(resolve_all(&config));

        assert_eq!(bus.listener_count(EventKind::Exception), 1);
        assert_eq!(bus.listener_count(EventKind::Rejection), 1);
        assert_eq!(bus.listener_count(EventKind::Sigint), 0);
        assert_eq!(bus.listener_count(EventKind::Sigterm), 1);
    }

    #[test]
    fn test_handler_receives_event() {
        let bus = EventBus::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        let mut config = bus_config(&bus);
        config.handler = Some(from_fn(move |event| {
            assert_eq!(event.kind, EventKind::Rejection);
            assert_eq!(event.error.as_ref().unwrap().to_string(), "rejected");
            c.fetch_add(1, Ordering::SeqCst);
        }));

        register_all(resolve_all(&config));
        bus.emit(EventKind::Rejection, Some(fault_error("rejected")));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panicking_handler_is_contained() {
        let handler: SharedHandler = from_fn(|_| panic!("handle-fail"));
        let event = FaultEvent {
            kind: EventKind::Sigint,
            error: None,
        };

        match run_handler(&handler, &event) {
            Err(HandlerError::Panicked(message)) => assert_eq!(message, "handle-fail"),
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_exit_without_exit_fn_is_noop() {
        let bus = EventBus::new();
        let mut config = bus_config(&bus);
        config.exit = Some(true);

        register_all(resolve_all(&config));
        assert!(bus.emit(EventKind::Sigterm, None));
    }
}
