//! Process-wide fault source.
//!
//! # Responsibilities
//! - Forward panics to `uncaughtException` listeners via the panic hook
//! - Forward SIGINT/SIGTERM to signal listeners
//! - Accept background failure reports as `unhandledRejection`
//!
//! # Design Decisions
//! - Singleton: the panic hook and signal dispositions are process-global
//! - Hooks are installed lazily, on the first subscription of the matching kind
//! - Without exception listeners the previously installed panic hook keeps running; with
//!   listeners it is replaced, so the default panic message is no longer printed
//! - Panics raised by a fault handler are contained by the listener, never forwarded

use std::any::Any;
use std::cell::Cell;
use std::error::Error;
use std::future::Future;
use std::panic;
use std::sync::{Arc, Once, OnceLock};

use dashmap::DashSet;
use tokio::task::JoinHandle;

use super::{EventBus, EventKind, EventSource, FaultError, Listener};
use crate::error::PanicError;

static PROCESS: OnceLock<Arc<ProcessEvents>> = OnceLock::new();

thread_local! {
    static IN_HANDLER: Cell<bool> = const { Cell::new(false) };
}

/// Run `f` with the panic hook muted on this thread. `f` must not unwind.
pub(crate) fn run_contained<R>(f: impl FnOnce() -> R) -> R {
    let outer = IN_HANDLER.with(|flag| flag.replace(true));
    let result = f();
    IN_HANDLER.with(|flag| flag.set(outer));
    result
}

fn in_handler() -> bool {
    IN_HANDLER.with(|flag| flag.get())
}

/// The process-wide fault event source.
pub struct ProcessEvents {
    bus: EventBus,
    panic_hook: Once,
    watched_signals: DashSet<EventKind>,
}

impl ProcessEvents {
    /// Shared handle to the process-wide source.
    pub fn global() -> Arc<ProcessEvents> {
        PROCESS
            .get_or_init(|| {
                Arc::new(ProcessEvents {
                    bus: EventBus::new(),
                    panic_hook: Once::new(),
                    watched_signals: DashSet::new(),
                })
            })
            .clone()
    }

    /// Dispatch a rejection to the subscribed listeners.
    pub fn reject(&self, error: FaultError) -> bool {
        let delivered = self.bus.emit(EventKind::Rejection, Some(error.clone()));
        if !delivered {
            tracing::warn!(error = %error, "Unhandled rejection with no listener");
        }
        delivered
    }

    fn install_panic_hook(&self) {
        self.panic_hook.call_once(|| {
            let bus = self.bus.clone();
            let previous = panic::take_hook();
            panic::set_hook(Box::new(move |info| {
                if in_handler() {
                    return;
                }
                if bus.listener_count(EventKind::Exception) == 0 {
                    previous(info);
                    return;
                }
                let error: FaultError = Arc::new(PanicError {
                    message: payload_message(info.payload()),
                    location: info.location().map(|loc| loc.to_string()),
                });
                bus.emit(EventKind::Exception, Some(error));
            }));
            tracing::debug!("Panic hook installed");
        });
    }

    #[cfg(unix)]
    fn watch_signal(&self, kind: EventKind) {
        use signal_hook::consts::{SIGINT, SIGTERM};
        use signal_hook::iterator::Signals;

        let signal = match kind {
            EventKind::Sigint => SIGINT,
            EventKind::Sigterm => SIGTERM,
            _ => return,
        };
        if !self.watched_signals.insert(kind) {
            return;
        }

        let mut signals = match Signals::new([signal]) {
            Ok(signals) => signals,
            Err(e) => {
                tracing::warn!(signal = %kind, error = %e, "Failed to register signal handler");
                return;
            }
        };

        let bus = self.bus.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("fault-watch-{}", kind))
            .spawn(move || {
                for _ in signals.forever() {
                    bus.emit(kind, None);
                }
            });
        match spawned {
            Ok(_) => tracing::debug!(signal = %kind, "Signal watcher started"),
            Err(e) => tracing::warn!(signal = %kind, error = %e, "Failed to start signal watcher"),
        }
    }

    #[cfg(not(unix))]
    fn watch_signal(&self, kind: EventKind) {
        if self.watched_signals.insert(kind) {
            tracing::warn!(signal = %kind, "Signal events are not supported on this platform");
        }
    }
}

impl EventSource for ProcessEvents {
    fn on(&self, kind: EventKind, listener: Listener) {
        self.bus.on(kind, listener);
        match kind {
            EventKind::Exception => self.install_panic_hook(),
            EventKind::Sigint | EventKind::Sigterm => self.watch_signal(kind),
            EventKind::Rejection => {}
        }
    }
}

/// Report a background failure nobody is awaiting as an `unhandledRejection`.
pub fn report_rejection(error: FaultError) -> bool {
    ProcessEvents::global().reject(error)
}

/// Spawn `future` on the current tokio runtime, reporting an `Err` outcome as a rejection.
///
/// Must be called from within a tokio runtime. A panic inside the task is not a rejection:
/// it reaches the panic hook as an `uncaughtException`, and the returned handle yields it
/// as a `JoinError`.
pub fn spawn_watched<F, T, E>(future: F) -> JoinHandle<()>
where
    F: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Error + Send + Sync + 'static,
{
    tokio::spawn(async move {
        if let Err(e) = future.await {
            report_rejection(Arc::new(e));
        }
    })
}

pub(crate) fn payload_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Box<dyn Any>".to_string()
    }
}
