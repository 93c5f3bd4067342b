//! Shared harness for listener integration tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use fault_watch::events::{fault_error, EventBus, FaultError};
use fault_watch::handler::{from_fn, SharedHandler};
use fault_watch::lifecycle::ExitFn;
use fault_watch::observability::{FaultLogger, SharedLogger};
use fault_watch::{unhandled, EventKind, FaultConfig};

/// One recorded `logger.error` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub message: String,
    pub error: Option<String>,
}

#[allow(dead_code)]
impl LogLine {
    pub fn bare(message: &str) -> Self {
        Self {
            message: message.to_string(),
            error: None,
        }
    }

    pub fn with_error(message: &str, error: &str) -> Self {
        Self {
            message: message.to_string(),
            error: Some(error.to_string()),
        }
    }
}

/// Logger that keeps every call.
#[derive(Default)]
pub struct RecordingLogger {
    lines: Mutex<Vec<LogLine>>,
}

#[allow(dead_code)]
impl RecordingLogger {
    pub fn lines(&self) -> Vec<LogLine> {
        self.lines.lock().unwrap().clone()
    }
}

impl FaultLogger for RecordingLogger {
    fn error(&self, message: &str, error: Option<&FaultError>) {
        self.lines.lock().unwrap().push(LogLine {
            message: message.to_string(),
            error: error.map(|e| e.to_string()),
        });
    }
}

/// An event bus wired to a recording logger and exit recorder.
pub struct Harness {
    pub bus: EventBus,
    logger: Arc<RecordingLogger>,
    exits: Arc<Mutex<Vec<i32>>>,
}

#[allow(dead_code)]
impl Harness {
    /// Register listeners with the harness collaborators, after `configure` adjusts the config.
    pub fn run(configure: impl FnOnce(&mut FaultConfig)) -> Self {
        let bus = EventBus::new();
        let logger = Arc::new(RecordingLogger::default());
        let exits = Arc::new(Mutex::new(Vec::new()));

        let mut config = FaultConfig::default();
        let shared: SharedLogger = logger.clone();
        config.logger = Some(shared);
        config.context.events = Arc::new(bus.clone());
        let recorder = exits.clone();
        let exit: ExitFn = Arc::new(move |code: i32| {
            recorder.lock().unwrap().push(code);
        });
        config.context.exit = Some(exit);
        configure(&mut config);

        unhandled(config);
        Self { bus, logger, exits }
    }

    pub fn do_reject(&self, error: &str) {
        self.bus.emit(EventKind::Rejection, Some(fault_error(error)));
    }

    pub fn do_throw(&self, error: &str) {
        self.bus.emit(EventKind::Exception, Some(fault_error(error)));
    }

    pub fn do_sigint(&self) {
        self.bus.emit(EventKind::Sigint, None);
    }

    pub fn do_sigterm(&self) {
        self.bus.emit(EventKind::Sigterm, None);
    }

    /// Trigger all four kinds: rejection, exception, SIGINT, SIGTERM.
    pub fn do_all(&self) {
        self.do_reject("rejected");
        self.do_throw("excepted");
        self.do_sigint();
        self.do_sigterm();
    }

    pub fn logs(&self) -> Vec<LogLine> {
        self.logger.lines()
    }

    pub fn exit_calls(&self) -> Vec<i32> {
        self.exits.lock().unwrap().clone()
    }
}

/// Counts labelled occurrences.
#[derive(Clone, Default)]
pub struct Meter {
    counts: Arc<Mutex<HashMap<String, usize>>>,
}

#[allow(dead_code)]
impl Meter {
    pub fn add(&self, key: impl Into<String>) {
        *self.counts.lock().unwrap().entry(key.into()).or_default() += 1;
    }

    pub fn get(&self, key: &str) -> usize {
        self.counts.lock().unwrap().get(key).copied().unwrap_or(0)
    }

    pub fn clear(&self) {
        self.counts.lock().unwrap().clear();
    }

    /// Handler recording `<label>:<kind>:<error or none>`.
    pub fn handler(&self, label: &'static str) -> SharedHandler {
        let meter = self.clone();
        from_fn(move |event| {
            let error = event
                .error
                .as_ref()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "none".to_string());
            meter.add(format!("{}:{}:{}", label, event.kind, error));
        })
    }
}
