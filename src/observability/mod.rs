//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! fault listeners
//!     → logging.rs (FaultLogger::error)
//!     → TracingLogger (default) → tracing subscriber → stderr
//!
//! process-wide source diagnostics
//!     → tracing macros directly
//! ```

pub mod logging;

pub use logging::{init_logging, FaultLogger, SharedLogger, TracingLogger};
