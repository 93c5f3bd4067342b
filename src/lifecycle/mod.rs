//! Listener lifecycle subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (registrar.rs, once):
//!     ResolvedEventConfig × 4 → skip if ignored → EventSource::on
//!
//! Dispatch (registrar.rs, per fault):
//!     handler or default log line → contain handler failure → exit decision
//!
//! Exit (exit.rs):
//!     exit decision → ExitFn(1)
//! ```

pub mod exit;
pub mod registrar;

pub use exit::{process_exit, ExitFn, FAULT_EXIT_CODE};
pub use registrar::{register, register_all};
