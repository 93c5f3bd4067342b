//! Process exit capability.

use std::sync::Arc;

/// Exit code used after a fault when exiting is configured.
pub const FAULT_EXIT_CODE: i32 = 1;

/// Terminates (or pretends to terminate) the process with a code.
pub type ExitFn = Arc<dyn Fn(i32) + Send + Sync + 'static>;

/// The real thing: `std::process::exit`.
pub fn process_exit() -> ExitFn {
    Arc::new(|code: i32| {
        tracing::debug!(code, "Exiting process");
        std::process::exit(code)
    })
}
