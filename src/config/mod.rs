//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → FaultSettings → FaultConfig::from_settings
//!
//! FaultConfig (handlers, logger, context injected in code)
//!     → resolve.rs (per-kind override wins over global)
//!     → one ResolvedEventConfig per event kind
//! ```
//!
//! # Design Decisions
//! - Resolved once at registration; no live reconfiguration
//! - Absent values fall through to the global ones, explicit `false` does not
//! - `ignore`, `logger` and `verbose` are not merged: the first is per-kind, the others global

pub mod loader;
pub mod resolve;
pub mod schema;

pub use loader::load_settings;
pub use resolve::{coalesce, resolve_all, ResolvedEventConfig};
pub use schema::{Context, EventOverride, EventSettings, FaultConfig, FaultSettings};
