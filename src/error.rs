//! Error types shared across the crate.

use thiserror::Error;

/// Errors raised while loading fault settings from disk.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid TOML for [`FaultSettings`](crate::config::FaultSettings).
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failure reported by a user-supplied fault handler.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// The handler returned an error.
    #[error("{0}")]
    Failed(String),

    /// The handler panicked while running.
    #[error("handler panicked: {0}")]
    Panicked(String),
}

impl HandlerError {
    /// Build a failure from anything printable.
    pub fn msg(message: impl std::fmt::Display) -> Self {
        Self::Failed(message.to_string())
    }
}

/// A panic observed by the process-wide panic hook.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct PanicError {
    /// Panic payload rendered as text.
    pub message: String,
    /// `file:line:column` of the panic site, when known.
    pub location: Option<String>,
}

/// A background failure nobody was waiting on.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct RejectionError(pub String);

/// Result type for settings loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
