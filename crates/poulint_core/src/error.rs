//! Driver error types.

use thiserror::Error;

/// Errors that can abort a lint run.
///
/// Only startup-class conditions surface here; per-file parse failures and
/// cache degradations are reflected as diagnostics, never as errors.
#[derive(Debug, Error)]
pub enum LintError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Check registration error.
    #[error("Registry error: {0}")]
    Registry(#[from] poulint_registry::RegistryError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LintError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
