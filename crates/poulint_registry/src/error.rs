//! Registry error types.

use thiserror::Error;

/// Errors raised at check registration time.
///
/// Both variants are fatal startup conditions: a plugin or builtin check
/// with a malformed or already-taken code aborts the run before any file
/// is processed.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The check code does not match the required pattern.
    #[error("invalid check code '{0}': expected 1-3 uppercase letters followed by 1-4 digits")]
    InvalidCode(String),

    /// The check code is already registered.
    #[error("duplicate check code '{0}'")]
    DuplicateCode(String),
}
