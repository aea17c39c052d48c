//! Plugin error types.

use thiserror::Error;

use poulint_registry::RegistryError;

/// Errors that can occur while loading or calling check plugins.
///
/// All load-time variants are fatal startup conditions.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Failed to load a WASM module.
    #[error("Failed to load plugin: {0}")]
    LoadError(String),

    /// Failed to call a plugin function.
    #[error("Plugin call failed: {0}")]
    CallError(String),

    /// The module's manifest could not be decoded.
    #[error("Invalid plugin manifest: {0}")]
    InvalidManifest(String),

    /// The plugin's check could not be registered.
    #[error("Check registration failed: {0}")]
    Registration(#[from] RegistryError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PluginError {
    /// Creates a load error.
    pub fn load(message: impl Into<String>) -> Self {
        Self::LoadError(message.into())
    }

    /// Creates a call error.
    pub fn call(message: impl Into<String>) -> Self {
        Self::CallError(message.into())
    }

    /// Creates an invalid manifest error.
    pub fn invalid_manifest(message: impl Into<String>) -> Self {
        Self::InvalidManifest(message.into())
    }
}
