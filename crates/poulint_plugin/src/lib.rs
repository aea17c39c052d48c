//! # poulint_plugin
//!
//! WASM check plugins for poulint.
//!
//! Checks beyond the builtin set are distributed as WASM modules and run
//! sandboxed through Extism. A module exports two functions:
//!
//! - `manifest`: returns a JSON [`CheckManifest`] (code, name, doc,
//!   version)
//! - `check`: receives a JSON object `{"summary": ..., "settings": ...}`
//!   and returns `{"issues": [...]}`
//!
//! [`load_paths`] walks the configured plugin paths once at startup and
//! registers every discovered module into the shared
//! [`CheckRegistry`](poulint_registry::CheckRegistry). Loading is a
//! fail-fatal phase: a module that cannot be loaded, a malformed manifest,
//! or a code collision aborts startup, because a half-registered check set
//! would produce misleading clean results.

mod error;
mod executor;
mod loader;
mod manifest;

pub use error::PluginError;
pub use executor::LoadedCheck;
pub use loader::{PACKAGE_MANIFEST, load_paths};
pub use manifest::{CheckManifest, PackageManifest};
