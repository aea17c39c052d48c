//! Extism-based execution of check modules.

use std::path::Path;
use std::sync::Arc;

use extism::{Manifest, Plugin, Wasm};
use extism_manifest::MemoryOptions;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use poulint_ast::Summary;
use poulint_registry::{CheckCallback, LintIssue, Settings};

use crate::{CheckManifest, PluginError};

/// Memory limit for WASM instances (128 MB; a page is 64 KB).
const MEMORY_MAX_PAGES: u32 = 2048;

/// Execution timeout for a single plugin call.
const TIMEOUT_MS: u64 = 5000;

/// Request sent to a module's `check` export.
#[derive(Debug, Serialize)]
struct CheckRequest<'a> {
    /// The aggregated summary under lint.
    summary: &'a Summary,
    /// Opaque settings, passed unchanged.
    settings: &'a Settings,
}

/// Response from a module's `check` export.
#[derive(Debug, Deserialize)]
struct CheckResponse {
    /// Issues reported by the check.
    issues: Vec<LintIssue>,
}

/// One loaded check module.
///
/// The underlying Extism plugin requires `&mut` per call, so it lives
/// behind a mutex; [`into_callback`](LoadedCheck::into_callback) moves that
/// handle into a registry callback.
pub struct LoadedCheck {
    /// The module's self-reported metadata.
    pub manifest: CheckManifest,
    plugin: Arc<Mutex<Plugin>>,
}

impl LoadedCheck {
    /// Loads a module from a WASM file and reads its manifest.
    pub fn load(path: &Path) -> Result<Self, PluginError> {
        info!("Loading check module from {}", path.display());

        let wasm = Wasm::file(path);
        let manifest = Self::configure_manifest(Manifest::new([wasm]));

        let mut plugin = Plugin::new(&manifest, [], true)
            .map_err(|e| PluginError::load(format!("Failed to create plugin: {}", e)))?;

        let manifest_json: String = plugin
            .call("manifest", "")
            .map_err(|e| PluginError::call(format!("Failed to get manifest: {}", e)))?;

        let check_manifest: CheckManifest = serde_json::from_str(&manifest_json)
            .map_err(|e| PluginError::invalid_manifest(e.to_string()))?;

        debug!(
            "Loaded check {} ({} v{})",
            check_manifest.code, check_manifest.name, check_manifest.version
        );

        Ok(Self {
            manifest: check_manifest,
            plugin: Arc::new(Mutex::new(plugin)),
        })
    }

    /// Applies execution limits so a runaway module cannot stall or exhaust
    /// the host.
    fn configure_manifest(mut manifest: Manifest) -> Manifest {
        manifest.timeout_ms = Some(TIMEOUT_MS);
        manifest.memory = MemoryOptions {
            max_pages: Some(MEMORY_MAX_PAGES),
            max_http_response_bytes: None,
            max_var_bytes: None,
        };
        manifest
    }

    /// Converts the loaded module into a registry callback.
    ///
    /// The callback serializes the summary and settings per invocation and
    /// maps every module failure into an error the registry isolates as a
    /// synthetic issue.
    pub fn into_callback(self) -> CheckCallback {
        let code = self.manifest.code.clone();
        let plugin = self.plugin;

        Box::new(move |summary, settings| {
            let request = serde_json::to_string(&CheckRequest { summary, settings })?;

            let response: String = plugin
                .lock()
                .call("check", request.as_str())
                .map_err(|e| PluginError::call(format!("Check '{}' failed: {}", code, e)))?;

            let response: CheckResponse = serde_json::from_str(&response)
                .map_err(|e| PluginError::call(format!("Invalid response from '{}': {}", code, e)))?;

            Ok(response.issues)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_rejects_garbage_module() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.wasm");
        fs::write(&path, b"\x00asm not really wasm").unwrap();

        let result = LoadedCheck::load(&path);
        assert!(matches!(result, Err(PluginError::LoadError(_))));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempdir().unwrap();
        let result = LoadedCheck::load(&dir.path().join("absent.wasm"));
        assert!(result.is_err());
    }

    #[test]
    fn test_check_request_wire_shape() {
        let request = CheckRequest {
            summary: &Summary::default(),
            settings: &Settings::empty(),
        };
        let json = serde_json::to_value(&request).unwrap();

        assert!(json.get("summary").is_some());
        assert!(json.get("settings").is_some());
    }

    #[test]
    fn test_check_response_wire_shape() {
        let json = r#"{"issues": [{"code": "X101", "message": "finding", "severity": "warning"}]}"#;
        let response: CheckResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.issues.len(), 1);
        assert_eq!(response.issues[0].code, "X101");
    }
}
