//! Plugin discovery and registration.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use poulint_registry::CheckRegistry;

use crate::{LoadedCheck, PackageManifest, PluginError};

/// File name marking a directory as one loadable plugin package.
pub const PACKAGE_MANIFEST: &str = "poulint-plugin.json";

/// Loads every plugin reachable from the given paths and registers its
/// checks.
///
/// Runs once at startup, before the registry is listed or run. Per path,
/// recursively: a `.wasm` file loads as one module; a directory containing
/// a [`PACKAGE_MANIFEST`] file loads as one unit (exactly the modules the
/// manifest names); any other directory is recursed; entries that are not
/// WASM modules are ignored. Every failure is fatal - a missing path, an
/// unloadable module, a bad manifest, or a code collision aborts startup.
///
/// Returns the number of checks registered.
pub fn load_paths(paths: &[impl AsRef<Path>], registry: &mut CheckRegistry) -> Result<usize, PluginError> {
    let mut count = 0;
    for path in paths {
        count += load_path(path.as_ref(), registry)?;
    }
    if count > 0 {
        info!("Registered {count} plugin check(s)");
    }
    Ok(count)
}

fn load_path(path: &Path, registry: &mut CheckRegistry) -> Result<usize, PluginError> {
    if path.is_file() {
        if path.extension().is_some_and(|ext| ext == "wasm") {
            load_module(path, registry)
        } else {
            debug!("Ignoring non-module entry {}", path.display());
            Ok(0)
        }
    } else if path.is_dir() {
        let manifest_path = path.join(PACKAGE_MANIFEST);
        if manifest_path.is_file() {
            load_package(path, &manifest_path, registry)
        } else {
            let mut entries: Vec<_> = fs::read_dir(path)?
                .collect::<Result<Vec<_>, _>>()?
                .into_iter()
                .map(|e| e.path())
                .collect();
            entries.sort();

            let mut count = 0;
            for entry in entries {
                count += load_path(&entry, registry)?;
            }
            Ok(count)
        }
    } else {
        Err(PluginError::load(format!(
            "plugin path not found: {}",
            path.display()
        )))
    }
}

fn load_package(
    dir: &Path,
    manifest_path: &Path,
    registry: &mut CheckRegistry,
) -> Result<usize, PluginError> {
    let content = fs::read_to_string(manifest_path)?;
    let package: PackageManifest = serde_json::from_str(&content)
        .map_err(|e| PluginError::invalid_manifest(format!("{}: {}", manifest_path.display(), e)))?;

    if let Some(name) = &package.name {
        info!("Loading plugin package '{name}'");
    }

    let mut count = 0;
    for module in &package.modules {
        count += load_module(&dir.join(module), registry)?;
    }
    Ok(count)
}

fn load_module(path: &Path, registry: &mut CheckRegistry) -> Result<usize, PluginError> {
    let loaded = LoadedCheck::load(path)?;
    let manifest = loaded.manifest.clone();
    registry.register(
        manifest.code,
        manifest.name,
        manifest.doc,
        loaded.into_callback(),
    )?;
    Ok(1)
}
