//! Plugin manifest types.

use serde::{Deserialize, Serialize};

/// Metadata a check module reports from its `manifest` export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckManifest {
    /// Check code, e.g. `X101`; validated by the registry at registration.
    pub code: String,
    /// Human-readable check name.
    pub name: String,
    /// Documentation shown by the check listing.
    #[serde(default)]
    pub doc: String,
    /// Module version, for logging.
    pub version: String,
}

/// The `poulint-plugin.json` package manifest.
///
/// A directory carrying this file is loaded as one unit: exactly the
/// modules it names, resolved relative to the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Optional package name, for logging.
    #[serde(default)]
    pub name: Option<String>,
    /// WASM modules to load, relative to the package directory.
    pub modules: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_check_manifest_deserialization() {
        let json = r#"{"code": "X101", "name": "vendor-check", "doc": "Docs.", "version": "1.2.0"}"#;
        let manifest: CheckManifest = serde_json::from_str(json).unwrap();

        assert_eq!(manifest.code, "X101");
        assert_eq!(manifest.name, "vendor-check");
        assert_eq!(manifest.doc, "Docs.");
        assert_eq!(manifest.version, "1.2.0");
    }

    #[test]
    fn test_check_manifest_doc_is_optional() {
        let json = r#"{"code": "X101", "name": "vendor-check", "version": "1.0.0"}"#;
        let manifest: CheckManifest = serde_json::from_str(json).unwrap();
        assert!(manifest.doc.is_empty());
    }

    #[test]
    fn test_check_manifest_missing_code_fails() {
        let json = r#"{"name": "vendor-check", "version": "1.0.0"}"#;
        assert!(serde_json::from_str::<CheckManifest>(json).is_err());
    }

    #[test]
    fn test_package_manifest_deserialization() {
        let json = r#"{"name": "vendor-pack", "modules": ["a.wasm", "sub/b.wasm"]}"#;
        let manifest: PackageManifest = serde_json::from_str(json).unwrap();

        assert_eq!(manifest.name.as_deref(), Some("vendor-pack"));
        assert_eq!(manifest.modules, vec!["a.wasm", "sub/b.wasm"]);
    }

    #[test]
    fn test_package_manifest_name_is_optional() {
        let json = r#"{"modules": []}"#;
        let manifest: PackageManifest = serde_json::from_str(json).unwrap();
        assert!(manifest.name.is_none());
        assert!(manifest.modules.is_empty());
    }
}
