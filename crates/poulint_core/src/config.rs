//! Lint driver configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use jsonschema::Validator;
use serde::{Deserialize, Serialize};

use crate::LintError;

// Embed the schema
const SCHEMA_JSON: &str = include_str!("../../../schemas/v1/config.json");
static CONFIG_SCHEMA: OnceLock<Validator> = OnceLock::new();

/// Configuration for a lint run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintConfig {
    /// Glob patterns selecting source files, relative to `root_dir`.
    #[serde(default)]
    pub include: Vec<String>,

    /// Glob patterns removing files from the selection.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Directory the include patterns are resolved against.
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Whether parse results are persisted across runs.
    #[serde(default = "default_cache")]
    pub cache: bool,

    /// Directory holding persisted parse results.
    #[serde(default = "default_cache_dir")]
    pub cache_dir: String,

    /// Plugin files or directories loaded at startup.
    #[serde(default)]
    pub plugins: Vec<PathBuf>,

    /// Collapse duplicate logical units in the summary.
    #[serde(default)]
    pub squash: bool,
}

fn default_root_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_cache() -> bool {
    true
}

fn default_cache_dir() -> String {
    ".poulint-cache".to_string()
}

impl LintConfig {
    /// Config file names probed by [`discover`](LintConfig::discover).
    pub const CONFIG_FILES: [&'static str; 1] = [".poulint.json"];

    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            include: Vec::new(),
            exclude: Vec::new(),
            root_dir: default_root_dir(),
            cache: true,
            cache_dir: default_cache_dir(),
            plugins: Vec::new(),
            squash: false,
        }
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LintError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| LintError::config(format!("Failed to read config: {}", e)))?;

        Self::from_json(&content)
    }

    /// Parses configuration from a JSON string with schema validation.
    pub fn from_json(json: &str) -> Result<Self, LintError> {
        // Parse into Value first for validation
        let value: serde_json::Value = serde_json::from_str(json)
            .map_err(|e| LintError::config(format!("Invalid JSON: {}", e)))?;

        let schema = CONFIG_SCHEMA.get_or_init(|| {
            let schema_json: serde_json::Value =
                serde_json::from_str(SCHEMA_JSON).expect("Invalid embedded config schema");
            Validator::new(&schema_json).expect("Invalid config schema compilation")
        });

        if let Err(e) = schema.validate(&value) {
            return Err(LintError::config(format!(
                "Config validation failed: {} at {}",
                e,
                e.instance_path()
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| LintError::config(format!("Invalid config: {}", e)))
    }

    /// Looks for a config file in `dir`.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }
}

impl Default for LintConfig {
    fn default() -> Self {
        Self::new()
    }
}
