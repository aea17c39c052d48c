//! Opaque settings consumed by checks.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde_json::Value;

use crate::Severity;

/// Configuration passed unchanged to every check.
///
/// The settings loader is outside this crate; the registry only requires an
/// immutable JSON value. The one shape the registry itself understands is
/// the optional top-level `checks` object, keyed by check code, whose
/// values follow the usual linter convention: a boolean (enable/disable), a
/// severity string (`"error"`, `"warning"`, `"info"`, or `"off"`), or an
/// arbitrary options object interpreted by the check alone.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Settings {
    value: Value,
}

impl Settings {
    /// Empty settings: every check enabled, no overrides.
    pub fn empty() -> Self {
        Self { value: Value::Null }
    }

    /// Wraps an already-loaded JSON value.
    pub fn from_value(value: Value) -> Self {
        Self { value }
    }

    /// Loads settings from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, std::io::Error> {
        let content = fs::read_to_string(path)?;
        let value = serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(Self { value })
    }

    /// The raw settings value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The raw per-check option, if configured.
    pub fn check_option(&self, code: &str) -> Option<&Value> {
        self.value.get("checks")?.get(code)
    }

    /// Whether a check is enabled. Unconfigured checks are enabled.
    pub fn is_enabled(&self, code: &str) -> bool {
        match self.check_option(code) {
            Some(Value::Bool(enabled)) => *enabled,
            Some(Value::String(s)) => s != "off",
            _ => true,
        }
    }

    /// Severity override for a check, if its option is a severity string.
    pub fn severity_override(&self, code: &str) -> Option<Severity> {
        match self.check_option(code) {
            Some(Value::String(s)) => Severity::parse(s),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_settings_enable_everything() {
        let settings = Settings::empty();
        assert!(settings.is_enabled("N001"));
        assert!(settings.severity_override("N001").is_none());
        assert!(settings.check_option("N001").is_none());
    }

    #[test]
    fn test_boolean_disables_check() {
        let settings = Settings::from_value(json!({"checks": {"N001": false, "D001": true}}));
        assert!(!settings.is_enabled("N001"));
        assert!(settings.is_enabled("D001"));
        assert!(settings.is_enabled("E001"));
    }

    #[test]
    fn test_off_string_disables_check() {
        let settings = Settings::from_value(json!({"checks": {"N001": "off"}}));
        assert!(!settings.is_enabled("N001"));
    }

    #[test]
    fn test_severity_string_overrides() {
        let settings = Settings::from_value(json!({"checks": {"N001": "info"}}));
        assert!(settings.is_enabled("N001"));
        assert_eq!(settings.severity_override("N001"), Some(Severity::Info));
    }

    #[test]
    fn test_options_object_enables_without_override() {
        let settings = Settings::from_value(json!({"checks": {"N001": {"prefix": "FB"}}}));
        assert!(settings.is_enabled("N001"));
        assert!(settings.severity_override("N001").is_none());
        assert_eq!(
            settings.check_option("N001").unwrap()["prefix"],
            json!("FB")
        );
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"checks": {"E001": false}}"#).unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert!(!settings.is_enabled("E001"));
    }

    #[test]
    fn test_from_file_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(Settings::from_file(&path).is_err());
    }
}
