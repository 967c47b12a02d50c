//! Settings loading from configuration files.
//!
//! This module loads [`Settings`] from TOML or JSON documents and applies
//! environment variable overrides. Documents may be partial: any key they
//! leave out keeps its default value.
//!
//! ## Loading Order
//!
//! 1. Start with default settings.
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `FORMKIT_DEBUG` | `debug` |
//! | `FORMKIT_LOG_LEVEL` | `log_level` |
//! | `FORMKIT_MOUNT_SELECTOR` | `mount_selector` |
//! | `FORMKIT_SUBMIT_LABEL` | `submit_label` |
//! | `FORMKIT_TOAST_ID` | `toast_id` |
//! | `FORMKIT_TOAST_SHOW_CLASS` | `toast_show_class` |
//! | `FORMKIT_TOAST_HIDE_AFTER_MS` | `toast_hide_after_ms` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use formkit_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file("formkit.toml").unwrap();
//! let settings = settings_loader::from_file_with_env("formkit.json").unwrap();
//! ```

use std::path::Path;

use crate::error::FormkitError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is malformed or cannot be deserialized.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, FormkitError> {
    // Merge through serde_json so that keys missing from the document keep
    // their defaults.
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| FormkitError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    merge_over_defaults(toml_to_json(toml_value), "TOML")
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, FormkitError> {
    from_toml_str(&read_config(path.as_ref(), "TOML")?)
}

/// Loads settings from a JSON string.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or cannot be deserialized.
pub fn from_json_str(json_str: &str) -> Result<Settings, FormkitError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| FormkitError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;

    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<Settings, FormkitError> {
    from_json_str(&read_config(path.as_ref(), "JSON")?)
}

/// Loads settings from a file, picking the format from its extension.
///
/// Files ending in `.json` are read as JSON; everything else is read as TOML.
pub fn from_file(path: impl AsRef<Path>) -> Result<Settings, FormkitError> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        from_json_file(path)
    } else {
        from_toml_file(path)
    }
}

/// Loads settings from a file and then applies environment variable overrides.
pub fn from_file_with_env(path: impl AsRef<Path>) -> Result<Settings, FormkitError> {
    let mut settings = from_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
///
/// `FORMKIT_DEBUG` accepts "true"/"1"/"yes" as true and anything else as
/// false. An unparsable `FORMKIT_TOAST_HIDE_AFTER_MS` is ignored.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("FORMKIT_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Ok(val) = std::env::var("FORMKIT_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("FORMKIT_MOUNT_SELECTOR") {
        settings.mount_selector = val;
    }

    if let Ok(val) = std::env::var("FORMKIT_SUBMIT_LABEL") {
        settings.submit_label = val;
    }

    if let Ok(val) = std::env::var("FORMKIT_TOAST_ID") {
        settings.toast_id = val;
    }

    if let Ok(val) = std::env::var("FORMKIT_TOAST_SHOW_CLASS") {
        settings.toast_show_class = val;
    }

    if let Ok(val) = std::env::var("FORMKIT_TOAST_HIDE_AFTER_MS") {
        if let Ok(ms) = val.parse::<u64>() {
            settings.toast_hide_after_ms = ms;
        }
    }
}

// ============================================================
// Helpers
// ============================================================

fn read_config(path: &Path, format: &str) -> Result<String, FormkitError> {
    std::fs::read_to_string(path).map_err(|e| {
        FormkitError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

fn merge_over_defaults(
    value: serde_json::Value,
    format: &str,
) -> Result<Settings, FormkitError> {
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        FormkitError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let merged = merge_json(default_json, value);
    serde_json::from_value(merged).map_err(|e| {
        FormkitError::ConfigurationError(format!(
            "Failed to deserialize settings from {format}: {e}"
        ))
    })
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}
