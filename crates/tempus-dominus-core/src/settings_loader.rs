//! Settings loading from configuration files and the environment.
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
//! | `TEMPUS_DOMINUS_INCLUDE_ASSETS` | `include_assets` |
//! | `TEMPUS_DOMINUS_LOCALIZE` | `localize` |
//! | `TEMPUS_DOMINUS_DATE_FORMAT` | `date_format` |
//! | `TEMPUS_DOMINUS_DATETIME_FORMAT` | `datetime_format` |
//! | `TEMPUS_DOMINUS_TIME_FORMAT` | `time_format` |
//! | `TEMPUS_DOMINUS_DEFAULT_OPTIONS` | `default_options` (JSON object) |
//! | `TEMPUS_DOMINUS_DEBUG` | `debug` |
//! | `TEMPUS_DOMINUS_LOG_LEVEL` | `log_level` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use tempus_dominus_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("config/pickers.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::{TempusError, TempusResult};
use crate::settings::Settings;

/// Loads settings from a TOML string. Missing keys keep their defaults.
pub fn from_toml_str(toml_str: &str) -> TempusResult<Settings> {
    let table: toml::Table = toml_str
        .parse()
        .map_err(|e| TempusError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;
    settings_from_value(toml_to_json(toml::Value::Table(table)), "TOML")
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> TempusResult<Settings> {
    from_toml_str(&read_config(path.as_ref(), "TOML")?)
}

/// Loads settings from a TOML file and then applies environment overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> TempusResult<Settings> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string. Missing keys keep their defaults.
pub fn from_json_str(json_str: &str) -> TempusResult<Settings> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| TempusError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;
    settings_from_value(json_value, "JSON")
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> TempusResult<Settings> {
    from_json_str(&read_config(path.as_ref(), "JSON")?)
}

/// Loads settings from a JSON file and then applies environment overrides.
pub fn from_json_file_with_env(path: impl AsRef<Path>) -> TempusResult<Settings> {
    let mut settings = from_json_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a file, choosing the format by extension
/// (`.json` is JSON, anything else is TOML), then applies environment
/// overrides.
pub fn from_file_with_env(path: impl AsRef<Path>) -> TempusResult<Settings> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        from_json_file_with_env(path)
    } else {
        from_toml_file_with_env(path)
    }
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies `TEMPUS_DOMINUS_*` environment variable overrides.
pub fn apply_env_overrides(settings: &mut Settings) {
    apply_overrides_from(settings, |key| std::env::var(key).ok());
}

/// Applies overrides using `lookup` to resolve each variable name.
///
/// Boolean values `true`, `1` and `yes` (case-insensitive) are true and
/// anything else is false. A `TEMPUS_DOMINUS_DEFAULT_OPTIONS` value that is
/// not a JSON object is ignored.
pub fn apply_overrides_from<F>(settings: &mut Settings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("TEMPUS_DOMINUS_INCLUDE_ASSETS") {
        settings.include_assets = parse_bool(&val);
    }

    if let Some(val) = lookup("TEMPUS_DOMINUS_LOCALIZE") {
        settings.localize = parse_bool(&val);
    }

    if let Some(val) = lookup("TEMPUS_DOMINUS_DATE_FORMAT") {
        settings.date_format = val;
    }

    if let Some(val) = lookup("TEMPUS_DOMINUS_DATETIME_FORMAT") {
        settings.datetime_format = val;
    }

    if let Some(val) = lookup("TEMPUS_DOMINUS_TIME_FORMAT") {
        settings.time_format = val;
    }

    if let Some(val) = lookup("TEMPUS_DOMINUS_DEFAULT_OPTIONS") {
        match serde_json::from_str::<serde_json::Value>(&val) {
            Ok(serde_json::Value::Object(map)) => settings.default_options = map,
            Ok(_) => tracing::warn!(
                "Ignoring TEMPUS_DOMINUS_DEFAULT_OPTIONS: expected a JSON object"
            ),
            Err(e) => tracing::warn!("Ignoring TEMPUS_DOMINUS_DEFAULT_OPTIONS: {e}"),
        }
    }

    if let Some(val) = lookup("TEMPUS_DOMINUS_DEBUG") {
        settings.debug = parse_bool(&val);
    }

    if let Some(val) = lookup("TEMPUS_DOMINUS_LOG_LEVEL") {
        settings.log_level = val;
    }
}

// ============================================================
// Helpers
// ============================================================

fn parse_bool(val: &str) -> bool {
    matches!(val.trim().to_lowercase().as_str(), "true" | "1" | "yes")
}

fn read_config(path: &Path, kind: &str) -> TempusResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        TempusError::ConfigurationError(format!(
            "Failed to read {kind} file '{}': {e}",
            path.display()
        ))
    })
}

/// Builds settings from a parsed document. Absent keys take their defaults
/// and unknown keys are rejected, so a misspelled setting is an error rather
/// than silently ignored.
fn settings_from_value(value: serde_json::Value, kind: &str) -> TempusResult<Settings> {
    if !value.is_object() {
        return Err(TempusError::ConfigurationError(format!(
            "{kind} settings must be a table of keys, got {value}"
        )));
    }
    serde_json::from_value(value).map_err(|e| {
        TempusError::ConfigurationError(format!("Invalid settings in {kind}: {e}"))
    })
}

/// Converts a TOML document into JSON for `default_options`.
///
/// TOML dates and times become strings, so `minDate = 2024-01-01` reaches the
/// calendar as `"2024-01-01"`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(items) => items.into_iter().map(toml_to_json).collect(),
        toml::Value::Table(table) => serde_json::Value::Object(
            table.into_iter().map(|(k, v)| (k, toml_to_json(v))).collect(),
        ),
        scalar => serde_json::to_value(scalar).unwrap_or(serde_json::Value::Null),
    }
}
