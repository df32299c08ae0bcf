//! Process-wide configuration for the picker widgets.
//!
//! [`Settings`] replaces ad-hoc settings lookups with one explicit struct.
//! Widgets receive it at construction as an `Arc<Settings>`; [`SETTINGS`] is
//! a global, write-once instance for applications that prefer a single
//! configuration point.

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::error::{TempusError, TempusResult};

/// Default format for date-only pickers.
pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";
/// Default format for date and time pickers.
pub const DEFAULT_DATETIME_FORMAT: &str = "YYYY-MM-DD HH:mm:ss";
/// Default format for time-only pickers.
pub const DEFAULT_TIME_FORMAT: &str = "HH:mm:ss";

/// The complete set of widget settings.
///
/// # Examples
///
/// ```
/// use tempus_dominus_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.include_assets);
/// assert!(!settings.localize);
/// assert_eq!(settings.date_format, "YYYY-MM-DD");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    // ── Assets ───────────────────────────────────────────────────────

    /// Whether widgets declare the CDN assets in their media.
    pub include_assets: bool,

    // ── Formats ──────────────────────────────────────────────────────

    /// Prefer the calendar library's locale-aware format tokens.
    pub localize: bool,
    /// Display format for date-only pickers.
    pub date_format: String,
    /// Display format for date and time pickers.
    pub datetime_format: String,
    /// Display format for time-only pickers.
    pub time_format: String,

    // ── Calendar options ─────────────────────────────────────────────

    /// Options merged under every widget's own options.
    pub default_options: serde_json::Map<String, serde_json::Value>,

    // ── Logging ──────────────────────────────────────────────────────

    /// Pretty, human-readable logs when `true`; JSON logs otherwise.
    pub debug: bool,
    /// The log filter (e.g. "info", "`tempus_dominus_widgets=debug`").
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            include_assets: true,
            localize: false,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            default_options: serde_json::Map::new(),
            debug: true,
            log_level: "info".to_string(),
        }
    }
}

/// A lazily-initialized, globally-accessible settings container.
///
/// Call [`configure`](LazySettings::configure) once at startup. Reading
/// before configuration yields the defaults, which then become fixed.
pub struct LazySettings {
    inner: OnceLock<Arc<Settings>>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySettings {
    /// Creates a new, unconfigured `LazySettings`.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Configures the global settings.
    ///
    /// Fails if settings were already configured or already read.
    pub fn configure(&self, settings: Settings) -> TempusResult<()> {
        self.inner.set(Arc::new(settings)).map_err(|_| {
            TempusError::ConfigurationError("Settings have already been configured".into())
        })
    }

    /// Returns a shared handle to the settings, initializing them with the
    /// defaults if nothing was configured.
    pub fn get(&self) -> Arc<Settings> {
        Arc::clone(self.inner.get_or_init(|| Arc::new(Settings::default())))
    }

    /// Returns `true` if settings have been configured or read.
    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }
}

/// The global settings instance.
pub static SETTINGS: LazySettings = LazySettings::new();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert!(s.include_assets);
        assert!(!s.localize);
        assert_eq!(s.date_format, "YYYY-MM-DD");
        assert_eq!(s.datetime_format, "YYYY-MM-DD HH:mm:ss");
        assert_eq!(s.time_format, "HH:mm:ss");
        assert!(s.default_options.is_empty());
        assert!(s.debug);
        assert_eq!(s.log_level, "info");
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let s: Settings = serde_json::from_str(r#"{"localize": true}"#).unwrap();
        assert!(s.localize);
        assert_eq!(s.time_format, DEFAULT_TIME_FORMAT);
    }

    #[test]
    fn test_lazy_settings_configure_and_get() {
        let lazy = LazySettings::new();
        assert!(!lazy.is_configured());

        let settings = Settings {
            localize: true,
            ..Settings::default()
        };
        lazy.configure(settings).unwrap();
        assert!(lazy.is_configured());
        assert!(lazy.get().localize);
    }

    #[test]
    fn test_lazy_settings_double_configure_fails() {
        let lazy = LazySettings::new();
        lazy.configure(Settings::default()).unwrap();
        let err = lazy.configure(Settings::default()).unwrap_err();
        assert!(err.to_string().contains("already been configured"));
    }

    #[test]
    fn test_lazy_settings_get_before_configure_uses_defaults() {
        let lazy = LazySettings::new();
        assert_eq!(*lazy.get(), Settings::default());
        assert!(lazy.is_configured());
        assert!(lazy.configure(Settings::default()).is_err());
    }
}
