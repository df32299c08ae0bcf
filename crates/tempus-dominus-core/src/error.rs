//! Error types for the tempus-dominus widgets.
//!
//! Every fallible operation in the workspace returns [`TempusResult`]. Widget
//! rendering has no recoverable failures: a bad identifier or an option that
//! cannot be represented as JSON is a programming or configuration error and
//! is reported as soon as the widget is rendered.

use thiserror::Error;

/// The error type shared by all tempus-dominus crates.
#[derive(Error, Debug)]
pub enum TempusError {
    // ── Rendering ────────────────────────────────────────────────────

    /// Neither an `id` attribute nor a field name was available.
    #[error("Missing identifier: {0}")]
    MissingIdentifier(String),

    /// The normalized identifier cannot be used as a script identifier.
    #[error("Invalid identifier: {0:?} is not a valid script identifier")]
    InvalidIdentifier(String),

    /// An HTML attribute name contains characters that would break the markup.
    #[error("Invalid attribute name: {0:?}")]
    InvalidAttribute(String),

    /// A value could not be serialized to JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The widget template failed to render.
    #[error("Template error: {0}")]
    Template(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing, malformed or was set twice.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl TempusError {
    /// Returns `true` for errors caused by the settings rather than by a
    /// particular widget or render call.
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::ConfigurationError(_) | Self::IoError(_))
    }
}

impl From<serde_json::Error> for TempusError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// A convenience type alias for `Result<T, TempusError>`.
pub type TempusResult<T> = Result<T, TempusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TempusError::MissingIdentifier("field name is empty".into());
        assert_eq!(err.to_string(), "Missing identifier: field name is empty");

        let err = TempusError::InvalidIdentifier("1st_date".into());
        assert_eq!(
            err.to_string(),
            r#"Invalid identifier: "1st_date" is not a valid script identifier"#
        );
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: TempusError = json_err.into();
        assert!(matches!(err, TempusError::Serialization(_)));
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: TempusError = io_err.into();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("file missing"));
    }
}
