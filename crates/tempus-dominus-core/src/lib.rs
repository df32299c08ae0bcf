//! # tempus-dominus-core
//!
//! Error types, settings and logging shared by the tempus-dominus widget
//! crates.
//!
//! ## Modules
//!
//! - [`error`] - Error type and result alias
//! - [`settings`] - Widget settings and the global settings instance
//! - [`settings_loader`] - Loading settings from TOML, JSON and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

// Re-export the most commonly used types at the crate root.
pub use error::{TempusError, TempusResult};
pub use settings::{Settings, SETTINGS};
