//! # tempus-dominus
//!
//! Date, datetime and time picker widgets backed by the Tempus Dominus 6
//! JavaScript calendar.
//!
//! This is the meta-crate that re-exports the sub-crates. Depend on
//! `tempus-dominus` for everything, or on the individual crates for
//! finer-grained control.
//!
//! ```
//! use std::sync::Arc;
//!
//! use tempus_dominus::{Attrs, PickerWidget, Settings, Widget};
//!
//! let picker = PickerWidget::datetime(Arc::new(Settings::default()));
//! let html = picker.render("meeting-at", None, &Attrs::new()).unwrap();
//! assert!(html.contains(r#"id="meeting_at""#));
//! ```

/// Error types, settings and logging.
pub use tempus_dominus_core as core;

/// Picker widgets, attributes, options and media.
pub use tempus_dominus_widgets as widgets;

pub use tempus_dominus_core::{Settings, TempusError, TempusResult, SETTINGS};
pub use tempus_dominus_widgets::{Attrs, Media, Options, PickerKind, PickerWidget, Widget};

/// Third-party crates used in the public API.
pub use serde_json;
pub use tracing;
