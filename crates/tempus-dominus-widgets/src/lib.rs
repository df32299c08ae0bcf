//! # tempus-dominus-widgets
//!
//! Form widgets that render Tempus Dominus 6 date and time pickers: a text
//! input plus an inline script constructing the calendar on it.
//!
//! ## Modules
//!
//! - [`widgets`] - The `Widget` trait, `PickerKind` and `PickerWidget`
//! - [`attrs`] - HTML attribute maps, escaping and id normalization
//! - [`options`] - Calendar options and their script-safe JSON form
//! - [`media`] - CSS and JavaScript asset declarations

pub mod attrs;
pub mod media;
pub mod options;
pub mod widgets;

pub use attrs::Attrs;
pub use media::Media;
pub use options::Options;
pub use widgets::{PickerKind, PickerWidget, Widget};
