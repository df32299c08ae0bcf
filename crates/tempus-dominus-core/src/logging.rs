//! Logging integration.
//!
//! Provides [`setup_logging`] for installing a [`tracing`] subscriber from
//! [`Settings`](crate::settings::Settings), and [`render_span`] for grouping
//! the events emitted while a page renders its pickers.

use tracing_subscriber::{fmt, EnvFilter};

use crate::settings::Settings;

/// Target prefix of the events emitted while rendering pickers.
pub const WIDGETS_TARGET: &str = "tempus_dominus_widgets";

/// Builds the event filter for `settings`.
///
/// `log_level` is used as an `EnvFilter` directive string and falls back to
/// `info` when it does not parse. In debug mode the widget renderer is
/// raised to `debug`, so every rendered picker is logged with its kind and
/// id whatever the global level.
#[must_use]
pub fn build_filter(settings: &Settings) -> EnvFilter {
    let filter =
        EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    if !settings.debug {
        return filter;
    }
    match format!("{WIDGETS_TARGET}=debug").parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Installs the global subscriber: pretty output in debug mode, JSON lines
/// otherwise.
///
/// Returns `false` when a subscriber was already installed, in which case
/// the existing one is left in place.
pub fn setup_logging(settings: &Settings) -> bool {
    let builder = fmt::Subscriber::builder()
        .with_env_filter(build_filter(settings))
        .with_target(true);
    if settings.debug {
        builder.pretty().try_init().is_ok()
    } else {
        builder.json().try_init().is_ok()
    }
}

/// Creates a span covering the rendering of one form.
///
/// # Examples
///
/// ```
/// use tempus_dominus_core::logging::render_span;
///
/// let span = render_span("booking");
/// let _guard = span.enter();
/// tracing::debug!("rendering pickers");
/// ```
pub fn render_span(form_name: &str) -> tracing::Span {
    tracing::debug_span!("render_form", form = form_name)
}
