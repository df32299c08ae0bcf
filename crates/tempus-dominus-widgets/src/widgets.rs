//! Tempus Dominus picker widgets.
//!
//! The three pickers share one render path. They differ only in the display
//! format they propose when none was given, which [`PickerKind`] resolves
//! from the [`Settings`].
//!
//! A render produces a text input carrying the merged attributes and an
//! inline script that constructs the calendar on that input:
//!
//! ```text
//! <input type="text" name="start-date" value="2024-01-01" class="form-control datetimepicker-input" id="start_date" ...>
//! <script>
//!   var start_date_picker = new tempusDominus.TempusDominus(document.getElementById("start_date"), {...});
//! </script>
//! ```

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use tera::Tera;
use tempus_dominus_core::settings::SETTINGS;
use tempus_dominus_core::{Settings, TempusError, TempusResult};

use crate::attrs::{normalize_id, picker_classes, Attrs, CLASS_ATTR, ID_ATTR};
use crate::media::Media;
use crate::options::Options;

/// Class every picker input carries.
pub const BASE_CLASS: &str = "form-control";
/// Class the calendar library uses to close the popup when focus leaves the input.
pub const INPUT_MARKER_CLASS: &str = "datetimepicker-input";

/// Attributes the template writes itself. Letting callers set them would
/// duplicate them on the input, and browsers keep the first occurrence.
pub const RESERVED_ATTRS: [&str; 4] = ["type", "name", "value", "data-td-target"];

static SCRIPT_IDENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{XID_Start}_$][\p{XID_Continue}$]*$").expect("valid regex")
});

const WIDGET_TEMPLATE_NAME: &str = "tempus_dominus/widget.html";

const WIDGET_TEMPLATE: &str = r##"<div class="input-group" data-td-target-input="nearest" data-td-target-toggle="nearest">
  <input type="{{ input_type }}" name="{{ name }}"{% if value is string %} value="{{ value }}"{% endif %}{{ attrs | safe }} data-td-target="#{{ picker_id }}">
  <span class="input-group-text" data-td-target="#{{ picker_id }}" data-td-toggle="datetimepicker"></span>
</div>
<script>
  var {{ picker_id }}_picker = new tempusDominus.TempusDominus(document.getElementById("{{ picker_id }}"), {{ js_options | safe }});
</script>"##;

// The `.html` suffix turns on tera's autoescaping.
static WIDGET_TERA: Lazy<Result<Tera, String>> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_template(WIDGET_TEMPLATE_NAME, WIDGET_TEMPLATE)
        .map_err(|e| e.to_string())?;
    Ok(tera)
});

/// The picker flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickerKind {
    /// Date only.
    Date,
    /// Date and time.
    DateTime,
    /// Time only.
    Time,
}

/// What distinguishes one picker kind from another.
#[derive(Clone, Copy)]
struct Capabilities {
    input_type: &'static str,
    localized_format: &'static str,
    configured_format: fn(&Settings) -> &str,
}

fn date_format(settings: &Settings) -> &str {
    &settings.date_format
}

fn datetime_format(settings: &Settings) -> &str {
    &settings.datetime_format
}

fn time_format(settings: &Settings) -> &str {
    &settings.time_format
}

impl PickerKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 3] = [Self::Date, Self::DateTime, Self::Time];

    fn capabilities(self) -> Capabilities {
        match self {
            Self::Date => Capabilities {
                input_type: "text",
                localized_format: "L",
                configured_format: date_format,
            },
            Self::DateTime => Capabilities {
                input_type: "text",
                localized_format: "L LTS",
                configured_format: datetime_format,
            },
            Self::Time => Capabilities {
                input_type: "text",
                localized_format: "LTS",
                configured_format: time_format,
            },
        }
    }

    /// The `type` attribute of the rendered input.
    pub fn input_type(self) -> &'static str {
        self.capabilities().input_type
    }

    /// The locale-aware format token understood by the calendar library.
    pub fn localized_format(self) -> &'static str {
        self.capabilities().localized_format
    }

    /// The display format proposed when the widget has no explicit one:
    /// the localized token if `settings.localize` is set, otherwise the
    /// configured format for this kind.
    pub fn default_format(self, settings: &Settings) -> &str {
        let caps = self.capabilities();
        if settings.localize {
            caps.localized_format
        } else {
            (caps.configured_format)(settings)
        }
    }
}

impl fmt::Display for PickerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Date => "DatePicker",
            Self::DateTime => "DateTimePicker",
            Self::Time => "TimePicker",
        };
        write!(f, "{name}")
    }
}

/// A trait for HTML form widgets.
///
/// Widgets are responsible for:
/// - Rendering an HTML fragment for a given field name and value
/// - Generating the `id` attribute for an associated `<label>` element
/// - Declaring the assets the page must load for the fragment to work
pub trait Widget: Send + Sync + fmt::Debug {
    /// Returns the picker kind.
    fn widget_type(&self) -> PickerKind;

    /// Renders the widget as an HTML string.
    ///
    /// # Arguments
    /// - `name` - The HTML `name` attribute
    /// - `value` - The current value to display (if any)
    /// - `attrs` - Attributes for this render, layered over the widget's own
    fn render(&self, name: &str, value: Option<&str>, attrs: &Attrs) -> TempusResult<String>;

    /// Returns the HTML `id` attribute value for a label targeting this widget.
    fn id_for_label(&self, id: &str) -> String;

    /// Returns the assets this widget needs.
    fn media(&self) -> Media;
}

/// A Tempus Dominus picker bound to an input element.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use tempus_dominus_core::Settings;
/// use tempus_dominus_widgets::attrs::Attrs;
/// use tempus_dominus_widgets::widgets::{PickerWidget, Widget};
///
/// let picker = PickerWidget::date(Arc::new(Settings::default()));
/// let html = picker.render("start-date", Some("2024-01-01"), &Attrs::new()).unwrap();
/// assert!(html.contains(r#"id="start_date""#));
/// assert!(html.contains(r#"document.getElementById("start_date")"#));
/// assert_eq!(picker.js_format(), "YYYY-MM-DD");
/// ```
#[derive(Debug, Clone)]
pub struct PickerWidget {
    kind: PickerKind,
    settings: Arc<Settings>,
    attrs: Attrs,
    options: Options,
    format: Option<String>,
}

impl PickerWidget {
    /// Creates a picker of the given kind with no attributes or options.
    pub fn new(kind: PickerKind, settings: Arc<Settings>) -> Self {
        Self {
            kind,
            settings,
            attrs: Attrs::new(),
            options: Options::new(),
            format: None,
        }
    }

    /// A date-only picker.
    pub fn date(settings: Arc<Settings>) -> Self {
        Self::new(PickerKind::Date, settings)
    }

    /// A date and time picker.
    pub fn datetime(settings: Arc<Settings>) -> Self {
        Self::new(PickerKind::DateTime, settings)
    }

    /// A time-only picker.
    pub fn time(settings: Arc<Settings>) -> Self {
        Self::new(PickerKind::Time, settings)
    }

    /// A picker reading the global [`SETTINGS`].
    pub fn from_global(kind: PickerKind) -> Self {
        Self::new(kind, SETTINGS.get())
    }

    /// Sets the attributes every render starts from.
    #[must_use]
    pub fn with_attrs(mut self, attrs: Attrs) -> Self {
        self.attrs = attrs;
        self
    }

    /// Sets the widget's calendar options. They are layered over the
    /// settings' `default_options` at render time.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Sets an explicit display format, taking precedence over settings.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub const fn kind(&self) -> PickerKind {
        self.kind
    }

    pub const fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub const fn options(&self) -> &Options {
        &self.options
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The display format: the explicit one if set, otherwise the kind's
    /// default under the current settings.
    pub fn js_format(&self) -> &str {
        self.format
            .as_deref()
            .unwrap_or_else(|| self.kind.default_format(&self.settings))
    }

    /// Settings `default_options` with the widget's options on top.
    pub fn effective_options(&self) -> Options {
        Options::from(self.settings.default_options.clone()).merged_with(&self.options)
    }

    /// Merges `attrs` over the widget's attributes, normalizes the id and
    /// fixes up the class list. Returns the picker id with the attributes.
    ///
    /// The id falls back to `name` when neither layer sets one. Setting any
    /// of [`RESERVED_ATTRS`] fails with [`TempusError::InvalidAttribute`].
    pub fn effective_attrs(&self, name: &str, attrs: &Attrs) -> TempusResult<(String, Attrs)> {
        let mut merged = self.attrs.merged_with(attrs);
        if let Some(reserved) = RESERVED_ATTRS.iter().find(|key| merged.contains(key)) {
            return Err(TempusError::InvalidAttribute((*reserved).to_string()));
        }

        let raw_id = merged.get(ID_ATTR).unwrap_or(name);
        if raw_id.trim().is_empty() {
            return Err(TempusError::MissingIdentifier(format!(
                "field {name:?} has no id attribute and no usable name"
            )));
        }
        let picker_id = normalize_id(raw_id);
        if !SCRIPT_IDENT_RE.is_match(&picker_id) {
            return Err(TempusError::InvalidIdentifier(picker_id));
        }
        merged.insert(ID_ATTR, picker_id.clone());

        let class = picker_classes(merged.get(CLASS_ATTR), BASE_CLASS, INPUT_MARKER_CLASS);
        merged.insert(CLASS_ATTR, class);

        Ok((picker_id, merged))
    }
}

impl Widget for PickerWidget {
    fn widget_type(&self) -> PickerKind {
        self.kind
    }

    fn render(&self, name: &str, value: Option<&str>, attrs: &Attrs) -> TempusResult<String> {
        let (picker_id, attrs) = self.effective_attrs(name, attrs)?;
        let js_options = self.effective_options().to_script_json()?;

        tracing::debug!(
            kind = %self.kind,
            picker_id = %picker_id,
            options = js_options.len(),
            "rendering picker widget"
        );

        let mut context = tera::Context::new();
        context.insert("input_type", self.kind.input_type());
        context.insert("name", name);
        context.insert("value", &value);
        context.insert("attrs", &attrs.to_html()?);
        context.insert("picker_id", &picker_id);
        context.insert("js_options", &js_options);

        let tera = WIDGET_TERA
            .as_ref()
            .map_err(|e| TempusError::Template(e.clone()))?;
        tera.render(WIDGET_TEMPLATE_NAME, &context)
            .map_err(|e| TempusError::Template(format!("{} picker: {e}", self.kind)))
    }

    fn id_for_label(&self, id: &str) -> String {
        normalize_id(id)
    }

    fn media(&self) -> Media {
        if self.settings.include_assets {
            Media::cdn()
        } else {
            Media::new()
        }
    }
}
