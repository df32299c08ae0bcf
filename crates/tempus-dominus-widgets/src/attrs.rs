//! HTML attribute maps.
//!
//! [`Attrs`] is an ordered `name -> value` map. Merging always produces a new
//! map, so instance-level defaults held by a widget are never mutated by a
//! render call. Serialization escapes every value.

use std::collections::BTreeMap;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tempus_dominus_core::{TempusError, TempusResult};

/// The attribute whose value doubles as a script identifier.
pub const ID_ATTR: &str = "id";
/// The attribute holding the CSS class list.
pub const CLASS_ATTR: &str = "class";

static ATTR_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[^\s"'<>/=]+$"#).expect("valid regex"));

/// An ordered set of HTML attributes.
///
/// # Examples
///
/// ```
/// use tempus_dominus_widgets::attrs::Attrs;
///
/// let defaults = Attrs::new().with("class", "wide").with("placeholder", "Pick a date");
/// let overrides = Attrs::new().with("class", "narrow");
///
/// let merged = defaults.merged_with(&overrides);
/// assert_eq!(merged.get("class"), Some("narrow"));
/// assert_eq!(merged.get("placeholder"), Some("Pick a date"));
/// assert_eq!(defaults.get("class"), Some("wide"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs(BTreeMap<String, String>);

impl Attrs {
    /// Creates an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Inserts an attribute, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    /// Returns the value of an attribute.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Removes an attribute, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    /// Returns `true` if the attribute is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns a new map holding `self` with `overrides` layered on top.
    /// Keys present in both take the value from `overrides`.
    pub fn merged_with(&self, overrides: &Self) -> Self {
        let mut merged = self.0.clone();
        for (name, value) in &overrides.0 {
            merged.insert(name.clone(), value.clone());
        }
        Self(merged)
    }

    /// Formats the attributes as ` name="value"` pairs with escaped values.
    ///
    /// Fails if a name contains whitespace, quotes, `<`, `>`, `/` or `=`.
    pub fn to_html(&self) -> TempusResult<String> {
        let mut html = String::new();
        for (name, value) in &self.0 {
            if !ATTR_NAME_RE.is_match(name) {
                return Err(TempusError::InvalidAttribute(name.clone()));
            }
            html.push_str(&format!(r#" {name}="{}""#, escape_html(value)));
        }
        Ok(html)
    }
}

impl<K, V> FromIterator<(K, V)> for Attrs
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<HashMap<String, String>> for Attrs {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

/// Escapes HTML special characters in a string.
///
/// Replaces `&`, `<`, `>`, `"`, and `'` with their HTML entity equivalents.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Turns an HTML id into a script identifier by replacing hyphens with
/// underscores.
pub fn normalize_id(id: &str) -> String {
    id.replace('-', "_")
}

/// Builds the class list for a picker input.
///
/// `required` is prepended unless it is already one of the tokens and
/// `marker` is appended unless already present. Tokens are separated by
/// single spaces.
pub fn picker_classes(class: Option<&str>, required: &str, marker: &str) -> String {
    let mut tokens: Vec<&str> = class.unwrap_or_default().split_whitespace().collect();
    if !tokens.contains(&required) {
        tokens.insert(0, required);
    }
    if !tokens.contains(&marker) {
        tokens.push(marker);
    }
    tokens.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overrides_win() {
        let defaults = Attrs::new().with("id", "a").with("size", "10");
        let overrides = Attrs::new().with("id", "b").with("required", "required");
        let merged = defaults.merged_with(&overrides);
        assert_eq!(merged.get("id"), Some("b"));
        assert_eq!(merged.get("size"), Some("10"));
        assert_eq!(merged.get("required"), Some("required"));
        assert_eq!(merged.len(), 3);
        // Inputs untouched
        assert_eq!(defaults.get("id"), Some("a"));
        assert_eq!(overrides.len(), 2);
    }

    #[test]
    fn test_to_html_empty() {
        assert_eq!(Attrs::new().to_html().unwrap(), "");
    }

    #[test]
    fn test_to_html_sorted_and_escaped() {
        let attrs = Attrs::new()
            .with("title", r#"say "hi" <b>"#)
            .with("class", "a & b");
        assert_eq!(
            attrs.to_html().unwrap(),
            r#" class="a &amp; b" title="say &quot;hi&quot; &lt;b&gt;""#
        );
    }

    #[test]
    fn test_to_html_rejects_bad_names() {
        for name in ["on click", r#"x"y"#, "a>b", "", "a=b"] {
            let attrs = Attrs::new().with(name, "v");
            assert!(
                matches!(attrs.to_html(), Err(TempusError::InvalidAttribute(_))),
                "{name:?} should be rejected"
            );
        }
        assert!(Attrs::new().with("data-td-target", "#x").to_html().is_ok());
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<div>"), "&lt;div&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }

    #[test]
    fn test_normalize_id() {
        assert_eq!(normalize_id("id_start-date"), "id_start_date");
        assert_eq!(normalize_id("form-0-when"), "form_0_when");
        assert_eq!(normalize_id("plain"), "plain");
    }

    #[test]
    fn test_picker_classes() {
        let req = "form-control";
        let marker = "datetimepicker-input";
        assert_eq!(
            picker_classes(None, req, marker),
            "form-control datetimepicker-input"
        );
        assert_eq!(
            picker_classes(Some("wide"), req, marker),
            "form-control wide datetimepicker-input"
        );
        assert_eq!(
            picker_classes(Some("wide form-control"), req, marker),
            "wide form-control datetimepicker-input"
        );
        assert_eq!(
            picker_classes(Some("form-control-lg"), req, marker),
            "form-control form-control-lg datetimepicker-input"
        );
        assert_eq!(
            picker_classes(Some("  datetimepicker-input  "), req, marker),
            "form-control datetimepicker-input"
        );
    }

    #[test]
    fn test_from_hash_map() {
        let mut map = HashMap::new();
        map.insert("id".to_string(), "when".to_string());
        let attrs = Attrs::from(map);
        assert!(attrs.contains("id"));
    }
}
