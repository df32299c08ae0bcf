//! Calendar options passed to the Tempus Dominus constructor.
//!
//! Options are layered: the settings' `default_options` first, then the
//! widget's own options. The merge is shallow, so a widget that sets
//! `restrictions` replaces the whole default `restrictions` object.

use serde::Serialize;
use serde_json::{Map, Value};
use tempus_dominus_core::{TempusError, TempusResult};

/// A JSON object of calendar options.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tempus_dominus_widgets::options::Options;
///
/// let defaults =
///     Options::try_from(json!({"display": {"sideBySide": true}, "stepping": 5})).unwrap();
/// let instance = Options::try_from(json!({"stepping": 15})).unwrap();
///
/// let merged = defaults.merged_with(&instance);
/// assert_eq!(merged.get("stepping"), Some(&json!(15)));
/// assert_eq!(merged.get("display"), Some(&json!({"sideBySide": true})));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Options(Map<String, Value>);

impl Options {
    /// Creates an empty options object.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes `value` and stores it under `key`.
    ///
    /// Fails with [`TempusError::Serialization`] when the value has no JSON
    /// representation, such as a map keyed by tuples.
    pub fn insert<T: Serialize + ?Sized>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> TempusResult<()> {
        let value = serde_json::to_value(value)?;
        self.0.insert(key.into(), value);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with<T: Serialize + ?Sized>(
        mut self,
        key: impl Into<String>,
        value: &T,
    ) -> TempusResult<Self> {
        self.insert(key, value)?;
        Ok(self)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Returns a new object holding `self` with `overrides` layered on top.
    /// Top-level keys present in both take the value from `overrides`.
    pub fn merged_with(&self, overrides: &Self) -> Self {
        let mut merged = self.0.clone();
        for (key, value) in &overrides.0 {
            merged.insert(key.clone(), value.clone());
        }
        Self(merged)
    }

    /// Serializes the options as compact JSON.
    pub fn to_json(&self) -> TempusResult<String> {
        Ok(serde_json::to_string(&self.0)?)
    }

    /// Serializes the options as JSON that can be embedded in a `<script>`
    /// element.
    ///
    /// `<`, `>` and `&` are written as `\u` escapes, so no string value can
    /// close the script element or open a comment. The output parses to the
    /// same JSON value as [`to_json`](Self::to_json).
    pub fn to_script_json(&self) -> TempusResult<String> {
        let json = self.to_json()?;
        Ok(json
            .replace('<', "\\u003c")
            .replace('>', "\\u003e")
            .replace('&', "\\u0026"))
    }
}

impl From<Map<String, Value>> for Options {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Options {
    type Error = TempusError;

    fn try_from(value: Value) -> TempusResult<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(TempusError::Serialization(format!(
                "calendar options must be a JSON object, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde_json::json;

    use super::*;

    #[test]
    fn test_insert_serializable_values() {
        let mut options = Options::new();
        options.insert("stepping", &15).unwrap();
        options.insert("locale", "de").unwrap();
        options
            .insert("disabledDates", &vec!["2024-12-25", "2024-12-26"])
            .unwrap();
        assert_eq!(options.len(), 3);
        assert_eq!(options.get("locale"), Some(&json!("de")));
        assert_eq!(
            options.get("disabledDates"),
            Some(&json!(["2024-12-25", "2024-12-26"]))
        );
    }

    #[test]
    fn test_insert_non_serializable_fails() {
        let mut bad: HashMap<(u8, u8), u8> = HashMap::new();
        bad.insert((1, 2), 3);
        let err = Options::new().with("bad", &bad).unwrap_err();
        assert!(matches!(err, TempusError::Serialization(_)));
    }

    #[test]
    fn test_try_from_non_object_fails() {
        assert!(Options::try_from(json!([1, 2])).is_err());
        assert!(Options::try_from(json!("x")).is_err());
        assert!(Options::try_from(json!({})).unwrap().is_empty());
    }

    #[test]
    fn test_merge_is_shallow() {
        let defaults = Options::try_from(json!({
            "restrictions": {"minDate": "2024-01-01", "maxDate": "2024-12-31"},
            "keepOpen": false
        }))
        .unwrap();
        let instance =
            Options::try_from(json!({"restrictions": {"maxDate": "2025-06-30"}})).unwrap();

        let merged = defaults.merged_with(&instance);
        assert_eq!(merged.get("restrictions"), Some(&json!({"maxDate": "2025-06-30"})));
        assert_eq!(merged.get("keepOpen"), Some(&json!(false)));
        // Defaults untouched
        assert_eq!(
            defaults.get("restrictions"),
            Some(&json!({"minDate": "2024-01-01", "maxDate": "2024-12-31"}))
        );
    }

    #[test]
    fn test_to_json() {
        let options = Options::try_from(json!({"b": 1, "a": true})).unwrap();
        assert_eq!(options.to_json().unwrap(), r#"{"a":true,"b":1}"#);
        assert_eq!(Options::new().to_json().unwrap(), "{}");
    }

    #[test]
    fn test_to_script_json_escapes_markup() {
        let options = Options::new()
            .with("tip", "</script><script>alert(1)</script> & more")
            .unwrap();
        let json = options.to_script_json().unwrap();
        assert!(!json.contains('<'));
        assert!(!json.contains('>'));
        assert!(!json.contains('&'));

        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Value::Object(options.into_map()));
    }
}
