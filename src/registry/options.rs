// Wed Oct 14 2026 - Alex

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form validator configuration, read with loose (form-style) typing:
/// numbers may be given as numeric strings and flags follow truthiness.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidatorOptions(Map<String, Value>);

impl ValidatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    pub fn flag(&self, key: &str) -> bool {
        self.0.get(key).map_or(false, is_truthy)
    }

    /// Like [`flag`](Self::flag) but with a default for absent keys.
    pub fn flag_or(&self, key: &str, default: bool) -> bool {
        self.0.get(key).map_or(default, is_truthy)
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// A list of strings; a single string is treated as a one-element list and
    /// non-string items are skipped.
    pub fn string_list(&self, key: &str) -> Vec<String> {
        match self.0.get(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            Some(Value::String(s)) => vec![s.clone()],
            _ => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl From<Map<String, Value>> for ValidatorOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(false, |n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_loose_numbers() {
        let options = ValidatorOptions::new()
            .with("min", 0)
            .with("max", "30")
            .with("step", "abc");

        assert_eq!(options.number("min"), Some(0.0));
        assert_eq!(options.number("max"), Some(30.0));
        assert_eq!(options.number("step"), None);
        assert_eq!(options.number("missing"), None);
    }

    #[test]
    fn test_flags_follow_truthiness() {
        let options: ValidatorOptions = serde_json::from_value(json!({
            "a": true, "b": 0, "c": "", "d": "yes", "e": null, "f": 1
        }))
        .unwrap();

        assert!(options.flag("a"));
        assert!(!options.flag("b"));
        assert!(!options.flag("c"));
        assert!(options.flag("d"));
        assert!(!options.flag("e"));
        assert!(options.flag("f"));
        assert!(!options.flag("missing"));
        assert!(options.flag_or("missing", true));
        assert!(!options.flag_or("b", true));
    }

    #[test]
    fn test_string_list() {
        let options = ValidatorOptions::new()
            .with("targets", json!(["{{parent}} input", 3, ".x"]))
            .with("single", "#a");

        assert_eq!(options.string_list("targets"), vec!["{{parent}} input", ".x"]);
        assert_eq!(options.string_list("single"), vec!["#a"]);
        assert!(options.string_list("missing").is_empty());
    }
}
