// Thu Oct 15 2026 - Alex

use crate::engine::rule::{CombinationMode, ValidationRule, ValidatorBinding, DEFAULT_TRIGGER_EVENT};
use crate::registry::{ErrorCatalog, ValidatorOptions};
use crate::tree::NodeId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_FALLBACK_MESSAGE: &str = "The input is not valid.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Config file not found: {0:?}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Message used when neither the binding nor the validator's catalog
    /// knows the sub-error type.
    pub fallback_message: String,
    pub cache_paths: bool,
    pub path_cache_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fallback_message: DEFAULT_FALLBACK_MESSAGE.to_string(),
            cache_paths: true,
            path_cache_size: 256,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fallback_message(mut self, message: &str) -> Self {
        self.fallback_message = message.to_string();
        self
    }

    pub fn with_path_cache(mut self, enabled: bool, size: usize) -> Self {
        self.cache_paths = enabled;
        self.path_cache_size = size;
        self
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config: Self = load_json(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fallback_message.trim().is_empty() {
            return Err(ConfigError::Invalid("fallback_message must not be empty".to_string()));
        }
        if self.cache_paths && self.path_cache_size == 0 {
            return Err(ConfigError::Invalid(
                "path_cache_size must be > 0 when cache_paths is set".to_string(),
            ));
        }
        Ok(())
    }
}

/// The JSON rule surface: `{ "rules": [ ... ] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RulesFile {
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<NodeId>>,
    #[serde(default = "default_trigger_event")]
    pub validate_on: String,
    #[serde(default)]
    pub validation_or: bool,
    #[serde(default)]
    pub add_messages: bool,
    #[serde(default)]
    pub validators: Vec<BindingEntry>,
}

/// A binding, or a group of bindings written as a nested array. Groups are
/// flattened in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BindingEntry {
    Single(BindingConfig),
    Group(Vec<BindingConfig>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BindingConfig {
    #[serde(default = "default_severity")]
    pub generate: String,
    pub validator: String,
    #[serde(default)]
    pub options: ValidatorOptions,
    #[serde(default)]
    pub errors: ErrorCatalog,
}

fn default_trigger_event() -> String {
    DEFAULT_TRIGGER_EVENT.to_string()
}

fn default_severity() -> String {
    "error".to_string()
}

impl RulesFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        load_json(path.as_ref())
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Converts every entry into a [`ValidationRule`]. The first invalid
    /// entry fails the whole file.
    pub fn to_rules(&self) -> Result<Vec<ValidationRule>, ConfigError> {
        self.rules
            .iter()
            .enumerate()
            .map(|(index, rule)| {
                rule.to_rule()
                    .map_err(|e| ConfigError::Invalid(format!("rule {}: {}", index, e)))
            })
            .collect()
    }
}

impl RuleConfig {
    /// `selector` wins over `elements` when both are given.
    pub fn to_rule(&self) -> Result<ValidationRule, String> {
        let mut rule = match (&self.selector, &self.elements) {
            (Some(selector), _) if !selector.trim().is_empty() => ValidationRule::for_selector(selector),
            (_, Some(elements)) if !elements.is_empty() => ValidationRule::for_nodes(elements.iter().copied()),
            _ => return Err("needs a selector or a non-empty elements list".to_string()),
        };

        rule = rule
            .with_trigger_event(&self.validate_on)
            .with_combination(CombinationMode::from_or_flag(self.validation_or))
            .with_add_messages(self.add_messages);

        for binding in self.bindings() {
            if binding.validator.trim().is_empty() {
                return Err("validator name must not be empty".to_string());
            }
            rule = rule.with_binding(binding.to_binding());
        }

        Ok(rule)
    }

    pub fn bindings(&self) -> impl Iterator<Item = &BindingConfig> {
        self.validators.iter().flat_map(|entry| match entry {
            BindingEntry::Single(binding) => std::slice::from_ref(binding).iter(),
            BindingEntry::Group(group) => group.iter(),
        })
    }
}

impl BindingConfig {
    pub fn to_binding(&self) -> ValidatorBinding {
        let mut binding = ValidatorBinding::new(&self.generate, &self.validator)
            .with_options(self.options.clone());
        binding.error_overrides = self.errors.clone();
        binding
    }
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if !ext.eq_ignore_ascii_case("json") {
        return Err(ConfigError::UnsupportedFormat(ext.to_string()));
    }

    let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rule::RuleTarget;
    use std::io::Write;

    const RULES: &str = r#"{
        "rules": [{
            "selector": ".firstName",
            "validateOn": "input",
            "validationOr": true,
            "addMessages": true,
            "validators": [
                [
                    { "generate": "error", "validator": "number",
                      "options": { "min": 0, "max": 30, "inclusiveMax": false },
                      "errors": { "min": "The value is not bigger than 0." } },
                    { "validator": "range", "options": { "openEnded": true } }
                ],
                { "generate": "warning", "validator": "mustBeEqual",
                  "options": { "targets": ["{{closest@.bibi}} .gigi"], "equalityType": "some" } }
            ]
        }, {
            "elements": [3, 4],
            "validators": [{ "validator": "pattern", "options": { "pattern": "^a" } }]
        }]
    }"#;

    #[test]
    fn test_rules_file_conversion() {
        let rules = RulesFile::from_json(RULES).unwrap().to_rules().unwrap();
        assert_eq!(rules.len(), 2);

        let first = &rules[0];
        assert_eq!(first.target, RuleTarget::Selector(".firstName".to_string()));
        assert_eq!(first.trigger_event, "input");
        assert_eq!(first.combination, CombinationMode::Or);
        assert!(first.add_messages);

        let names: Vec<_> = first.validators.iter().map(|b| b.validator.as_str()).collect();
        assert_eq!(names, vec!["number", "range", "mustBeEqual"]);
        assert_eq!(first.validators[1].severity, "error");
        assert_eq!(first.validators[2].severity, "warning");
        assert_eq!(first.validators[0].message_override("min"), Some("The value is not bigger than 0."));

        let second = &rules[1];
        assert_eq!(second.target, RuleTarget::Nodes(vec![NodeId(3), NodeId(4)]));
        assert_eq!(second.trigger_event, "change");
        assert_eq!(second.combination, CombinationMode::And);
    }

    #[test]
    fn test_rule_without_target_is_invalid() {
        let file = RulesFile::from_json(r#"{ "rules": [{ "validators": [] }] }"#).unwrap();
        assert!(matches!(file.to_rules(), Err(ConfigError::Invalid(msg)) if msg.starts_with("rule 0")));

        let file = RulesFile::from_json(r#"{ "rules": [{ "selector": "input", "validators": [{ "validator": " " }] }] }"#).unwrap();
        assert!(matches!(file.to_rules(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(RULES.as_bytes()).unwrap();

        let loaded = RulesFile::load(&path).unwrap();
        assert_eq!(loaded.rules.len(), 2);

        let reparsed = RulesFile::from_json(&loaded.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, loaded);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert_eq!(RulesFile::load(&missing), Err(ConfigError::NotFound(missing.clone())));

        let yaml = dir.path().join("rules.yaml");
        fs::write(&yaml, "rules: []").unwrap();
        assert_eq!(RulesFile::load(&yaml), Err(ConfigError::UnsupportedFormat("yaml".to_string())));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert!(matches!(RulesFile::load(&broken), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_engine_config() {
        let config = EngineConfig::default();
        assert_eq!(config.fallback_message, "The input is not valid.");
        assert!(config.validate().is_ok());

        assert!(EngineConfig::new().with_fallback_message(" ").validate().is_err());
        assert!(EngineConfig::new().with_path_cache(true, 0).validate().is_err());
        assert!(EngineConfig::new().with_path_cache(false, 0).validate().is_ok());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");
        fs::write(&path, r#"{ "fallback_message": "Invalid." }"#).unwrap();
        let loaded = EngineConfig::load(&path).unwrap();
        assert_eq!(loaded.fallback_message, "Invalid.");
        assert_eq!(loaded.path_cache_size, 256);
    }
}
