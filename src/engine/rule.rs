// Thu Oct 15 2026 - Alex

use crate::registry::{ErrorCatalog, ValidatorOptions};
use crate::tree::NodeId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

pub const DEFAULT_TRIGGER_EVENT: &str = "change";

/// Index of a rule inside the engine's rule store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(pub usize);

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleTarget {
    /// Queried from the tree root at bind time.
    Selector(String),
    Nodes(Vec<NodeId>),
}

impl fmt::Display for RuleTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleTarget::Selector(selector) => write!(f, "'{}'", selector),
            RuleTarget::Nodes(nodes) => write!(f, "{} explicit node(s)", nodes.len()),
        }
    }
}

/// How the caller collapses the records of a rule into pass/fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CombinationMode {
    #[default]
    And,
    Or,
}

impl CombinationMode {
    pub fn from_or_flag(validation_or: bool) -> Self {
        if validation_or {
            CombinationMode::Or
        } else {
            CombinationMode::And
        }
    }
}

/// One validator invocation inside a rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatorBinding {
    /// Tag copied onto every record this binding produces, e.g. `error`.
    pub severity: String,
    pub validator: String,
    pub options: ValidatorOptions,
    pub error_overrides: ErrorCatalog,
}

impl ValidatorBinding {
    pub fn new(severity: &str, validator: &str) -> Self {
        Self {
            severity: severity.to_string(),
            validator: validator.to_string(),
            options: ValidatorOptions::new(),
            error_overrides: ErrorCatalog::new(),
        }
    }

    pub fn error(validator: &str) -> Self {
        Self::new("error", validator)
    }

    pub fn warning(validator: &str) -> Self {
        Self::new("warning", validator)
    }

    pub fn with_options(mut self, options: ValidatorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_option(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.options.set(key, value);
        self
    }

    pub fn with_message(mut self, kind: &str, message: &str) -> Self {
        self.error_overrides.insert(kind.to_string(), message.to_string());
        self
    }

    pub fn message_override(&self, kind: &str) -> Option<&str> {
        self.error_overrides.get(kind).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRule {
    pub target: RuleTarget,
    pub trigger_event: String,
    pub combination: CombinationMode,
    /// Carried for the presentation layer; the engine does not render.
    pub add_messages: bool,
    pub validators: Vec<ValidatorBinding>,
}

impl ValidationRule {
    pub fn new(target: RuleTarget) -> Self {
        Self {
            target,
            trigger_event: DEFAULT_TRIGGER_EVENT.to_string(),
            combination: CombinationMode::And,
            add_messages: false,
            validators: Vec::new(),
        }
    }

    pub fn for_selector(selector: &str) -> Self {
        Self::new(RuleTarget::Selector(selector.to_string()))
    }

    pub fn for_nodes(nodes: impl IntoIterator<Item = NodeId>) -> Self {
        Self::new(RuleTarget::Nodes(nodes.into_iter().collect()))
    }

    pub fn with_trigger_event(mut self, event: &str) -> Self {
        self.trigger_event = event.to_string();
        self
    }

    pub fn with_combination(mut self, combination: CombinationMode) -> Self {
        self.combination = combination;
        self
    }

    pub fn with_add_messages(mut self, add_messages: bool) -> Self {
        self.add_messages = add_messages;
        self
    }

    pub fn with_binding(mut self, binding: ValidatorBinding) -> Self {
        self.validators.push(binding);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_builder_defaults() {
        let rule = ValidationRule::for_selector(".age");
        assert_eq!(rule.target, RuleTarget::Selector(".age".to_string()));
        assert_eq!(rule.trigger_event, "change");
        assert_eq!(rule.combination, CombinationMode::And);
        assert!(!rule.add_messages);
        assert!(rule.validators.is_empty());
    }

    #[test]
    fn test_binding_overrides() {
        let binding = ValidatorBinding::error("number")
            .with_option("min", 0)
            .with_message("min", "Too small.");

        assert_eq!(binding.severity, "error");
        assert_eq!(binding.options.number("min"), Some(0.0));
        assert_eq!(binding.message_override("min"), Some("Too small."));
        assert_eq!(binding.message_override("max"), None);
    }

    #[test]
    fn test_combination_from_flag() {
        assert_eq!(CombinationMode::from_or_flag(true), CombinationMode::Or);
        assert_eq!(CombinationMode::from_or_flag(false), CombinationMode::And);
    }
}
