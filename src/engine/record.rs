// Thu Oct 15 2026 - Alex

use crate::engine::rule::CombinationMode;
use crate::tree::{NodeId, NodeRef};
use std::fmt;

/// A validation failure for one node. Built fresh on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    /// Severity tag of the binding that produced the record.
    pub severity: String,
    pub message: String,
    pub node: NodeId,
    pub element: String,
    pub validator: String,
    pub error_type: String,
    pub binding: usize,
}

impl ErrorRecord {
    pub fn new(node: NodeRef<'_>, severity: &str, message: &str) -> Self {
        Self {
            severity: severity.to_string(),
            message: message.to_string(),
            node: node.id(),
            element: node.describe(),
            validator: String::new(),
            error_type: String::new(),
            binding: 0,
        }
    }

    pub fn with_source(mut self, binding: usize, validator: &str, error_type: &str) -> Self {
        self.binding = binding;
        self.validator = validator.to_string();
        self.error_type = error_type.to_string();
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == "error"
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} ({}/{})",
            self.severity, self.element, self.message, self.validator, self.error_type
        )
    }
}

impl serde::Serialize for ErrorRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("ErrorRecord", 7)?;
        state.serialize_field("type", &self.severity)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("node", &self.node)?;
        state.serialize_field("element", &self.element)?;
        state.serialize_field("validator", &self.validator)?;
        state.serialize_field("errorType", &self.error_type)?;
        state.serialize_field("binding", &self.binding)?;
        state.end()
    }
}

/// A configuration problem met while running a rule. Never a user error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    UnknownValidator { binding: usize, name: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownValidator { binding, name } => {
                write!(f, "binding {}: '{}' is not a registered validator", binding, name)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub records: Vec<ErrorRecord>,
    pub diagnostics: Vec<Diagnostic>,
    /// Indices of the bindings that actually ran.
    pub bindings_run: Vec<usize>,
}

impl ValidationOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// `And`: no records at all. `Or`: some binding that ran produced
    /// nothing. With no binding run, `Or` passes.
    pub fn passes(&self, mode: CombinationMode) -> bool {
        match mode {
            CombinationMode::And => self.records.is_empty(),
            CombinationMode::Or => {
                self.bindings_run.is_empty()
                    || self
                        .bindings_run
                        .iter()
                        .any(|&binding| !self.records.iter().any(|r| r.binding == binding))
            }
        }
    }

    pub fn into_records(self) -> Vec<ErrorRecord> {
        self.records
    }
}
