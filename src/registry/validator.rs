// Wed Oct 14 2026 - Alex

use crate::registry::ValidatorOptions;
use crate::tree::NodeRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A typed failure reported by a validator. The engine turns it into an
/// error record and picks the message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubError {
    #[serde(rename = "type")]
    pub kind: String,
}

impl SubError {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into() }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }
}

impl fmt::Display for SubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.kind)
    }
}

pub trait Validator: Send + Sync {
    /// Checks `value` (the node's current value) and returns zero or more
    /// sub-errors. `node` gives access to the surrounding tree.
    fn apply(&self, value: &str, options: &ValidatorOptions, node: NodeRef<'_>) -> Vec<SubError>;
}

/// Adapts a plain closure to [`Validator`].
pub struct FnValidator<F> {
    func: F,
}

impl<F> FnValidator<F>
where
    F: Fn(&str, &ValidatorOptions, NodeRef<'_>) -> Vec<SubError> + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Validator for FnValidator<F>
where
    F: Fn(&str, &ValidatorOptions, NodeRef<'_>) -> Vec<SubError> + Send + Sync,
{
    fn apply(&self, value: &str, options: &ValidatorOptions, node: NodeRef<'_>) -> Vec<SubError> {
        (self.func)(value, options, node)
    }
}
