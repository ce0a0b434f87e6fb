// Wed Oct 14 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
    #[error("Unknown node: #{0}")]
    UnknownNode(usize),
    #[error("Document parse error: {0}")]
    Parse(String),
}

impl TreeError {
    pub fn invalid_selector(selector: &str, reason: impl Into<String>) -> Self {
        TreeError::InvalidSelector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }
}
