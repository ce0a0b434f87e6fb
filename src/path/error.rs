// Wed Oct 14 2026 - Alex

use crate::tree::TreeError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("Unknown relational operator '{operator}' in path '{path}'")]
    UnknownOperator { operator: String, path: String },
    #[error("Empty relational step in path '{0}'")]
    EmptyStep(String),
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),
}
