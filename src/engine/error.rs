// Thu Oct 15 2026 - Alex

use crate::engine::rule::RuleId;
use crate::tree::{NodeId, TreeError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("No rule bound to node {0}")]
    NoRule(String),
    #[error("Unknown rule id {0}")]
    UnknownRule(RuleId),
    #[error("Node {0} is not part of the tree")]
    UnknownNode(NodeId),
    #[error("Tree error: {0}")]
    Tree(#[from] TreeError),
}
