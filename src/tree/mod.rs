// Wed Oct 14 2026 - Alex

pub mod document;
pub mod error;
pub mod selector;

pub use document::{Document, ElementSpec};
pub use error::TreeError;
pub use selector::{Selector, SelectorList};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a node inside one tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Capability view over a tree. Everything the resolver and the validators
/// need from the host document goes through here.
pub trait TreeAccess {
    /// Descendants of `node` (excluding `node`) matching `selector`, in
    /// document order.
    fn query(&self, node: NodeId, selector: &str) -> Result<Vec<NodeId>, TreeError>;

    fn matches(&self, node: NodeId, selector: &str) -> Result<bool, TreeError>;

    /// The parent element. Top-level elements have none.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Nodes sharing `node`'s parent, excluding `node`, in document order.
    fn siblings(&self, node: NodeId) -> Vec<NodeId>;

    fn value(&self, node: NodeId) -> String;

    fn root(&self) -> NodeId;

    /// `node` is an element of this tree. The root is not.
    fn contains(&self, node: NodeId) -> bool;

    fn describe(&self, node: NodeId) -> String {
        node.to_string()
    }
}

/// A node borrowed from a tree for the duration of a validation call.
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t dyn TreeAccess,
    id: NodeId,
}

impl<'t> NodeRef<'t> {
    pub fn new(tree: &'t dyn TreeAccess, id: NodeId) -> Self {
        Self { tree, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'t dyn TreeAccess {
        self.tree
    }

    pub fn query(&self, selector: &str) -> Result<Vec<NodeRef<'t>>, TreeError> {
        let ids = self.tree.query(self.id, selector)?;
        Ok(ids.into_iter().map(|id| self.with_id(id)).collect())
    }

    pub fn matches(&self, selector: &str) -> Result<bool, TreeError> {
        self.tree.matches(self.id, selector)
    }

    pub fn parent(&self) -> Option<NodeRef<'t>> {
        self.tree.parent(self.id).map(|id| self.with_id(id))
    }

    pub fn siblings(&self) -> Vec<NodeRef<'t>> {
        self.tree
            .siblings(self.id)
            .into_iter()
            .map(|id| self.with_id(id))
            .collect()
    }

    pub fn value(&self) -> String {
        self.tree.value(self.id)
    }

    pub fn describe(&self) -> String {
        self.tree.describe(self.id)
    }

    fn with_id(&self, id: NodeId) -> NodeRef<'t> {
        NodeRef { tree: self.tree, id }
    }

    fn tree_addr(&self) -> *const () {
        (self.tree as *const dyn TreeAccess).cast::<()>()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.tree_addr() == other.tree_addr()
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeRef({})", self.describe())
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
