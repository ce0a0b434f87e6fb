// Thu Oct 15 2026 - Alex

use crate::engine::rule::{RuleId, ValidationRule};
use crate::tree::NodeId;
use ahash::AHashMap;
use std::sync::Arc;

/// Rules plus the node -> rule side table.
#[derive(Debug, Default)]
pub struct RuleStore {
    rules: Vec<Arc<ValidationRule>>,
    bound: AHashMap<NodeId, RuleId>,
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, rule: ValidationRule) -> RuleId {
        let id = RuleId(self.rules.len());
        self.rules.push(Arc::new(rule));
        id
    }

    pub fn get(&self, id: RuleId) -> Option<Arc<ValidationRule>> {
        self.rules.get(id.0).cloned()
    }

    /// Attaches `rule` to `node`, replacing any earlier attachment.
    pub fn attach(&mut self, node: NodeId, rule: RuleId) -> Option<RuleId> {
        self.bound.insert(node, rule)
    }

    pub fn rule_for(&self, node: NodeId) -> Option<(RuleId, Arc<ValidationRule>)> {
        let id = *self.bound.get(&node)?;
        self.get(id).map(|rule| (id, rule))
    }

    /// Nodes currently attached to `rule`, in id order.
    pub fn nodes_for(&self, rule: RuleId) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self
            .bound
            .iter()
            .filter(|(_, &bound)| bound == rule)
            .map(|(&node, _)| node)
            .collect();
        nodes.sort();
        nodes
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn bound_count(&self) -> usize {
        self.bound.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_attachment_wins() {
        let mut store = RuleStore::new();
        let first = store.add(ValidationRule::for_selector("input"));
        let second = store.add(ValidationRule::for_selector(".age"));

        assert_eq!(store.attach(NodeId(3), first), None);
        assert_eq!(store.attach(NodeId(3), second), Some(first));
        assert_eq!(store.rule_for(NodeId(3)).map(|(id, _)| id), Some(second));
        assert!(store.nodes_for(first).is_empty());
        assert_eq!(store.bound_count(), 1);
    }

    #[test]
    fn test_nodes_for_rule_sorted() {
        let mut store = RuleStore::new();
        let rule = store.add(ValidationRule::for_selector("input"));
        for node in [5, 2, 9] {
            store.attach(NodeId(node), rule);
        }
        assert_eq!(store.nodes_for(rule), vec![NodeId(2), NodeId(5), NodeId(9)]);
        assert!(store.rule_for(NodeId(1)).is_none());
    }
}
