// Thu Oct 15 2026 - Alex

use crate::config::EngineConfig;
use crate::engine::error::EngineError;
use crate::engine::record::{Diagnostic, ErrorRecord, ValidationOutcome};
use crate::engine::rule::{RuleId, RuleTarget, ValidationRule};
use crate::engine::store::RuleStore;
use crate::path::PathResolver;
use crate::registry::{ErrorCatalog, SubError, ValidatorOptions, ValidatorRegistry};
use crate::tree::{NodeId, NodeRef, TreeAccess};
use crate::utils::logging::ScopedTimer;
use parking_lot::RwLock;
use std::sync::Arc;

pub struct Engine {
    config: EngineConfig,
    registry: Arc<ValidatorRegistry>,
    resolver: Arc<PathResolver>,
    rules: RwLock<RuleStore>,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// An engine with the built-in validators, sharing one path resolver
    /// between the engine and the equality validators.
    pub fn with_config(config: EngineConfig) -> Self {
        let resolver = Arc::new(if config.cache_paths {
            PathResolver::with_cache_size(config.path_cache_size)
        } else {
            PathResolver::uncached()
        });
        let registry = Arc::new(ValidatorRegistry::with_builtins_using(resolver.clone()));
        Self::with_registry(config, registry, resolver)
    }

    pub fn with_registry(
        config: EngineConfig,
        registry: Arc<ValidatorRegistry>,
        resolver: Arc<PathResolver>,
    ) -> Self {
        Self {
            config,
            registry,
            resolver,
            rules: RwLock::new(RuleStore::new()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<ValidatorRegistry> {
        &self.registry
    }

    pub fn resolver(&self) -> &Arc<PathResolver> {
        &self.resolver
    }

    pub fn register_validator<F>(&self, name: &str, func: F, catalog: Option<ErrorCatalog>) -> bool
    where
        F: Fn(&str, &ValidatorOptions, NodeRef<'_>) -> Vec<SubError> + Send + Sync + 'static,
    {
        self.registry.register_validator(name, func, catalog)
    }

    /// Runs `rule` (or the rule bound to `node`) and returns its error
    /// records in binding order.
    pub fn validate(
        &self,
        node: NodeRef<'_>,
        rule: Option<&ValidationRule>,
    ) -> Result<Vec<ErrorRecord>, EngineError> {
        self.run(node, rule).map(ValidationOutcome::into_records)
    }

    pub fn run(
        &self,
        node: NodeRef<'_>,
        rule: Option<&ValidationRule>,
    ) -> Result<ValidationOutcome, EngineError> {
        match rule {
            Some(rule) => Ok(self.execute(node, rule)),
            None => {
                let (_, bound) = self.bound_rule(node)?;
                Ok(self.execute(node, &bound))
            }
        }
    }

    fn bound_rule(&self, node: NodeRef<'_>) -> Result<(RuleId, Arc<ValidationRule>), EngineError> {
        // the read guard is dropped here; validators may call back into the engine
        let found = self.rules.read().rule_for(node.id());
        found.ok_or_else(|| {
            log::warn!("Could not find a rule for {}", node);
            EngineError::NoRule(node.describe())
        })
    }

    fn execute(&self, node: NodeRef<'_>, rule: &ValidationRule) -> ValidationOutcome {
        let mut outcome = ValidationOutcome::new();
        let value = node.value();

        for (index, binding) in rule.validators.iter().enumerate() {
            let entry = match self.registry.lookup(&binding.validator) {
                Some(entry) => entry,
                None => {
                    log::warn!("{} is not a valid validator function", binding.validator);
                    outcome.diagnostics.push(Diagnostic::UnknownValidator {
                        binding: index,
                        name: binding.validator.clone(),
                    });
                    continue;
                }
            };

            let sub_errors = entry.apply(&value, &binding.options, node);
            log::trace!(
                "{} binding {} ({}): {} sub-error(s)",
                node,
                index,
                binding.validator,
                sub_errors.len()
            );
            outcome.bindings_run.push(index);

            for sub_error in sub_errors {
                let message = binding
                    .message_override(sub_error.kind())
                    .or_else(|| entry.default_message(sub_error.kind()))
                    .unwrap_or(&self.config.fallback_message);

                outcome.records.push(
                    ErrorRecord::new(node, &binding.severity, message).with_source(
                        index,
                        &binding.validator,
                        sub_error.kind(),
                    ),
                );
            }
        }

        outcome
    }

    /// Stores `rule` and attaches it to every node its target resolves to.
    /// A node already bound to another rule is re-bound to this one.
    pub fn bind_rule(&self, tree: &dyn TreeAccess, rule: ValidationRule) -> Result<RuleId, EngineError> {
        let nodes = match &rule.target {
            RuleTarget::Selector(selector) => tree.query(tree.root(), selector)?,
            RuleTarget::Nodes(nodes) => {
                if let Some(&missing) = nodes.iter().find(|&&node| !tree.contains(node)) {
                    return Err(EngineError::UnknownNode(missing));
                }
                nodes.clone()
            }
        };

        let mut store = self.rules.write();
        let target = rule.target.to_string();
        let id = store.add(rule);

        if nodes.is_empty() {
            log::warn!("Could not find any elements for {} ({})", id, target);
        }
        for node in &nodes {
            if let Some(previous) = store.attach(*node, id) {
                log::debug!("{} re-bound from {} to {}", node, previous, id);
            }
        }

        log::debug!(
            "Bound {} to {} node(s), {} node(s) bound overall",
            id,
            nodes.len(),
            store.bound_count()
        );
        Ok(id)
    }

    /// Binds every rule, skipping (and logging) the ones that fail.
    pub fn bind_rules(
        &self,
        tree: &dyn TreeAccess,
        rules: impl IntoIterator<Item = ValidationRule>,
    ) -> Vec<RuleId> {
        let mut bound = Vec::new();

        for (index, rule) in rules.into_iter().enumerate() {
            match self.bind_rule(tree, rule) {
                Ok(id) => bound.push(id),
                Err(e) => log::warn!("Skipping rule {}: {}", index, e),
            }
        }

        bound
    }

    /// Runs the node's rule if it listens for `event`. `Ok(None)` means the
    /// rule triggers on something else.
    pub fn handle_event(&self, node: NodeRef<'_>, event: &str) -> Result<Option<ValidationOutcome>, EngineError> {
        let (_, rule) = self.bound_rule(node)?;
        if rule.trigger_event != event {
            log::trace!("{} ignores '{}' (listens for '{}')", node, event, rule.trigger_event);
            return Ok(None);
        }
        Ok(Some(self.execute(node, &rule)))
    }

    /// Runs a stored rule over all nodes currently bound to it.
    pub fn validate_rule<'t>(
        &self,
        tree: &'t dyn TreeAccess,
        id: RuleId,
    ) -> Result<Vec<(NodeRef<'t>, ValidationOutcome)>, EngineError> {
        let _timer = ScopedTimer::new(&format!("validate {}", id));

        let (rule, nodes) = {
            let store = self.rules.read();
            let rule = store.get(id).ok_or(EngineError::UnknownRule(id))?;
            (rule, store.nodes_for(id))
        };

        Ok(nodes
            .into_iter()
            .map(|node| {
                let node = NodeRef::new(tree, node);
                (node, self.execute(node, &rule))
            })
            .collect())
    }

    pub fn rule(&self, id: RuleId) -> Option<Arc<ValidationRule>> {
        self.rules.read().get(id)
    }

    pub fn rule_for(&self, node: NodeId) -> Option<RuleId> {
        self.rules.read().rule_for(node).map(|(id, _)| id)
    }

    pub fn rule_count(&self) -> usize {
        self.rules.read().rule_count()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
