// Wed Oct 14 2026 - Alex

use crate::path::PathResolver;
use crate::registry::{catalog, ErrorCatalog, SubError, Validator, ValidatorOptions};
use crate::tree::NodeRef;
use itertools::Itertools;
use std::fmt;
use std::sync::Arc;

pub const MUST_NOT_BE_EQUAL: &str = "mustNotBeEqual";
pub const MUST_BE_EQUAL: &str = "mustBeEqual";

pub const ARE_NOT_EQUAL: &str = "areNotEqual";
pub const MUST_NOT_EQUAL: &str = "mustNotEqual";

pub fn must_not_be_equal_catalog() -> ErrorCatalog {
    catalog([(ARE_NOT_EQUAL, "The compared values must not be equal.")])
}

pub fn must_be_equal_catalog() -> ErrorCatalog {
    catalog([(MUST_NOT_EQUAL, "The compared values must be equal.")])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EqualityType {
    /// Every value is identical to the first.
    All,
    /// At least two values are identical.
    Some,
}

impl EqualityType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "all" => Some(Self::All),
            "some" => Some(Self::Some),
            _ => None,
        }
    }

    /// Reads `equalityType`; absent or unknown values mean `All`.
    pub fn from_options(options: &ValidatorOptions) -> Self {
        match options.get("equalityType") {
            None => Self::All,
            Some(value) => match value.as_str().and_then(Self::from_name) {
                Some(kind) => kind,
                None => {
                    log::warn!("Unknown equalityType {}, comparing with 'all'", value);
                    Self::All
                }
            },
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::All => Self::Some,
            Self::Some => Self::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Some => "some",
        }
    }
}

impl fmt::Display for EqualityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compares node values. Fewer than two nodes never compare equal.
pub fn compare_values(nodes: &[NodeRef<'_>], equality: EqualityType) -> bool {
    if nodes.len() < 2 {
        return false;
    }

    let values: Vec<String> = nodes.iter().map(NodeRef::value).collect();
    match equality {
        EqualityType::All => values.iter().all_equal(),
        EqualityType::Some => values.iter().duplicates().next().is_some(),
    }
}

/// Fails with `areNotEqual` when the nodes reached through `options.targets`
/// compare equal.
pub struct MustNotBeEqual {
    resolver: Arc<PathResolver>,
}

impl MustNotBeEqual {
    pub fn new(resolver: Arc<PathResolver>) -> Self {
        Self { resolver }
    }

    pub fn check(&self, options: &ValidatorOptions, node: NodeRef<'_>, equality: EqualityType) -> Vec<SubError> {
        let compared = self.resolve_targets(options, node);
        log::trace!(
            "{} comparing {} node(s) with '{}'",
            node,
            compared.len(),
            equality
        );

        if compare_values(&compared, equality) {
            vec![SubError::new(ARE_NOT_EQUAL)]
        } else {
            Vec::new()
        }
    }

    fn resolve_targets<'t>(&self, options: &ValidatorOptions, node: NodeRef<'t>) -> Vec<NodeRef<'t>> {
        let targets = options.string_list("targets");
        if targets.is_empty() {
            log::warn!("Equality check on {} has no 'targets'", node);
        }

        let mut compared = Vec::new();
        for target in &targets {
            match self.resolver.resolve_from(node, target) {
                Ok(nodes) => compared.extend(nodes),
                Err(e) => log::warn!("Skipping target '{}' of {}: {}", target, node, e),
            }
        }
        compared
    }
}

impl Validator for MustNotBeEqual {
    fn apply(&self, _value: &str, options: &ValidatorOptions, node: NodeRef<'_>) -> Vec<SubError> {
        self.check(options, node, EqualityType::from_options(options))
    }
}

/// The complement of [`MustNotBeEqual`]: runs it with the equality type
/// flipped and fails with `mustNotEqual` when it reports nothing.
pub struct MustBeEqual {
    inner: MustNotBeEqual,
}

impl MustBeEqual {
    pub fn new(resolver: Arc<PathResolver>) -> Self {
        Self {
            inner: MustNotBeEqual::new(resolver),
        }
    }
}

impl Validator for MustBeEqual {
    fn apply(&self, _value: &str, options: &ValidatorOptions, node: NodeRef<'_>) -> Vec<SubError> {
        let equality = EqualityType::from_options(options).flipped();
        if self.inner.check(options, node, equality).is_empty() {
            vec![SubError::new(MUST_NOT_EQUAL)]
        } else {
            Vec::new()
        }
    }
}
