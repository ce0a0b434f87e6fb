// Wed Oct 14 2026 - Alex

pub mod error;
pub mod options;
pub mod validator;

pub use error::RegistrationError;
pub use options::ValidatorOptions;
pub use validator::{FnValidator, SubError, Validator};

use crate::path::PathResolver;
use crate::tree::NodeRef;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Error type -> message.
pub type ErrorCatalog = IndexMap<String, String>;

pub fn catalog<const N: usize>(entries: [(&str, &str); N]) -> ErrorCatalog {
    entries
        .into_iter()
        .map(|(kind, message)| (kind.to_string(), message.to_string()))
        .collect()
}

#[derive(Clone)]
pub struct RegistryEntry {
    name: String,
    validator: Arc<dyn Validator>,
    catalog: ErrorCatalog,
}

impl RegistryEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn validator(&self) -> &Arc<dyn Validator> {
        &self.validator
    }

    pub fn catalog(&self) -> &ErrorCatalog {
        &self.catalog
    }

    pub fn default_message(&self, kind: &str) -> Option<&str> {
        self.catalog.get(kind).map(String::as_str)
    }

    pub fn apply(&self, value: &str, options: &ValidatorOptions, node: NodeRef<'_>) -> Vec<SubError> {
        self.validator.apply(value, options, node)
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("name", &self.name)
            .field("catalog", &self.catalog)
            .finish()
    }
}

/// Name -> validator table shared by every rule of an engine.
///
/// Registration takes the write lock, so of two racing registrations for the
/// same name exactly one succeeds. Names are never replaced or removed.
pub struct ValidatorRegistry {
    entries: RwLock<IndexMap<String, RegistryEntry>>,
}

impl ValidatorRegistry {
    /// An empty registry. See [`with_builtins`](Self::with_builtins).
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(IndexMap::new()),
        }
    }

    pub fn with_builtins() -> Self {
        Self::with_builtins_using(Arc::new(PathResolver::new()))
    }

    /// Built-ins whose cross-element validators share `resolver`.
    pub fn with_builtins_using(resolver: Arc<PathResolver>) -> Self {
        let registry = Self::new();
        crate::validators::register_builtins(&registry, resolver);
        registry
    }

    pub fn register<V>(
        &self,
        name: &str,
        validator: V,
        catalog: Option<ErrorCatalog>,
    ) -> Result<(), RegistrationError>
    where
        V: Validator + 'static,
    {
        self.register_arc(name, Arc::new(validator), catalog)
    }

    pub fn register_fn<F>(
        &self,
        name: &str,
        func: F,
        catalog: Option<ErrorCatalog>,
    ) -> Result<(), RegistrationError>
    where
        F: Fn(&str, &ValidatorOptions, NodeRef<'_>) -> Vec<SubError> + Send + Sync + 'static,
    {
        self.register(name, FnValidator::new(func), catalog)
    }

    pub fn register_arc(
        &self,
        name: &str,
        validator: Arc<dyn Validator>,
        catalog: Option<ErrorCatalog>,
    ) -> Result<(), RegistrationError> {
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(RegistrationError::InvalidName(name.to_string()));
        }

        let mut entries = self.entries.write();
        if entries.contains_key(name) {
            return Err(RegistrationError::AlreadyRegistered(name.to_string()));
        }

        entries.insert(
            name.to_string(),
            RegistryEntry {
                name: name.to_string(),
                validator,
                catalog: catalog.unwrap_or_default(),
            },
        );
        log::debug!("Registered validator '{}'", name);
        Ok(())
    }

    /// Boolean flavour of [`register_fn`](Self::register_fn) for callers that
    /// only need to know whether the name was taken.
    pub fn register_validator<F>(&self, name: &str, func: F, catalog: Option<ErrorCatalog>) -> bool
    where
        F: Fn(&str, &ValidatorOptions, NodeRef<'_>) -> Vec<SubError> + Send + Sync + 'static,
    {
        match self.register_fn(name, func, catalog) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("{}", e);
                false
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<RegistryEntry> {
        self.entries.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    /// Names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
