// Wed Oct 14 2026 - Alex

pub mod equality;
pub mod number;
pub mod pattern;
pub mod range;

pub use equality::{compare_values, EqualityType, MustBeEqual, MustNotBeEqual};
pub use number::NumberValidator;
pub use pattern::PatternValidator;
pub use range::RangeValidator;

use crate::path::PathResolver;
use crate::registry::{ErrorCatalog, RegistrationError, Validator, ValidatorRegistry};
use std::sync::Arc;

/// Registers the built-in validators. Names already taken are left alone.
pub fn register_builtins(registry: &ValidatorRegistry, resolver: Arc<PathResolver>) {
    let builtins: [(&str, Arc<dyn Validator>, ErrorCatalog); 5] = [
        (number::NAME, Arc::new(NumberValidator), number::default_catalog()),
        (range::NAME, Arc::new(RangeValidator), range::default_catalog()),
        (pattern::NAME, Arc::new(PatternValidator::new()), pattern::default_catalog()),
        (
            equality::MUST_NOT_BE_EQUAL,
            Arc::new(MustNotBeEqual::new(resolver.clone())),
            equality::must_not_be_equal_catalog(),
        ),
        (
            equality::MUST_BE_EQUAL,
            Arc::new(MustBeEqual::new(resolver)),
            equality::must_be_equal_catalog(),
        ),
    ];

    for (name, validator, catalog) in builtins {
        match registry.register_arc(name, validator, Some(catalog)) {
            Ok(()) => {}
            Err(RegistrationError::AlreadyRegistered(name)) => {
                log::debug!("Built-in '{}' already registered, keeping existing", name)
            }
            Err(e) => log::warn!("{}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{SubError, ValidatorOptions};
    use crate::tree::{Document, ElementSpec};

    #[test]
    fn test_builtins_run_through_registry() {
        let registry = ValidatorRegistry::new();
        register_builtins(&registry, Arc::new(PathResolver::new()));

        let doc = Document::from_elements(vec![ElementSpec::new("input").with_value("9-7")]);
        let node = doc.node(doc.find("input").unwrap().unwrap());

        let range = registry.lookup("range").unwrap();
        assert_eq!(range.apply("9-7", &ValidatorOptions::new(), node), vec![SubError::new("range")]);
        assert!(range.default_message("noSpaces").is_some());
    }

    #[test]
    fn test_register_builtins_twice_is_harmless() {
        let registry = ValidatorRegistry::with_builtins();
        register_builtins(&registry, Arc::new(PathResolver::new()));
        assert_eq!(registry.len(), 5);
    }
}
