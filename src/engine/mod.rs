// Thu Oct 15 2026 - Alex

pub mod core;
pub mod error;
pub mod record;
pub mod rule;
pub mod store;

pub use self::core::Engine;
pub use error::EngineError;
pub use record::{Diagnostic, ErrorRecord, ValidationOutcome};
pub use rule::{CombinationMode, RuleId, RuleTarget, ValidationRule, ValidatorBinding};
pub use store::RuleStore;
