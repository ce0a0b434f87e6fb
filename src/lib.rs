// Thu Oct 15 2026 - Alex

pub mod config;
pub mod engine;
pub mod path;
pub mod registry;
pub mod report;
pub mod tree;
pub mod utils;
pub mod validators;

pub use config::{ConfigError, EngineConfig, RulesFile};
pub use engine::{
    CombinationMode, Engine, EngineError, ErrorRecord, ValidationOutcome, ValidationRule,
    ValidatorBinding,
};
pub use path::{resolve, PathError, PathResolver};
pub use registry::{RegistrationError, SubError, Validator, ValidatorOptions, ValidatorRegistry};
pub use report::ValidationReport;
pub use tree::{Document, ElementSpec, NodeId, NodeRef, TreeAccess, TreeError};
