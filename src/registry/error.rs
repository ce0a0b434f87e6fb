// Wed Oct 14 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Invalid validator name: '{0}'")]
    InvalidName(String),
    #[error("Validator already registered: {0}")]
    AlreadyRegistered(String),
}
