//! Error types for artifact validation

use thiserror::Error;

use crate::artifact::RegistryError;
use crate::config::ConfigError;
use crate::loader::LoadError;
use crate::validator::ValidatorError;

/// Result type for validation runs
pub type Result<T> = std::result::Result<T, ValidateError>;

/// Exit status for a conformant document
pub const EXIT_OK: u8 = 0;
/// Exit status for a nonconformant, missing or malformed document
pub const EXIT_FAILURE: u8 = 1;
/// Exit status for a bad invocation or an unusable artifact type
pub const EXIT_USAGE: u8 = 2;

/// Every way a validation run can stop short of a verdict
#[derive(Error, Debug)]
pub enum ValidateError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Validator(#[from] ValidatorError),

    #[error("Error: Invalid configuration - {0}")]
    Config(#[from] ConfigError),
}

impl ValidateError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            ValidateError::Registry(_) => EXIT_USAGE,
            ValidateError::Load(_) | ValidateError::Validator(_) | ValidateError::Config(_) => {
                EXIT_FAILURE
            }
        }
    }

    /// Whether usage guidance should follow the message
    pub fn wants_usage(&self) -> bool {
        matches!(self, ValidateError::Registry(_))
    }
}
