// src/validation/error.rs

use thiserror::Error;

/// Defects in how validators are wired up.
///
/// None of these describe bad request data; that is always reported through
/// a `ValidationResult`.
#[derive(Debug, Error)]
pub enum ValidationConfigError {
    #[error("Validator configuration error: {0}")]
    Configuration(String),

    #[error("Validator not registered for '{0}'")]
    UnregisteredValidator(&'static str),

    #[error("Validator for '{type_name}' failed: {source}")]
    ValidatorFault {
        type_name: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl ValidationConfigError {
    pub fn is_unregistered(&self) -> bool {
        matches!(self, ValidationConfigError::UnregisteredValidator(_))
    }
}
