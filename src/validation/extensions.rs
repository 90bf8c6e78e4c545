// src/validation/extensions.rs
//! Direct invocation for callers that already hold a validator

use async_trait::async_trait;
use std::any::type_name;
use tracing::warn;

use super::error::ValidationConfigError;
use super::registry::ValidatorBase;
use crate::common::{ValidationResult, Validator};

/// Run `validator` against `request`; an absent validator is a wiring defect
pub async fn request_validate<T>(
    validator: Option<&dyn Validator<T>>,
    request: &T,
) -> Result<ValidationResult, ValidationConfigError>
where
    T: ValidatorBase,
{
    match validator {
        Some(validator) => validator.request_validate(request).await,
        None => {
            warn!(target_type = %type_name::<T>(), "No validator supplied");
            Err(ValidationConfigError::UnregisteredValidator(type_name::<T>()))
        }
    }
}

#[async_trait]
pub trait ValidatorExt<T: ValidatorBase> {
    async fn request_validate(&self, request: &T) -> Result<ValidationResult, ValidationConfigError>;
}

#[async_trait]
impl<T, V> ValidatorExt<T> for V
where
    T: ValidatorBase,
    V: Validator<T> + ?Sized,
{
    async fn request_validate(&self, request: &T) -> Result<ValidationResult, ValidationConfigError> {
        let outcome = self
            .validate(request)
            .await
            .map_err(|source| ValidationConfigError::ValidatorFault {
                type_name: type_name::<T>(),
                source,
            })?;
        Ok(ValidationResult::from_outcome(outcome))
    }
}
