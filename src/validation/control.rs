// src/validation/control.rs

use std::any::type_name;
use std::sync::Arc;
use tracing::{debug, error};

use super::container::{ServiceProvider, ServiceScope};
use super::error::ValidationConfigError;
use super::registry::ValidatorBase;
use crate::common::{ValidationResult, Validator};

/// Resolves the validator bound to a type and runs it.
///
/// Holds nothing but a frozen provider, so one instance can serve any number
/// of concurrent requests. Scoped validators are shared per [`ServiceScope`]
/// when the `_in` variants are used, and per provider otherwise.
#[derive(Debug, Clone)]
pub struct ValidatorControl {
    provider: Arc<ServiceProvider>,
}

impl ValidatorControl {
    pub fn new(provider: Arc<ServiceProvider>) -> Self {
        Self { provider }
    }

    /// Open a scope (typically one per request) over this control's provider
    pub fn create_scope(&self) -> ServiceScope {
        self.provider.create_scope()
    }

    pub fn get_validator<T>(&self) -> Result<Arc<dyn Validator<T>>, ValidationConfigError>
    where
        T: ValidatorBase,
    {
        bound_validator(self.provider.get_service::<dyn Validator<T>>())
    }

    pub fn get_validator_in<T>(
        &self,
        scope: &ServiceScope,
    ) -> Result<Arc<dyn Validator<T>>, ValidationConfigError>
    where
        T: ValidatorBase,
    {
        bound_validator(scope.get_service::<dyn Validator<T>>())
    }

    /// Validate `request` with the validator bound to `T`
    pub async fn request_validate<T>(&self, request: &T) -> Result<ValidationResult, ValidationConfigError>
    where
        T: ValidatorBase,
    {
        let validator = self.get_validator::<T>()?;
        run_validator(validator, request).await
    }

    /// Same as [`request_validate`](Self::request_validate), resolving through `scope`
    pub async fn request_validate_in<T>(
        &self,
        scope: &ServiceScope,
        request: &T,
    ) -> Result<ValidationResult, ValidationConfigError>
    where
        T: ValidatorBase,
    {
        let validator = self.get_validator_in::<T>(scope)?;
        run_validator(validator, request).await
    }
}

fn bound_validator<T: ValidatorBase>(
    validator: Option<Arc<dyn Validator<T>>>,
) -> Result<Arc<dyn Validator<T>>, ValidationConfigError> {
    validator.ok_or_else(|| {
        error!(target_type = %type_name::<T>(), "Validator not registered");
        ValidationConfigError::UnregisteredValidator(type_name::<T>())
    })
}

async fn run_validator<T: ValidatorBase>(
    validator: Arc<dyn Validator<T>>,
    request: &T,
) -> Result<ValidationResult, ValidationConfigError> {
    let outcome = validator
        .validate(request)
        .await
        .map_err(|source| ValidationConfigError::ValidatorFault {
            type_name: type_name::<T>(),
            source,
        })?;

    let result = ValidationResult::from_outcome(outcome);
    debug!(
        target_type = %type_name::<T>(),
        is_valid = result.is_valid(),
        error_count = result.error_count(),
        "Request validated"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::ValidationOutcome;
    use crate::validation::container::ServiceCollection;
    use async_trait::async_trait;
    use futures::future::join_all;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, PartialEq)]
    struct Signup {
        username: String,
    }

    impl ValidatorBase for Signup {}

    struct Unbound;

    impl ValidatorBase for Unbound {}

    struct SignupValidator;

    #[async_trait]
    impl Validator<Signup> for SignupValidator {
        async fn validate(&self, data: &Signup) -> anyhow::Result<ValidationOutcome> {
            // Stand-in for a uniqueness lookup
            tokio::task::yield_now().await;

            let mut outcome = ValidationOutcome::new();
            if data.username.len() < 3 {
                outcome.add_failure("username", "Username is too short");
            }
            if data.username == "admin" {
                outcome.add_failure("username", "Username is taken");
            }
            Ok(outcome)
        }
    }

    struct BrokenValidator;

    #[async_trait]
    impl Validator<Signup> for BrokenValidator {
        async fn validate(&self, _data: &Signup) -> anyhow::Result<ValidationOutcome> {
            anyhow::bail!("user store unavailable")
        }
    }

    fn control_with(validator: Arc<dyn Validator<Signup>>) -> ValidatorControl {
        let mut services = ServiceCollection::new();
        services.add_instance(validator);
        ValidatorControl::new(services.build_provider())
    }

    #[tokio::test]
    async fn test_valid_request() {
        let control = control_with(Arc::new(SignupValidator));
        let result = control
            .request_validate(&Signup {
                username: "ferris".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result, ValidationResult::default());
    }

    #[tokio::test]
    async fn test_invalid_request_is_data_not_error() {
        let control = control_with(Arc::new(SignupValidator));
        let result = control
            .request_validate(&Signup {
                username: "ad".to_string(),
            })
            .await
            .unwrap();

        assert!(!result.is_valid());
        assert_eq!(result.error_count(), 1);
    }

    #[tokio::test]
    async fn test_unregistered_type_fails() {
        let control = control_with(Arc::new(SignupValidator));

        let err = control.request_validate(&Unbound).await.unwrap_err();
        assert!(err.is_unregistered());
        assert!(err.to_string().contains("Unbound"));
        assert!(control.get_validator::<Unbound>().is_err());
    }

    #[tokio::test]
    async fn test_empty_container_never_reports_valid() {
        let control = ValidatorControl::new(ServiceCollection::new().build_provider());
        let outcome = control
            .request_validate(&Signup {
                username: "ferris".to_string(),
            })
            .await;

        assert!(matches!(
            outcome,
            Err(ValidationConfigError::UnregisteredValidator(_))
        ));
    }

    #[tokio::test]
    async fn test_validator_fault_is_distinct_from_unregistered() {
        let control = control_with(Arc::new(BrokenValidator));
        let err = control
            .request_validate(&Signup {
                username: "ferris".to_string(),
            })
            .await
            .unwrap_err();

        assert!(!err.is_unregistered());
        match err {
            ValidationConfigError::ValidatorFault { type_name, source } => {
                assert!(type_name.ends_with("Signup"));
                assert_eq!(source.to_string(), "user store unavailable");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_repeated_validation_is_idempotent() {
        let control = control_with(Arc::new(SignupValidator));
        let request = Signup {
            username: "admin".to_string(),
        };

        let first = control.request_validate(&request).await.unwrap();
        let second = control.request_validate(&request).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.error_count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_validations_do_not_interfere() {
        let control = Arc::new(control_with(Arc::new(SignupValidator)));
        let requests: Vec<Signup> = ["ab", "ferris", "admin", "crab"]
            .iter()
            .map(|name| Signup {
                username: name.to_string(),
            })
            .collect();

        let handles = requests.into_iter().map(|request| {
            let control = control.clone();
            tokio::spawn(async move { control.request_validate(&request).await })
        });

        let results: Vec<ValidationResult> = join_all(handles)
            .await
            .into_iter()
            .map(|joined| joined.unwrap().unwrap())
            .collect();

        let validity: Vec<bool> = results.iter().map(|r| r.is_valid()).collect();
        assert_eq!(validity, vec![false, true, false, true]);
    }

    #[tokio::test]
    async fn test_scoped_validator_built_once_per_scope() {
        let built = Arc::new(AtomicUsize::new(0));
        let counter = built.clone();
        let mut services = ServiceCollection::new();
        services.add_scoped::<dyn Validator<Signup>, _>(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Arc::new(SignupValidator)
        });
        let control = ValidatorControl::new(services.build_provider());
        let request = Signup {
            username: "ferris".to_string(),
        };

        let first_request = control.create_scope();
        control.request_validate_in(&first_request, &request).await.unwrap();
        control.request_validate_in(&first_request, &request).await.unwrap();
        assert_eq!(built.load(Ordering::SeqCst), 1);

        let second_request = control.create_scope();
        let result = control
            .request_validate_in(&second_request, &request)
            .await
            .unwrap();
        assert!(result.is_valid());
        assert_eq!(built.load(Ordering::SeqCst), 2);

        let a = control.get_validator_in::<Signup>(&first_request).unwrap();
        let b = control.get_validator_in::<Signup>(&second_request).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn test_scoped_lookup_of_unbound_type_fails() {
        let control = control_with(Arc::new(SignupValidator));
        let scope = control.create_scope();

        let err = control
            .request_validate_in(&scope, &Unbound)
            .await
            .unwrap_err();
        assert!(err.is_unregistered());
    }
}
