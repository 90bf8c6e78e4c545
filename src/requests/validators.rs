// src/requests/validators.rs

use async_trait::async_trait;
use std::sync::Arc;

use super::models::*;
use crate::common::{ValidationOutcome, Validator};
use crate::validation::ServiceProvider;

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 20;
const AGE_MIN: i32 = 0;
const AGE_MAX: i32 = 20;

// ============================================================================
// Test Request Validators
// ============================================================================

#[derive(Default)]
pub struct TestRequestValidator;

#[async_trait]
impl Validator<TestRequest> for TestRequestValidator {
    async fn validate(&self, data: &TestRequest) -> anyhow::Result<ValidationOutcome> {
        let mut outcome = ValidationOutcome::new();

        validate_non_positive(&mut outcome, "Num", data.num);
        validate_text_length(&mut outcome, "Length", &data.length);

        Ok(outcome)
    }
}

// ============================================================================
// Add Request Validators
// ============================================================================

#[derive(Default)]
pub struct AddRequestValidator;

#[async_trait]
impl Validator<AddRequest> for AddRequestValidator {
    async fn validate(&self, data: &AddRequest) -> anyhow::Result<ValidationOutcome> {
        let mut outcome = ValidationOutcome::new();

        validate_non_positive(&mut outcome, "Num", data.num);
        validate_text_length(&mut outcome, "Name", &data.name);

        if data.age > AGE_MAX {
            outcome.add_failure(
                "Age",
                &format!("Age must be less than or equal to {}", AGE_MAX),
            );
        } else if data.age < AGE_MIN {
            outcome.add_failure(
                "Age",
                &format!("Age must be greater than or equal to {}", AGE_MIN),
            );
        }

        Ok(outcome)
    }
}

// ============================================================================
// Resolved Validators
// ============================================================================

/// Validators resolved once at startup and handed to the handlers.
/// A `None` field means nothing was bound for that request type.
#[derive(Clone)]
pub struct RequestValidators {
    pub test_request: Option<Arc<dyn Validator<TestRequest>>>,
    pub add_request: Option<Arc<dyn Validator<AddRequest>>>,
    pub test_no_request: Option<Arc<dyn Validator<TestNoRequest>>>,
}

impl RequestValidators {
    pub fn init(provider: &ServiceProvider) -> Self {
        Self {
            test_request: provider.get_service::<dyn Validator<TestRequest>>(),
            add_request: provider.get_service::<dyn Validator<AddRequest>>(),
            test_no_request: provider.get_service::<dyn Validator<TestNoRequest>>(),
        }
    }
}

impl std::fmt::Debug for RequestValidators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestValidators")
            .field("test_request", &self.test_request.is_some())
            .field("add_request", &self.add_request.is_some())
            .field("test_no_request", &self.test_no_request.is_some())
            .finish()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn validate_non_positive(outcome: &mut ValidationOutcome, field: &str, value: i32) {
    if value > 0 {
        outcome.add_failure(field, &format!("{} must be less than or equal to 0", field));
    }
}

fn validate_text_length(outcome: &mut ValidationOutcome, field: &str, value: &str) {
    let chars = value.chars().count();

    if value.trim().is_empty() {
        outcome.add_failure(field, &format!("{} is required", field));
    } else if chars > NAME_MAX_CHARS {
        outcome.add_failure(
            field,
            &format!("{} must be {} characters or fewer", field, NAME_MAX_CHARS),
        );
    } else if chars < NAME_MIN_CHARS {
        outcome.add_failure(
            field,
            &format!("{} must be at least {} characters", field, NAME_MIN_CHARS),
        );
    }
}
