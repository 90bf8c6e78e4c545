// Common validation types and traits

use async_trait::async_trait;
use serde::Serialize;

// ============================================================================
// Raw outcome (what a validator produces)
// ============================================================================

/// A single failed rule as reported by a validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    pub property_name: Option<String>,
    pub error_message: Option<String>,
}

/// Unprocessed verdict of a validator run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub failures: Vec<ValidationFailure>,
}

impl ValidationOutcome {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            failures: Vec::new(),
        }
    }

    pub fn add_failure(&mut self, field: &str, message: &str) {
        self.is_valid = false;
        self.failures.push(ValidationFailure {
            property_name: Some(field.to_string()),
            error_message: Some(message.to_string()),
        });
    }

    pub fn merge(&mut self, other: ValidationOutcome) {
        if !other.is_valid {
            self.is_valid = false;
            self.failures.extend(other.failures);
        }
    }
}

impl Default for ValidationOutcome {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Result model (what callers receive)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    #[serde(rename = "propertyName")]
    pub field: Option<String>,
    pub message: Option<String>,
}

/// Uniform pass/fail value handed back to callers.
///
/// `is_valid == (error_count == 0)` and `errors.len() == error_count` always
/// hold; the only way to obtain an invalid result is [`ValidationResult::from_outcome`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    is_valid: bool,
    error_count: usize,
    #[serde(rename = "errorMessage")]
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            error_count: 0,
            errors: Vec::new(),
        }
    }

    /// Shapes a raw validator outcome into a result, preserving failure order.
    pub fn from_outcome(outcome: ValidationOutcome) -> Self {
        if outcome.is_valid {
            return Self::new();
        }

        let errors: Vec<ValidationError> = outcome
            .failures
            .into_iter()
            .map(|failure| ValidationError {
                field: failure.property_name,
                message: failure.error_message,
            })
            .collect();

        Self {
            is_valid: errors.is_empty(),
            error_count: errors.len(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ValidationOutcome> for ValidationResult {
    fn from(outcome: ValidationOutcome) -> Self {
        Self::from_outcome(outcome)
    }
}

/// Rule set for one validatable type.
///
/// `Ok` carries the verdict on the data, however bad the data is. `Err` is
/// reserved for the validator itself failing, e.g. a lookup it depends on.
#[async_trait]
pub trait Validator<T: ?Sized + Sync>: Send + Sync {
    async fn validate(&self, data: &T) -> anyhow::Result<ValidationOutcome>;
}
