// src/lib.rs
//! Declarative validator registration and dispatch, plus the small web
//! service that demonstrates it.

pub mod app;
pub mod common;
pub mod logging_middleware;
pub mod requests;
pub mod validation;

pub use common::{ValidationError, ValidationOutcome, ValidationResult, Validator};
pub use validation::{
    add_validation, request_validate, ServiceCollection, ServiceLifetime, ServiceProvider,
    Validatable, ValidationConfigError, ValidatorBase, ValidatorBinding, ValidatorControl,
    ValidatorExt, ValidatorModule,
};
