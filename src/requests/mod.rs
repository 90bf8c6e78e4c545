// src/requests/mod.rs

pub mod handlers;
pub mod models;
pub mod routes;
pub mod validators;

#[cfg(test)]
mod tests;

use crate::validation::{ValidatorBinding, ValidatorModule};

// Re-export commonly used items
pub use models::*;
pub use routes::requests_routes;
pub use validators::RequestValidators;

/// Registration table for this module's validators
pub const VALIDATORS: ValidatorModule = ValidatorModule::new("requests", validator_bindings);

fn validator_bindings() -> Vec<ValidatorBinding> {
    vec![
        ValidatorBinding::of::<TestRequest>(),
        ValidatorBinding::of::<AddRequest>(),
    ]
}
