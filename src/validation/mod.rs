// src/validation/mod.rs
//
// Validator registration and dispatch: a small service container, the
// startup-time registry that fills it, and the two ways of running a
// validator against a request.

pub mod container;
pub mod control;
pub mod error;
pub mod extensions;
pub mod lifetime;
pub mod registry;

// Re-export commonly used types for convenience
pub use container::{ServiceCollection, ServiceProvider, ServiceScope};
pub use control::ValidatorControl;
pub use error::ValidationConfigError;
pub use extensions::{request_validate, ValidatorExt};
pub use lifetime::ServiceLifetime;
pub use registry::{
    add_validation, add_validator_control, init_validator_service, Validatable, ValidatorBase,
    ValidatorBinding, ValidatorModule,
};
