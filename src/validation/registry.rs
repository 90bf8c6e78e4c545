// src/validation/registry.rs
//! Startup-time registration of validators.
//!
//! Each module exposes a table of [`ValidatorBinding`]s through a
//! [`ValidatorModule`]; [`add_validation`] walks the tables, registers every
//! validator as `Arc<dyn Validator<T>>` under its declared lifetime and then
//! registers a [`ValidatorControl`] bound to a snapshot of the container.

use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info};

use super::container::ServiceCollection;
use super::control::ValidatorControl;
use super::error::ValidationConfigError;
use super::lifetime::ServiceLifetime;
use crate::common::Validator;

/// Marks a type as something a validator may be run against
pub trait ValidatorBase: Send + Sync + 'static {}

/// Names the validator bound to a validatable type
pub trait Validatable: ValidatorBase + Sized {
    type Validator: Validator<Self> + Default + 'static;

    const LIFETIME: ServiceLifetime = ServiceLifetime::Scoped;
}

// ============================================================================
// Bindings
// ============================================================================

type Register = Box<dyn Fn(&mut ServiceCollection, ServiceLifetime) + Send + Sync>;

struct ValidatorFactory {
    name: &'static str,
    register: Register,
}

/// `{validatable type -> validator type, lifetime}`
pub struct ValidatorBinding {
    target: &'static str,
    lifetime: ServiceLifetime,
    validator: Option<ValidatorFactory>,
}

impl ValidatorBinding {
    /// Binding declared by the type's `Validatable` impl
    pub fn of<T: Validatable>() -> Self {
        Self::for_type::<T>()
            .lifetime(T::LIFETIME)
            .validator::<T::Validator>()
            .build()
    }

    pub fn for_type<T: ValidatorBase>() -> BindingBuilder<T> {
        BindingBuilder {
            lifetime: ServiceLifetime::default(),
            validator: None,
            _target: PhantomData,
        }
    }

    pub fn target(&self) -> &'static str {
        self.target
    }

    pub fn lifetime(&self) -> ServiceLifetime {
        self.lifetime
    }

    pub fn validator_name(&self) -> Option<&'static str> {
        self.validator.as_ref().map(|v| v.name)
    }
}

impl fmt::Debug for ValidatorBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorBinding")
            .field("target", &self.target)
            .field("validator", &self.validator_name())
            .field("lifetime", &self.lifetime)
            .finish()
    }
}

/// Typed builder so a validator can only be bound to the type it checks
pub struct BindingBuilder<T> {
    lifetime: ServiceLifetime,
    validator: Option<ValidatorFactory>,
    _target: PhantomData<fn() -> T>,
}

impl<T: ValidatorBase> BindingBuilder<T> {
    pub fn lifetime(mut self, lifetime: ServiceLifetime) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn validator<V>(mut self) -> Self
    where
        V: Validator<T> + Default + 'static,
    {
        self.validator = Some(ValidatorFactory {
            name: type_name::<V>(),
            register: Box::new(|services: &mut ServiceCollection, lifetime: ServiceLifetime| {
                services.add::<dyn Validator<T>, _>(lifetime, |_| Arc::new(V::default()));
            }),
        });
        self
    }

    pub fn build(self) -> ValidatorBinding {
        ValidatorBinding {
            target: type_name::<T>(),
            lifetime: self.lifetime,
            validator: self.validator,
        }
    }
}

// ============================================================================
// Modules
// ============================================================================

/// A unit of registration: one function listing a module's bindings
#[derive(Clone, Copy)]
pub struct ValidatorModule {
    name: &'static str,
    bindings: fn() -> Vec<ValidatorBinding>,
}

impl ValidatorModule {
    pub const fn new(name: &'static str, bindings: fn() -> Vec<ValidatorBinding>) -> Self {
        Self { name, bindings }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn bindings(&self) -> Vec<ValidatorBinding> {
        (self.bindings)()
    }
}

impl fmt::Debug for ValidatorModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorModule")
            .field("name", &self.name)
            .finish()
    }
}

// ============================================================================
// Registration
// ============================================================================

/// Register validators and a `ValidatorControl` in one call
pub fn add_validation<I>(
    services: &mut ServiceCollection,
    modules: I,
) -> Result<&mut ServiceCollection, ValidationConfigError>
where
    I: IntoIterator<Item = ValidatorModule>,
{
    init_validator_service(services, modules)?;
    add_validator_control(services);
    Ok(services)
}

/// Register every binding of `modules` into `services`.
///
/// Running this twice appends the bindings again; the provider keeps the last
/// registration per validatable type.
pub fn init_validator_service<I>(
    services: &mut ServiceCollection,
    modules: I,
) -> Result<&mut ServiceCollection, ValidationConfigError>
where
    I: IntoIterator<Item = ValidatorModule>,
{
    let modules: Vec<ValidatorModule> = modules.into_iter().collect();
    if modules.is_empty() {
        return Err(ValidationConfigError::Configuration(
            "modules cannot be empty".to_string(),
        ));
    }

    let bindings: Vec<(&'static str, ValidatorBinding)> = modules
        .iter()
        .flat_map(|module| {
            module
                .bindings()
                .into_iter()
                .map(move |binding| (module.name, binding))
        })
        .collect();

    // Reject the whole batch before touching the collection
    if let Some((module, binding)) = bindings.iter().find(|(_, b)| b.validator.is_none()) {
        return Err(ValidationConfigError::Configuration(format!(
            "binding for '{}' in module '{}' has no validator type",
            binding.target, module
        )));
    }

    if bindings.is_empty() {
        debug!(modules = modules.len(), "No validator bindings found");
        return Ok(services);
    }

    for (module, binding) in &bindings {
        if let Some(validator) = &binding.validator {
            (validator.register)(services, binding.lifetime);
            info!(
                module = %module,
                validatable = %binding.target,
                validator = %validator.name,
                lifetime = %binding.lifetime,
                "Validator registered"
            );
        }
    }

    info!(
        modules = modules.len(),
        validators = bindings.len(),
        "Validator registration complete"
    );

    Ok(services)
}

/// Register a singleton `ValidatorControl` over the registrations made so far
pub fn add_validator_control(services: &mut ServiceCollection) -> &mut ServiceCollection {
    let control = Arc::new(ValidatorControl::new(services.build_provider()));
    services.add_instance(control)
}
