// src/validation/container.rs
//! Minimal service container: contracts are keyed by `TypeId` and resolved
//! as `Arc<S>`, where `S` is usually a trait object such as `dyn Validator<T>`.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::{debug, warn};

use super::lifetime::ServiceLifetime;

type Instance = Arc<dyn Any + Send + Sync>;
type Factory = Arc<dyn Fn(&ServiceProvider) -> Instance + Send + Sync>;

// ============================================================================
// Descriptors
// ============================================================================

/// One registration. Shared between every provider built from the same
/// collection so singletons are constructed once.
struct ServiceDescriptor {
    contract: TypeId,
    contract_name: &'static str,
    lifetime: ServiceLifetime,
    factory: Factory,
    singleton: OnceLock<Instance>,
}

impl std::fmt::Debug for ServiceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceDescriptor")
            .field("contract", &self.contract_name)
            .field("lifetime", &self.lifetime)
            .field("constructed", &self.singleton.get().is_some())
            .finish()
    }
}

// ============================================================================
// Collection (startup, mutable)
// ============================================================================

#[derive(Default, Debug)]
pub struct ServiceCollection {
    descriptors: Vec<Arc<ServiceDescriptor>>,
}

impl ServiceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` as the provider of `Arc<S>` under `lifetime`.
    /// Re-registering a contract overrides the earlier entry.
    pub fn add<S, F>(&mut self, lifetime: ServiceLifetime, factory: F) -> &mut Self
    where
        S: ?Sized + Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Arc<S> + Send + Sync + 'static,
    {
        let contract = TypeId::of::<S>();
        if let Some(previous) = self.descriptors.iter().rev().find(|d| d.contract == contract) {
            warn!(
                contract = %type_name::<S>(),
                previous_lifetime = %previous.lifetime,
                lifetime = %lifetime,
                "Duplicate registration, last one wins"
            );
        }

        let factory: Factory =
            Arc::new(move |provider: &ServiceProvider| Arc::new(factory(provider)) as Instance);

        self.descriptors.push(Arc::new(ServiceDescriptor {
            contract,
            contract_name: type_name::<S>(),
            lifetime,
            factory,
            singleton: OnceLock::new(),
        }));
        self
    }

    pub fn add_singleton<S, F>(&mut self, factory: F) -> &mut Self
    where
        S: ?Sized + Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Arc<S> + Send + Sync + 'static,
    {
        self.add(ServiceLifetime::Singleton, factory)
    }

    pub fn add_scoped<S, F>(&mut self, factory: F) -> &mut Self
    where
        S: ?Sized + Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Arc<S> + Send + Sync + 'static,
    {
        self.add(ServiceLifetime::Scoped, factory)
    }

    pub fn add_transient<S, F>(&mut self, factory: F) -> &mut Self
    where
        S: ?Sized + Send + Sync + 'static,
        F: Fn(&ServiceProvider) -> Arc<S> + Send + Sync + 'static,
    {
        self.add(ServiceLifetime::Transient, factory)
    }

    /// Register an already constructed singleton
    pub fn add_instance<S>(&mut self, instance: Arc<S>) -> &mut Self
    where
        S: ?Sized + Send + Sync + 'static,
    {
        self.add(ServiceLifetime::Singleton, move |_| instance.clone())
    }

    pub fn contains<S: ?Sized + 'static>(&self) -> bool {
        let contract = TypeId::of::<S>();
        self.descriptors.iter().any(|d| d.contract == contract)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Freeze the registrations made so far into a provider.
    /// Later registrations on this collection do not affect it.
    pub fn build_provider(&self) -> Arc<ServiceProvider> {
        let mut descriptors: HashMap<TypeId, Arc<ServiceDescriptor>> = HashMap::new();

        for descriptor in &self.descriptors {
            descriptors.insert(descriptor.contract, descriptor.clone());
        }

        debug!(services = descriptors.len(), "Service provider built");

        Arc::new(ServiceProvider {
            descriptors,
            root_scope: ScopeCache::default(),
        })
    }
}

// ============================================================================
// Provider (frozen) and scopes
// ============================================================================

#[derive(Default)]
struct ScopeCache {
    instances: Mutex<HashMap<TypeId, Instance>>,
}

impl ScopeCache {
    fn get_or_create(&self, contract: TypeId, create: impl FnOnce() -> Instance) -> Instance {
        if let Some(existing) = self.lookup(contract) {
            return existing;
        }

        // The factory may resolve other scoped services, so it runs unlocked.
        let created = create();
        let mut instances = match self.instances.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        instances.entry(contract).or_insert(created).clone()
    }

    fn lookup(&self, contract: TypeId) -> Option<Instance> {
        let instances = match self.instances.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        instances.get(&contract).cloned()
    }
}

pub struct ServiceProvider {
    descriptors: HashMap<TypeId, Arc<ServiceDescriptor>>,
    root_scope: ScopeCache,
}

impl ServiceProvider {
    /// Resolve `Arc<S>` from the root scope
    pub fn get_service<S: ?Sized + 'static>(&self) -> Option<Arc<S>> {
        self.resolve::<S>(&self.root_scope)
    }

    pub fn contains<S: ?Sized + 'static>(&self) -> bool {
        self.descriptors.contains_key(&TypeId::of::<S>())
    }

    pub fn lifetime_of<S: ?Sized + 'static>(&self) -> Option<ServiceLifetime> {
        self.descriptors
            .get(&TypeId::of::<S>())
            .map(|descriptor| descriptor.lifetime)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn create_scope(self: &Arc<Self>) -> ServiceScope {
        ServiceScope {
            provider: self.clone(),
            cache: ScopeCache::default(),
        }
    }

    fn resolve<S: ?Sized + 'static>(&self, scope: &ScopeCache) -> Option<Arc<S>> {
        let descriptor = self.descriptors.get(&TypeId::of::<S>())?;

        let instance = match descriptor.lifetime {
            ServiceLifetime::Singleton => descriptor
                .singleton
                .get_or_init(|| (descriptor.factory)(self))
                .clone(),
            ServiceLifetime::Scoped => {
                scope.get_or_create(descriptor.contract, || (descriptor.factory)(self))
            }
            ServiceLifetime::Transient => (descriptor.factory)(self),
        };

        instance.downcast_ref::<Arc<S>>().cloned()
    }
}

impl std::fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut contracts: Vec<_> = self
            .descriptors
            .values()
            .map(|descriptor| descriptor.contract_name)
            .collect();
        contracts.sort_unstable();
        f.debug_struct("ServiceProvider")
            .field("contracts", &contracts)
            .finish()
    }
}

/// Scoped services resolved through the same scope share one instance
pub struct ServiceScope {
    provider: Arc<ServiceProvider>,
    cache: ScopeCache,
}

impl ServiceScope {
    pub fn get_service<S: ?Sized + 'static>(&self) -> Option<Arc<S>> {
        self.provider.resolve::<S>(&self.cache)
    }
}
