//! Core functionality for registering contracts and resolving their instances.

use crate::contract::{ContractDowncast, ContractId, Implementation, Resolvable};
use crate::error::{RegistrationError, ResolutionError};
use crate::lifecycle::Lifecycle;
use crate::registry::{ImplementationMetadata, RegistrationEntry, TypeRegistry};
use crate::resolver::{CastFunction, ContractResolver, InstanceAnyPtr};
use fxhash::FxHashSet;
use itertools::Itertools;
use std::any::TypeId;
use tracing::debug;

/// An inversion-of-control container: a [TypeRegistry] paired with a resolver which recursively
/// constructs the dependency graph needed to satisfy a requested contract. Instances are
/// obtained through the [ContractResolver] implementation or, more conveniently, through
/// [TypedContractResolver](crate::resolver::TypedContractResolver).
///
/// Registration and resolution take `&mut self`, so exclusive access is enforced statically and
/// the container itself holds no locks. For concurrent use, wrap the container in a
/// `Mutex`/`RwLock`; with the default `threadsafe` feature all instances are `Send + Sync`.
#[derive(Debug, Default)]
pub struct Container {
    registry: TypeRegistry,
    contracts_under_construction: FxHashSet<TypeId>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers implementation `I` for contract `C` with the given lifecycle. Assignability of
    /// `I` to `C` is enforced at compile time by the [ContractDowncast] bound. Replaces any
    /// previous registration for `C`, dropping its cached singleton instance if one exists.
    pub fn register<C, I>(&mut self, lifecycle: Lifecycle) -> Result<(), RegistrationError>
    where
        C: ContractDowncast<I> + ?Sized,
        I: Implementation,
    {
        self.registry.register(
            ContractId::of::<C>(),
            ImplementationMetadata::for_contract::<C, I>(),
            lifecycle,
        )
    }

    /// Registers pre-built metadata under `contract`, validating at runtime that the metadata
    /// was prepared for that contract. Useful for data-driven registration where the generic
    /// front-end cannot be used.
    pub fn register_with_metadata(
        &mut self,
        contract: ContractId,
        metadata: ImplementationMetadata,
        lifecycle: Lifecycle,
    ) -> Result<(), RegistrationError> {
        self.registry.register(contract, metadata, lifecycle)
    }

    /// Checks if a registration entry exists for contract `C`.
    #[inline]
    pub fn is_registered<C: Resolvable + ?Sized>(&self) -> bool {
        self.registry.is_registered(ContractId::of::<C>())
    }

    /// Access to the underlying registry.
    #[inline]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    fn obtain_instance(
        &mut self,
        entry: &RegistrationEntry,
        contract: ContractId,
    ) -> Result<InstanceAnyPtr, ResolutionError> {
        if self
            .contracts_under_construction
            .contains(&contract.type_id())
        {
            return Err(ResolutionError::CircularDependency(contract));
        }

        if let Some(instance) = entry.lifecycle.stored_instance(&entry.slot) {
            return Ok(instance);
        }

        self.contracts_under_construction.insert(contract.type_id());
        let instance = self.construct_instance(entry, contract);
        self.contracts_under_construction
            .remove(&contract.type_id());

        let instance = instance?;
        self.registry.store_instance(contract, instance.clone());

        Ok(instance)
    }

    fn construct_instance(
        &mut self,
        entry: &RegistrationEntry,
        contract: ContractId,
    ) -> Result<InstanceAnyPtr, ResolutionError> {
        let constructor = (entry.constructors)()
            .into_iter()
            .sorted_by_key(|constructor| constructor.parameters.len())
            .next()
            .ok_or(ResolutionError::NoPublicConstructor(entry.implementation))?;

        // before resolving anything, make sure the whole parameter list is registered, so a
        // missing dependency cannot leave some siblings already constructed
        if let Some(dependency) = constructor
            .parameters
            .iter()
            .find(|parameter| !self.registry.is_registered(**parameter))
        {
            return Err(ResolutionError::UnresolvableDependency {
                contract,
                implementation: entry.implementation,
                dependency: *dependency,
            });
        }

        debug!(
            "Constructing {} for contract {}.",
            entry.implementation, contract
        );

        let instance = (constructor.construct)(self)?;

        // registration already validated assignability, but hand-built metadata can construct a
        // different concrete type than its cast function expects
        if (entry.cast)(instance.clone()).is_err() {
            return Err(ResolutionError::AssignabilityViolation(contract));
        }

        Ok(instance)
    }
}

impl ContractResolver for Container {
    fn resolve(
        &mut self,
        contract: ContractId,
    ) -> Result<(InstanceAnyPtr, CastFunction), ResolutionError> {
        let entry = self
            .registry
            .lookup(contract)
            .ok_or(ResolutionError::UnregisteredContract(contract))?;

        self.obtain_instance(&entry, contract)
            .map(|instance| (instance, entry.cast))
    }

    #[inline]
    fn can_resolve(&self, contract: ContractId) -> bool {
        self.registry.is_registered(contract)
    }
}
