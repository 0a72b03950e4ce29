//! Functionality related to storing registrations of contracts. The [TypeRegistry] owns every
//! [RegistrationEntry] for the lifetime of its container; entries are created from
//! [ImplementationMetadata] captured either statically through the generic front-end or built
//! by hand for data-driven registration.

use crate::contract::{ConstructorDescriptor, ContractDowncast, ContractId, Implementation};
use crate::error::RegistrationError;
use crate::lifecycle::{InstanceSlot, Lifecycle};
use crate::resolver::{CastFunction, InstanceAnyPtr};
use derivative::Derivative;
use fxhash::FxHashMap;
use std::any::{Any, TypeId};
use tracing::debug;

/// Source of constructor descriptors for a registered implementation.
pub type ConstructorSource = fn() -> Vec<ConstructorDescriptor>;

/// Registration information describing a concrete implementation prepared for a single
/// contract.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct ImplementationMetadata {
    /// Identity of the concrete implementation type.
    pub implementation: ContractId,

    /// The contract this metadata was prepared for. Registering the metadata under any other
    /// contract fails validation, since the [cast](Self::cast) function only produces pointers
    /// of this contract.
    pub satisfies: ContractId,

    #[derivative(Debug = "ignore")]
    pub constructors: ConstructorSource,

    #[derivative(Debug = "ignore")]
    pub cast: CastFunction,
}

impl ImplementationMetadata {
    /// Captures metadata for registering implementation `I` under contract `C`. Assignability
    /// of `I` to `C` is enforced by the [ContractDowncast] bound, so metadata built this way
    /// always passes registration validation for `C`.
    pub fn for_contract<C: ContractDowncast<I> + ?Sized, I: Implementation>() -> Self {
        Self {
            implementation: ContractId::of::<I>(),
            satisfies: ContractId::of::<C>(),
            constructors: I::constructors,
            cast: cast_instance::<C, I>,
        }
    }
}

fn cast_instance<C: ContractDowncast<I> + ?Sized, I: Implementation>(
    instance: InstanceAnyPtr,
) -> Result<Box<dyn Any>, InstanceAnyPtr> {
    C::downcast(instance).map(|instance| Box::new(instance) as Box<dyn Any>)
}

/// A contract's stored association with its implementation, lifecycle, and cached instance.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct RegistrationEntry {
    pub implementation: ContractId,
    pub lifecycle: Lifecycle,

    #[derivative(Debug = "ignore")]
    pub constructors: ConstructorSource,

    #[derivative(Debug = "ignore")]
    pub cast: CastFunction,

    #[derivative(Debug = "ignore")]
    pub(crate) slot: InstanceSlot,
}

/// Stores registration entries keyed by contract identity. At most one entry exists per
/// contract at any time.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    entries: FxHashMap<TypeId, RegistrationEntry>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `metadata` under `contract` with the given lifecycle, after validating the
    /// metadata was prepared for that contract. Replaces any previous entry for the contract
    /// with a fresh one, dropping a previously cached singleton instance even when the
    /// lifecycle is unchanged; a failed registration leaves the previous entry intact.
    pub fn register(
        &mut self,
        contract: ContractId,
        metadata: ImplementationMetadata,
        lifecycle: Lifecycle,
    ) -> Result<(), RegistrationError> {
        if metadata.satisfies != contract {
            return Err(RegistrationError::InvalidRegistration {
                contract,
                implementation: metadata.implementation,
            });
        }

        debug!(
            "Registering implementation {} for contract {} with {:?} lifecycle.",
            metadata.implementation, contract, lifecycle
        );

        self.entries.insert(
            contract.type_id(),
            RegistrationEntry {
                implementation: metadata.implementation,
                lifecycle,
                constructors: metadata.constructors,
                cast: metadata.cast,
                slot: InstanceSlot::default(),
            },
        );

        Ok(())
    }

    /// Checks if the given contract has a registration entry. Pure lookup without side effects.
    #[inline]
    pub fn is_registered(&self, contract: ContractId) -> bool {
        self.entries.contains_key(&contract.type_id())
    }

    pub(crate) fn lookup(&self, contract: ContractId) -> Option<RegistrationEntry> {
        self.entries.get(&contract.type_id()).cloned()
    }

    pub(crate) fn store_instance(&mut self, contract: ContractId, instance: InstanceAnyPtr) {
        if let Some(entry) = self.entries.get_mut(&contract.type_id()) {
            entry.lifecycle.store_instance(&mut entry.slot, instance);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::contract::{
        ConstructorDescriptor, ContractDowncast, ContractId, Implementation, Resolvable,
    };
    use crate::error::RegistrationError;
    use crate::lifecycle::Lifecycle;
    use crate::registry::{ImplementationMetadata, TypeRegistry};
    use crate::resolver::{InstanceAnyPtr, InstancePtr};

    struct TestImplementation;

    impl Resolvable for TestImplementation {}

    impl ContractDowncast<TestImplementation> for TestImplementation {
        fn downcast(source: InstanceAnyPtr) -> Result<InstancePtr<Self>, InstanceAnyPtr> {
            source.downcast()
        }
    }

    impl Implementation for TestImplementation {
        fn constructors() -> Vec<ConstructorDescriptor> {
            vec![ConstructorDescriptor {
                parameters: vec![],
                construct: |_| Ok(InstancePtr::new(TestImplementation) as InstanceAnyPtr),
            }]
        }
    }

    struct OtherImplementation;

    impl Resolvable for OtherImplementation {}

    impl ContractDowncast<OtherImplementation> for OtherImplementation {
        fn downcast(source: InstanceAnyPtr) -> Result<InstancePtr<Self>, InstanceAnyPtr> {
            source.downcast()
        }
    }

    impl Implementation for OtherImplementation {
        fn constructors() -> Vec<ConstructorDescriptor> {
            vec![ConstructorDescriptor {
                parameters: vec![],
                construct: |_| Ok(InstancePtr::new(OtherImplementation) as InstanceAnyPtr),
            }]
        }
    }

    #[test]
    fn should_register_entry() {
        let contract = ContractId::of::<TestImplementation>();

        let mut registry = TypeRegistry::new();
        registry
            .register(
                contract,
                ImplementationMetadata::for_contract::<TestImplementation, TestImplementation>(),
                Lifecycle::default(),
            )
            .unwrap();

        assert!(registry.is_registered(contract));

        let entry = registry.lookup(contract).unwrap();
        assert_eq!(entry.implementation, contract);
        assert_eq!(entry.lifecycle, Lifecycle::Transient);
    }

    #[test]
    fn should_reject_mismatched_contract() {
        let contract = ContractId::of::<OtherImplementation>();

        let mut registry = TypeRegistry::new();
        let result = registry.register(
            contract,
            ImplementationMetadata::for_contract::<TestImplementation, TestImplementation>(),
            Lifecycle::default(),
        );

        assert_eq!(
            result.unwrap_err(),
            RegistrationError::InvalidRegistration {
                contract,
                implementation: ContractId::of::<TestImplementation>(),
            }
        );
        assert!(!registry.is_registered(contract));
    }

    #[test]
    fn should_keep_previous_entry_on_failed_registration() {
        let contract = ContractId::of::<TestImplementation>();

        let mut registry = TypeRegistry::new();
        registry
            .register(
                contract,
                ImplementationMetadata::for_contract::<TestImplementation, TestImplementation>(),
                Lifecycle::default(),
            )
            .unwrap();

        registry
            .register(
                contract,
                ImplementationMetadata::for_contract::<OtherImplementation, OtherImplementation>(),
                Lifecycle::default(),
            )
            .unwrap_err();

        let entry = registry.lookup(contract).unwrap();
        assert_eq!(entry.implementation, ContractId::of::<TestImplementation>());
    }

    #[test]
    fn should_drop_cached_instance_on_reregistration() {
        let contract = ContractId::of::<TestImplementation>();
        let metadata =
            ImplementationMetadata::for_contract::<TestImplementation, TestImplementation>();

        let mut registry = TypeRegistry::new();
        registry
            .register(contract, metadata.clone(), Lifecycle::Singleton)
            .unwrap();
        registry.store_instance(
            contract,
            InstancePtr::new(TestImplementation) as InstanceAnyPtr,
        );

        let entry = registry.lookup(contract).unwrap();
        assert!(entry.lifecycle.stored_instance(&entry.slot).is_some());

        registry
            .register(contract, metadata, Lifecycle::Singleton)
            .unwrap();

        let entry = registry.lookup(contract).unwrap();
        assert!(entry.lifecycle.stored_instance(&entry.slot).is_none());
    }
}
