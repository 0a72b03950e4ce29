use crate::contract::{ContractId, Resolvable};
use crate::error::ResolutionError;
#[cfg(test)]
use mockall::automock;
use std::any::Any;
#[cfg(not(feature = "threadsafe"))]
use std::rc::Rc;
#[cfg(feature = "threadsafe")]
use std::sync::Arc;

#[cfg(not(feature = "threadsafe"))]
pub type InstancePtr<T> = Rc<T>;
#[cfg(feature = "threadsafe")]
pub type InstancePtr<T> = Arc<T>;

#[cfg(not(feature = "threadsafe"))]
pub type InstanceAnyPtr = InstancePtr<dyn Any + 'static>;
#[cfg(feature = "threadsafe")]
pub type InstanceAnyPtr = InstancePtr<dyn Any + Send + Sync + 'static>;

/// Cast function registered alongside an implementation, converting a type-erased instance to a
/// boxed [InstancePtr] of the contract the implementation was registered under. Returns the
/// instance unchanged on mismatch, which signals the instance does not satisfy the contract.
pub type CastFunction = fn(instance: InstanceAnyPtr) -> Result<Box<dyn Any>, InstanceAnyPtr>;

/// Generic resolver of contract instances. Resolution recursively constructs the dependency
/// graph of the requested contract, so any resolution can fail for reasons deeper than the
/// requested contract itself.
#[cfg_attr(test, automock)]
pub trait ContractResolver {
    /// Resolves an instance of the given contract, together with the cast function able to
    /// convert it to a strongly-typed pointer.
    fn resolve(
        &mut self,
        contract: ContractId,
    ) -> Result<(InstanceAnyPtr, CastFunction), ResolutionError>;

    /// Checks if the given contract is registered. This only confirms the top-level contract
    /// itself; it does not attempt construction, so it cannot detect missing nested
    /// dependencies.
    fn can_resolve(&self, contract: ContractId) -> bool;
}

/// Helper trait for [ContractResolver] providing strongly-typed access.
pub trait TypedContractResolver {
    /// Typesafe version of [ContractResolver::resolve].
    fn resolve_typed<T: Resolvable + ?Sized>(&mut self)
        -> Result<InstancePtr<T>, ResolutionError>;

    /// Typesafe version of [ContractResolver::can_resolve].
    fn can_resolve_typed<T: Resolvable + ?Sized>(&self) -> bool;
}

impl<R: ContractResolver + ?Sized> TypedContractResolver for R {
    fn resolve_typed<T: Resolvable + ?Sized>(
        &mut self,
    ) -> Result<InstancePtr<T>, ResolutionError> {
        let contract = ContractId::of::<T>();
        let (instance, cast) = self.resolve(contract)?;

        cast(instance)
            .map_err(|_| ResolutionError::AssignabilityViolation(contract))
            .and_then(|instance| {
                instance
                    .downcast::<InstancePtr<T>>()
                    .map(|instance| *instance)
                    .map_err(|_| ResolutionError::AssignabilityViolation(contract))
            })
    }

    #[inline]
    fn can_resolve_typed<T: Resolvable + ?Sized>(&self) -> bool {
        self.can_resolve(ContractId::of::<T>())
    }
}

#[cfg(test)]
mod tests {
    use crate::contract::{ContractId, Resolvable};
    use crate::error::ResolutionError;
    use crate::resolver::{
        CastFunction, InstanceAnyPtr, InstancePtr, MockContractResolver, TypedContractResolver,
    };
    use mockall::predicate::*;
    use std::any::Any;

    #[derive(Debug)]
    struct TestContract;

    impl Resolvable for TestContract {}

    fn cast(instance: InstanceAnyPtr) -> Result<Box<dyn Any>, InstanceAnyPtr> {
        instance
            .downcast::<TestContract>()
            .map(|instance| Box::new(instance) as Box<dyn Any>)
    }

    fn failing_cast(instance: InstanceAnyPtr) -> Result<Box<dyn Any>, InstanceAnyPtr> {
        Err(instance)
    }

    #[test]
    fn should_resolve_typed_instance() {
        let mut resolver = MockContractResolver::new();
        resolver
            .expect_resolve()
            .with(eq(ContractId::of::<TestContract>()))
            .times(1)
            .returning(|_| {
                Ok((
                    InstancePtr::new(TestContract) as InstanceAnyPtr,
                    cast as CastFunction,
                ))
            });

        assert!(resolver.resolve_typed::<TestContract>().is_ok());
    }

    #[test]
    fn should_report_failed_casts() {
        let mut resolver = MockContractResolver::new();
        resolver.expect_resolve().times(1).returning(|_| {
            Ok((
                InstancePtr::new(TestContract) as InstanceAnyPtr,
                failing_cast as CastFunction,
            ))
        });

        assert_eq!(
            resolver.resolve_typed::<TestContract>().unwrap_err(),
            ResolutionError::AssignabilityViolation(ContractId::of::<TestContract>())
        );
    }

    #[test]
    fn should_forward_can_resolve() {
        let mut resolver = MockContractResolver::new();
        resolver
            .expect_can_resolve()
            .with(eq(ContractId::of::<TestContract>()))
            .times(1)
            .return_const(true);

        assert!(resolver.can_resolve_typed::<TestContract>());
    }
}
