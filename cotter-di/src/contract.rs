//! The two sides of every registration are a *contract* - an abstract capability consumers
//! depend on, usually a `dyn Trait` - and an *implementation* - a concrete type satisfying that
//! contract. Both sides are identified by a [ContractId] and described to the container through
//! a small set of traits.
//!
//! A concrete type becomes registrable by implementing [Implementation], which describes its
//! public constructors as [ConstructorDescriptor]s: the contracts of the constructor parameters
//! in declaration order, plus a callback which resolves exactly those parameters and invokes the
//! constructor itself. This replaces runtime reflection with explicitly declared constructor
//! shape, so the container can inspect dependencies without any metadata support from the
//! language.
//!
//! [ContractDowncast] links a contract back to a concrete implementation, making it possible to
//! recover a strongly-typed `InstancePtr<dyn Trait>` from the type-erased instances the
//! container stores. Every implementation must also be downcastable to itself, which allows
//! registering a concrete type as its own contract.

use crate::error::ResolutionError;
use crate::resolver::{ContractResolver, InstanceAnyPtr, InstancePtr};
use derivative::Derivative;
use std::any::{type_name, TypeId};
use std::fmt::{Display, Formatter};

/// Opaque, comparable token identifying a contract or a concrete implementation type. Carries
/// the type name purely for diagnostics.
#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub struct ContractId {
    type_id: TypeId,
    name: &'static str,
}

impl ContractId {
    pub fn of<T: Resolvable + ?Sized>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Display for ContractId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// Marker trait for types resolvable from a container - contracts and implementations.
pub trait Resolvable: 'static {}

/// Helper trait for contracts satisfied by the concrete implementation `I`, thus allowing
/// resolution of `dyn Trait` contracts. Trait objects implement this by downcasting to `I` and
/// unsizing back to themselves.
pub trait ContractDowncast<I: Implementation>: Resolvable {
    fn downcast(source: InstanceAnyPtr) -> Result<InstancePtr<Self>, InstanceAnyPtr>;
}

/// A concrete, instantiable type which can be registered to satisfy contracts.
pub trait Implementation: ContractDowncast<Self> + Sized {
    /// Describes the public constructors of this type, in declaration order. An empty list
    /// means the type cannot be constructed by a container and resolving it fails with
    /// [ResolutionError::NoPublicConstructor].
    ///
    /// When several constructors exist, the container selects the one with the fewest
    /// parameters; among equal-arity constructors the first declared wins. This is a deliberate
    /// simplification rather than best-match selection.
    fn constructors() -> Vec<ConstructorDescriptor>;
}

/// Construction callback of a single constructor. Must resolve exactly the parameter contracts
/// declared by its [ConstructorDescriptor], in declaration order, and then invoke the
/// constructor with the resolved instances.
pub type ConstructorFn =
    fn(resolver: &mut dyn ContractResolver) -> Result<InstanceAnyPtr, ResolutionError>;

/// Description of one public constructor of an implementation.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct ConstructorDescriptor {
    /// Contracts of the constructor parameters, in declaration order.
    pub parameters: Vec<ContractId>,

    /// Callback invoking the constructor. See [ConstructorFn] for the resolution discipline it
    /// must follow.
    #[derivative(Debug = "ignore")]
    pub construct: ConstructorFn,
}
