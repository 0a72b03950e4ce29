use crate::contract::ContractId;
use thiserror::Error;

/// Errors raised when registering implementations for contracts.
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum RegistrationError {
    #[error("Cannot register implementation '{implementation}' for contract '{contract}' which it does not satisfy.")]
    InvalidRegistration {
        contract: ContractId,
        implementation: ContractId,
    },
}

/// Errors raised while resolving contracts and constructing their dependency graphs.
#[derive(Error, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Debug)]
pub enum ResolutionError {
    #[error("Cannot resolve contract '{0}' because it has not been registered.")]
    UnregisteredContract(ContractId),
    #[error("Cannot finish resolving contract '{contract}' because implementation '{implementation}' depends on unregistered contract '{dependency}'.")]
    UnresolvableDependency {
        contract: ContractId,
        implementation: ContractId,
        dependency: ContractId,
    },
    #[error("Implementation '{0}' has no public constructors.")]
    NoPublicConstructor(ContractId),
    #[error("Constructed instance does not satisfy the requested contract '{0}'.")]
    AssignabilityViolation(ContractId),
    #[error("Contract '{0}' is already being constructed further up the dependency chain.")]
    CircularDependency(ContractId),
}
