//! A minimal inversion-of-control container. Callers register a mapping from an abstract
//! *contract* (usually a `dyn Trait`) to a concrete *implementation* type plus a
//! [Lifecycle](lifecycle::Lifecycle) policy, then later resolve instances of the contract. The
//! container recursively constructs whatever dependency graph is needed to satisfy a request,
//! selecting implementation constructors by minimal arity and caching singleton instances.
//!
//! Registration is entirely programmatic - there is no automatic discovery, no configuration
//! loading, and no property injection. Implementations describe their constructors explicitly
//! as an ordered parameter-contract list plus a construction callback, which sidesteps runtime
//! reflection altogether.
//!
//! ```
//! use cotter_di::container::Container;
//! use cotter_di::contract::{ConstructorDescriptor, ContractDowncast, Implementation, Resolvable};
//! use cotter_di::lifecycle::Lifecycle;
//! use cotter_di::resolver::{InstanceAnyPtr, InstancePtr, TypedContractResolver};
//!
//! // a contract we would like to depend on
//! trait Greeter {
//!     fn greet(&self) -> String;
//! }
//!
//! // a concrete implementation satisfying it
//! struct EnglishGreeter;
//!
//! impl Greeter for EnglishGreeter {
//!     fn greet(&self) -> String {
//!         "Hello world!".to_string()
//!     }
//! }
//!
//! // boilerplate describing the implementation to the container - note Send + Sync on the
//! // trait object when using the default "threadsafe" feature
//! impl Resolvable for EnglishGreeter {}
//!
//! impl ContractDowncast<EnglishGreeter> for EnglishGreeter {
//!     fn downcast(source: InstanceAnyPtr) -> Result<InstancePtr<Self>, InstanceAnyPtr> {
//!         source.downcast()
//!     }
//! }
//!
//! impl Implementation for EnglishGreeter {
//!     fn constructors() -> Vec<ConstructorDescriptor> {
//!         vec![ConstructorDescriptor {
//!             parameters: vec![],
//!             construct: |_| Ok(InstancePtr::new(EnglishGreeter) as InstanceAnyPtr),
//!         }]
//!     }
//! }
//!
//! impl Resolvable for dyn Greeter + Send + Sync {}
//!
//! impl ContractDowncast<EnglishGreeter> for dyn Greeter + Send + Sync {
//!     fn downcast(source: InstanceAnyPtr) -> Result<InstancePtr<Self>, InstanceAnyPtr> {
//!         EnglishGreeter::downcast(source).map(|instance| instance as InstancePtr<Self>)
//!     }
//! }
//!
//! let mut container = Container::new();
//! container
//!     .register::<dyn Greeter + Send + Sync, EnglishGreeter>(Lifecycle::Transient)
//!     .unwrap();
//!
//! let greeter = container
//!     .resolve_typed::<dyn Greeter + Send + Sync>()
//!     .unwrap();
//! assert_eq!(greeter.greet(), "Hello world!");
//! ```
//!
//! Resolution either fully succeeds or fails atomically with a variant of
//! [ResolutionError](error::ResolutionError); failed resolutions leave no partially cached
//! state behind, so fixing a missing registration and retrying works.

pub mod container;
pub mod contract;
pub mod error;
pub mod lifecycle;
pub mod registry;
pub mod resolver;
