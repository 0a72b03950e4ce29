use cotter_di::container::Container;
use cotter_di::contract::{
    ConstructorDescriptor, ContractDowncast, ContractId, Implementation, Resolvable,
};
use cotter_di::lifecycle::Lifecycle;
use cotter_di::resolver::{InstanceAnyPtr, InstancePtr, TypedContractResolver};

// this is a contract we would like to depend on
trait MessageSource {
    fn message(&self) -> String;
}

// this is a concrete implementation satisfying the contract
struct StaticMessageSource;

impl MessageSource for StaticMessageSource {
    fn message(&self) -> String {
        "Hello world!".to_string()
    }
}

// the following impls describe the implementation to the container: how to downcast stored
// instances back to strong types, and which constructors exist
impl Resolvable for StaticMessageSource {}

impl ContractDowncast<StaticMessageSource> for StaticMessageSource {
    fn downcast(source: InstanceAnyPtr) -> Result<InstancePtr<Self>, InstanceAnyPtr> {
        source.downcast()
    }
}

impl Implementation for StaticMessageSource {
    fn constructors() -> Vec<ConstructorDescriptor> {
        // a single constructor without parameters
        vec![ConstructorDescriptor {
            parameters: vec![],
            construct: |_| Ok(InstancePtr::new(StaticMessageSource) as InstanceAnyPtr),
        }]
    }
}

// we're telling the container how to provide StaticMessageSource when asked for
// dyn MessageSource - note Send + Sync with the default "threadsafe" feature
impl Resolvable for dyn MessageSource + Send + Sync {}

impl ContractDowncast<StaticMessageSource> for dyn MessageSource + Send + Sync {
    fn downcast(source: InstanceAnyPtr) -> Result<InstancePtr<Self>, InstanceAnyPtr> {
        StaticMessageSource::downcast(source).map(|instance| instance as InstancePtr<Self>)
    }
}

// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
fn main() {
    let mut container = Container::new();

    // registration is programmatic and validated at compile time - an implementation which
    // does not satisfy the contract simply won't compile
    container
        .register::<dyn MessageSource + Send + Sync, StaticMessageSource>(Lifecycle::Transient)
        .expect("error registering StaticMessageSource");

    assert!(container.can_resolve_typed::<dyn MessageSource + Send + Sync>());

    let source = container
        .resolve_typed::<dyn MessageSource + Send + Sync>()
        .expect("error resolving dyn MessageSource");

    // prints "Hello world!"
    println!("{}", source.message());

    // contract identities are plain values, usable for diagnostics
    println!(
        "resolved: {}",
        ContractId::of::<dyn MessageSource + Send + Sync>()
    );
}
