use cotter_di::container::Container;
use cotter_di::contract::{ConstructorDescriptor, ContractDowncast, Implementation, Resolvable};
use cotter_di::lifecycle::Lifecycle;
use cotter_di::resolver::{InstanceAnyPtr, InstancePtr, TypedContractResolver};

trait Journal {}

struct FileJournal;

impl Journal for FileJournal {}

impl Resolvable for FileJournal {}

impl ContractDowncast<FileJournal> for FileJournal {
    fn downcast(source: InstanceAnyPtr) -> Result<InstancePtr<Self>, InstanceAnyPtr> {
        source.downcast()
    }
}

impl Implementation for FileJournal {
    fn constructors() -> Vec<ConstructorDescriptor> {
        vec![ConstructorDescriptor {
            parameters: vec![],
            construct: |_| Ok(InstancePtr::new(FileJournal) as InstanceAnyPtr),
        }]
    }
}

impl Resolvable for dyn Journal + Send + Sync {}

impl ContractDowncast<FileJournal> for dyn Journal + Send + Sync {
    fn downcast(source: InstanceAnyPtr) -> Result<InstancePtr<Self>, InstanceAnyPtr> {
        FileJournal::downcast(source).map(|instance| instance as InstancePtr<Self>)
    }
}

fn main() {
    let mut container = Container::new();

    // transient lifecycle: every resolution constructs a fresh instance owned by the caller
    container
        .register::<dyn Journal + Send + Sync, FileJournal>(Lifecycle::Transient)
        .expect("error registering FileJournal");

    let first = container
        .resolve_typed::<dyn Journal + Send + Sync>()
        .expect("error resolving dyn Journal");
    let second = container
        .resolve_typed::<dyn Journal + Send + Sync>()
        .expect("error resolving dyn Journal");

    // prints "transient instances shared: false"
    println!(
        "transient instances shared: {}",
        InstancePtr::ptr_eq(&first, &second)
    );

    // re-registering replaces the entry; from now on the contract is a singleton
    container
        .register::<dyn Journal + Send + Sync, FileJournal>(Lifecycle::Singleton)
        .expect("error registering FileJournal");

    let first = container
        .resolve_typed::<dyn Journal + Send + Sync>()
        .expect("error resolving dyn Journal");
    let second = container
        .resolve_typed::<dyn Journal + Send + Sync>()
        .expect("error resolving dyn Journal");

    // prints "singleton instances shared: true"
    println!(
        "singleton instances shared: {}",
        InstancePtr::ptr_eq(&first, &second)
    );
}
