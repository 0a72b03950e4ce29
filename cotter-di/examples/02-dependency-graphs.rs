use cotter_di::container::Container;
use cotter_di::contract::{
    ConstructorDescriptor, ContractDowncast, ContractId, Implementation, Resolvable,
};
use cotter_di::lifecycle::Lifecycle;
use cotter_di::resolver::{InstanceAnyPtr, InstancePtr, TypedContractResolver};

trait Clock {
    fn timestamp(&self) -> u64;
}

struct FixedClock;

impl Clock for FixedClock {
    fn timestamp(&self) -> u64 {
        1_700_000_000
    }
}

impl Resolvable for FixedClock {}

impl ContractDowncast<FixedClock> for FixedClock {
    fn downcast(source: InstanceAnyPtr) -> Result<InstancePtr<Self>, InstanceAnyPtr> {
        source.downcast()
    }
}

impl Implementation for FixedClock {
    fn constructors() -> Vec<ConstructorDescriptor> {
        vec![ConstructorDescriptor {
            parameters: vec![],
            construct: |_| Ok(InstancePtr::new(FixedClock) as InstanceAnyPtr),
        }]
    }
}

impl Resolvable for dyn Clock + Send + Sync {}

impl ContractDowncast<FixedClock> for dyn Clock + Send + Sync {
    fn downcast(source: InstanceAnyPtr) -> Result<InstancePtr<Self>, InstanceAnyPtr> {
        FixedClock::downcast(source).map(|instance| instance as InstancePtr<Self>)
    }
}

trait AuditLog {
    fn record(&self, entry: &str) -> String;
}

// an implementation with a dependency of its own: the constructor declares the clock contract
// as a parameter, and the container resolves it before construction
struct TimestampedAuditLog {
    clock: InstancePtr<dyn Clock + Send + Sync>,
}

impl AuditLog for TimestampedAuditLog {
    fn record(&self, entry: &str) -> String {
        format!("[{}] {entry}", self.clock.timestamp())
    }
}

impl Resolvable for TimestampedAuditLog {}

impl ContractDowncast<TimestampedAuditLog> for TimestampedAuditLog {
    fn downcast(source: InstanceAnyPtr) -> Result<InstancePtr<Self>, InstanceAnyPtr> {
        source.downcast()
    }
}

impl Implementation for TimestampedAuditLog {
    fn constructors() -> Vec<ConstructorDescriptor> {
        vec![ConstructorDescriptor {
            parameters: vec![ContractId::of::<dyn Clock + Send + Sync>()],
            construct: |resolver| {
                let clock = resolver.resolve_typed::<dyn Clock + Send + Sync>()?;
                Ok(InstancePtr::new(TimestampedAuditLog { clock }) as InstanceAnyPtr)
            },
        }]
    }
}

impl Resolvable for dyn AuditLog + Send + Sync {}

impl ContractDowncast<TimestampedAuditLog> for dyn AuditLog + Send + Sync {
    fn downcast(source: InstanceAnyPtr) -> Result<InstancePtr<Self>, InstanceAnyPtr> {
        TimestampedAuditLog::downcast(source).map(|instance| instance as InstancePtr<Self>)
    }
}

fn main() {
    let mut container = Container::new();

    // registration order does not matter - dependencies are looked up at resolution time
    container
        .register::<dyn AuditLog + Send + Sync, TimestampedAuditLog>(Lifecycle::Transient)
        .expect("error registering TimestampedAuditLog");
    container
        .register::<dyn Clock + Send + Sync, FixedClock>(Lifecycle::Singleton)
        .expect("error registering FixedClock");

    let audit_log = container
        .resolve_typed::<dyn AuditLog + Send + Sync>()
        .expect("error resolving dyn AuditLog");

    // prints "[1700000000] container started"
    println!("{}", audit_log.record("container started"));
}
