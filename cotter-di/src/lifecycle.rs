//! Lifecycle policies decide when a registration entry reuses an instance and when it
//! constructs a new one. Only two policies exist - per-call [Transient](Lifecycle::Transient)
//! construction and per-container [Singleton](Lifecycle::Singleton) sharing - so they are
//! modeled as a tagged variant operating on the entry's [InstanceSlot] rather than an open set
//! of strategy objects.
//!
//! Note: lifecycles compose at construction time, which can lead to unexpected consequences
//! when mixed, e.g. a singleton implementation can depend on a transient contract. The
//! transient dependency is constructed fresh while the singleton is built, but that single
//! instance then lives as long as the singleton does.

use crate::resolver::InstanceAnyPtr;

/// Policy governing instance reuse across resolutions of a single contract.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Lifecycle {
    /// A new instance is constructed on every resolution. The caller owns the result.
    #[default]
    Transient,
    /// At most one instance is constructed per container; every resolution shares it and its
    /// lifetime equals the container's.
    Singleton,
}

/// Per-entry cell holding the instance a reusing lifecycle has produced. `None` means no
/// instance has been successfully constructed yet, so failed constructions stay retryable.
#[derive(Clone, Default)]
pub struct InstanceSlot {
    instance: Option<InstanceAnyPtr>,
}

impl Lifecycle {
    /// Returns the previously produced instance, if this policy reuses instances and one has
    /// been stored.
    pub fn stored_instance(&self, slot: &InstanceSlot) -> Option<InstanceAnyPtr> {
        match self {
            Lifecycle::Transient => None,
            Lifecycle::Singleton => slot.instance.clone(),
        }
    }

    /// Offers a freshly produced instance for storage. Policies which do not reuse instances
    /// discard it.
    pub fn store_instance(&self, slot: &mut InstanceSlot, instance: InstanceAnyPtr) {
        match self {
            Lifecycle::Transient => {}
            Lifecycle::Singleton => slot.instance = Some(instance),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lifecycle::{InstanceSlot, Lifecycle};
    use crate::resolver::{InstanceAnyPtr, InstancePtr};

    #[test]
    fn should_store_singleton_instances() {
        let mut slot = InstanceSlot::default();
        let lifecycle = Lifecycle::Singleton;

        assert!(lifecycle.stored_instance(&slot).is_none());

        let instance = InstancePtr::new(0) as InstanceAnyPtr;
        lifecycle.store_instance(&mut slot, instance);

        assert!(lifecycle.stored_instance(&slot).is_some());
    }

    #[test]
    fn should_discard_transient_instances() {
        let mut slot = InstanceSlot::default();
        let lifecycle = Lifecycle::Transient;

        let instance = InstancePtr::new(0) as InstanceAnyPtr;
        lifecycle.store_instance(&mut slot, instance);

        assert!(lifecycle.stored_instance(&slot).is_none());
    }

    #[test]
    fn should_default_to_transient() {
        assert_eq!(Lifecycle::default(), Lifecycle::Transient);
    }
}
