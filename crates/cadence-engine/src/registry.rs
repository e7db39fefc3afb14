//! Generation-tagged observer registry.
//!
//! Observers are held as `Weak` references — the registry never owns
//! them. Each registration occupies a slot identified by an
//! [`ObserverKey`] carrying the slot's generation, so a key that has
//! already been deregistered is inert. Slots are tombstoned rather than
//! reused: iteration order therefore stays exactly registration order,
//! which is what the dispatch-ordering guarantee rests on.

use std::sync::Weak;

use cadence_core::{Observer, ObserverKey};

struct Slot {
    observer: Option<Weak<dyn Observer>>,
    generation: u32,
}

/// Indexed registry of weak observer references, in registration order.
#[derive(Default)]
pub(crate) struct ObserverRegistry {
    slots: Vec<Slot>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Append an observer; returns its generation-tagged key.
    pub fn register(&mut self, observer: Weak<dyn Observer>) -> ObserverKey {
        let index = u32::try_from(self.slots.len()).expect("registry slot count exceeds u32");
        self.slots.push(Slot {
            observer: Some(observer),
            generation: 0,
        });
        ObserverKey {
            index,
            generation: 0,
        }
    }

    /// Remove the registration behind `key` in O(1).
    ///
    /// Returns `false` (and does nothing) if the key is stale: wrong
    /// generation, already deregistered, or out of range.
    pub fn deregister(&mut self, key: ObserverKey) -> bool {
        let Some(slot) = self.slots.get_mut(key.index as usize) else {
            return false;
        };
        if slot.generation != key.generation || slot.observer.is_none() {
            return false;
        }
        slot.observer = None;
        // Bump so a copy of the key held elsewhere can never match again.
        slot.generation = slot.generation.wrapping_add(1);
        true
    }

    /// Snapshot the live registrations, in registration order.
    ///
    /// Dispatch works from this snapshot so the registry lock is not
    /// held while observers run.
    pub fn snapshot(&self) -> Vec<Weak<dyn Observer>> {
        self.slots
            .iter()
            .filter_map(|slot| slot.observer.clone())
            .collect()
    }

    /// Number of live (non-tombstoned) registrations.
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.observer.is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::{ChannelId, Event};
    use std::sync::Arc;

    struct Nop;
    impl Observer for Nop {
        fn on_notice(&self, _sender: ChannelId, _event: &Event) {}
    }

    fn observer() -> Arc<dyn Observer> {
        Arc::new(Nop)
    }

    #[test]
    fn register_assigns_sequential_indices() {
        let mut registry = ObserverRegistry::new();
        let a = observer();
        let b = observer();
        let key_a = registry.register(Arc::downgrade(&a));
        let key_b = registry.register(Arc::downgrade(&b));
        assert_eq!(key_a.index, 0);
        assert_eq!(key_b.index, 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn deregister_is_idempotent_via_generation() {
        let mut registry = ObserverRegistry::new();
        let a = observer();
        let key = registry.register(Arc::downgrade(&a));
        assert!(registry.deregister(key));
        assert!(!registry.deregister(key), "stale key must be inert");
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn deregister_out_of_range_is_noop() {
        let mut registry = ObserverRegistry::new();
        assert!(!registry.deregister(ObserverKey {
            index: 7,
            generation: 0
        }));
    }

    #[test]
    fn snapshot_preserves_registration_order_after_removal() {
        let mut registry = ObserverRegistry::new();
        let observers: Vec<Arc<dyn Observer>> = (0..4).map(|_| observer()).collect();
        let keys: Vec<ObserverKey> = observers
            .iter()
            .map(|o| registry.register(Arc::downgrade(o)))
            .collect();

        assert!(registry.deregister(keys[1]));

        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 3);
        // Slots 0, 2, 3 remain, in that order.
        assert!(snapshot[0].ptr_eq(&Arc::downgrade(&observers[0])));
        assert!(snapshot[1].ptr_eq(&Arc::downgrade(&observers[2])));
        assert!(snapshot[2].ptr_eq(&Arc::downgrade(&observers[3])));
    }

    #[test]
    fn snapshot_keeps_dead_weaks_until_upgrade() {
        let mut registry = ObserverRegistry::new();
        let a = observer();
        registry.register(Arc::downgrade(&a));
        drop(a);
        // The weak is still listed; dispatch skips it on upgrade failure.
        let snapshot = registry.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot[0].upgrade().is_none());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Any interleaving of registrations and removals leaves the
            /// surviving snapshot in registration order, with stale keys
            /// always rejected on a second removal.
            #[test]
            fn registration_order_survives_arbitrary_removals(
                remove in proptest::collection::vec(any::<bool>(), 1..32)
            ) {
                let mut registry = ObserverRegistry::new();
                let observers: Vec<Arc<dyn Observer>> =
                    remove.iter().map(|_| super::observer()).collect();
                let keys: Vec<ObserverKey> = observers
                    .iter()
                    .map(|o| registry.register(Arc::downgrade(o)))
                    .collect();

                for (key, &gone) in keys.iter().zip(&remove) {
                    if gone {
                        prop_assert!(registry.deregister(*key));
                        prop_assert!(!registry.deregister(*key));
                    }
                }

                let snapshot = registry.snapshot();
                let expected: Vec<&Arc<dyn Observer>> = observers
                    .iter()
                    .zip(&remove)
                    .filter(|(_, &gone)| !gone)
                    .map(|(o, _)| o)
                    .collect();
                prop_assert_eq!(snapshot.len(), expected.len());
                for (weak, arc) in snapshot.iter().zip(expected) {
                    prop_assert!(weak.ptr_eq(&Arc::downgrade(arc)));
                }
            }
        }
    }
}
