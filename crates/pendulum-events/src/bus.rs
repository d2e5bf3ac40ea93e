//! Event Bus
//!
//! Synchronous publish/subscribe dispatch. The bus is an explicit value
//! constructed once by the coordination layer and passed by reference to
//! everything that publishes or subscribes; there is no process-wide
//! singleton.
//!
//! Delivery order is subscription (insertion) order. The subscriber list is
//! snapshotted before dispatch, so a callback may freely subscribe,
//! unsubscribe, or publish while a publish is in flight:
//!
//! - a subscriber added during dispatch is not invoked for the in-flight
//!   publish;
//! - a subscriber removed during dispatch is not invoked if its turn has not
//!   come yet;
//! - re-entrant publishes run to completion before the outer dispatch
//!   resumes.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::event::{Event, EventKind};

/// Handle returned by [`EventBus::subscribe`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type Callback = Box<dyn FnMut(&Event, &EventBus)>;

struct Slot {
    id: SubscriberId,
    // Taken out of the slot while its callback runs, so a re-entrant publish
    // of the same kind skips (rather than aliases) the running subscriber.
    callback: Option<Callback>,
}

/// Synchronous publish/subscribe dispatcher.
///
/// Single-threaded by construction (`RefCell` interior mutability); the
/// coordination layer owns one instance and shares it by reference.
pub struct EventBus {
    registry: RefCell<HashMap<EventKind, Vec<Slot>>>,
    next_id: Cell<u64>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self {
            registry: RefCell::new(HashMap::new()),
            next_id: Cell::new(1),
        }
    }

    /// Subscribes a callback to one event kind.
    ///
    /// The callback receives the event and the bus itself, so handlers can
    /// publish follow-up events.
    pub fn subscribe<F>(&self, kind: EventKind, callback: F) -> SubscriberId
    where
        F: FnMut(&Event, &EventBus) + 'static,
    {
        let id = SubscriberId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);

        self.registry.borrow_mut().entry(kind).or_default().push(Slot {
            id,
            callback: Some(Box::new(callback)),
        });
        id
    }

    /// Removes a subscription. Returns true if the handle was registered
    /// for that kind.
    pub fn unsubscribe(&self, kind: EventKind, id: SubscriberId) -> bool {
        let mut registry = self.registry.borrow_mut();
        if let Some(slots) = registry.get_mut(&kind) {
            let before = slots.len();
            slots.retain(|slot| slot.id != id);
            return slots.len() < before;
        }
        false
    }

    /// Number of current subscribers for a kind.
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.registry
            .borrow()
            .get(&kind)
            .map_or(0, |slots| slots.len())
    }

    /// Publishes an event to every subscriber of its kind, synchronously,
    /// on the caller's thread, in subscription order.
    ///
    /// Publishing to a kind with zero subscribers is a no-op. Publish never
    /// fails.
    pub fn publish(&self, event: &Event) {
        let kind = event.kind();

        // Snapshot the ids up front; mutations during dispatch only affect
        // later publishes (or not-yet-visited subscribers on removal).
        let ids: Vec<SubscriberId> = self
            .registry
            .borrow()
            .get(&kind)
            .map(|slots| slots.iter().map(|slot| slot.id).collect())
            .unwrap_or_default();

        for id in ids {
            let taken = {
                let mut registry = self.registry.borrow_mut();
                registry
                    .get_mut(&kind)
                    .and_then(|slots| slots.iter_mut().find(|slot| slot.id == id))
                    .and_then(|slot| slot.callback.take())
            };

            // Gone if unsubscribed mid-dispatch or already running re-entrantly.
            let Some(mut callback) = taken else { continue };

            callback(event, self);

            // Restore unless the callback unsubscribed itself.
            let mut registry = self.registry.borrow_mut();
            if let Some(slot) = registry
                .get_mut(&kind)
                .and_then(|slots| slots.iter_mut().find(|slot| slot.id == id))
            {
                slot.callback = Some(callback);
            }
        }
    }
}
