//! # Change Bus
//!
//! An in-process publish/subscribe channel that tells views a collection
//! changed. Signals carry no payload: a subscriber that cares re-reads the
//! store itself.
//!
//! ## Semantics
//!
//! - Dispatch is synchronous and follows registration order.
//! - A subscriber removed while a dispatch is running is skipped for the rest
//!   of that dispatch.
//! - Callbacks may subscribe, unsubscribe or emit from inside a dispatch.
//! - A callback that panics unwinds out of [`ChangeBus::emit`]; subscribers
//!   after it in the same dispatch do not run.
//!
//! Subscriptions are tied to their owner through the [`Subscription`] guard,
//! which deregisters on drop.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signal {
    GroupChanged,
    FlashcardChanged,
}

impl Signal {
    pub fn name(&self) -> &'static str {
        match self {
            Signal::GroupChanged => "group-changed",
            Signal::FlashcardChanged => "flashcard-changed",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Rc<dyn Fn()>;

struct Subscriber {
    id: SubscriptionId,
    signal: Signal,
    callback: Callback,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

impl Registry {
    fn contains(&self, id: SubscriptionId) -> bool {
        self.subscribers.iter().any(|s| s.id == id)
    }

    fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }
}

/// Handle to the bus. Clones share the same subscriber registry.
#[derive(Clone, Default)]
pub struct ChangeBus {
    registry: Rc<RefCell<Registry>>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for `signal`. Dropping the returned guard
    /// unsubscribes.
    #[must_use = "dropping the Subscription unsubscribes immediately"]
    pub fn subscribe(&self, signal: Signal, callback: impl Fn() + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.subscribers.push(Subscriber {
            id,
            signal,
            callback: Rc::new(callback),
        });
        tracing::trace!(signal = %signal, ?id, "subscribed");

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Returns `false` if `id` was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.registry.borrow_mut().remove(id)
    }

    /// Invoke every subscriber of `signal`. Returns how many callbacks ran.
    pub fn emit(&self, signal: Signal) -> usize {
        // Snapshot first so callbacks can touch the registry without a
        // RefCell double borrow.
        let snapshot: Vec<(SubscriptionId, Callback)> = self
            .registry
            .borrow()
            .subscribers
            .iter()
            .filter(|s| s.signal == signal)
            .map(|s| (s.id, Rc::clone(&s.callback)))
            .collect();

        let mut invoked = 0;
        for (id, callback) in snapshot {
            if !self.registry.borrow().contains(id) {
                continue;
            }
            callback();
            invoked += 1;
        }
        tracing::debug!(signal = %signal, invoked, "emitted");
        invoked
    }

    pub fn subscriber_count(&self, signal: Signal) -> usize {
        self.registry
            .borrow()
            .subscribers
            .iter()
            .filter(|s| s.signal == signal)
            .count()
    }
}

/// Guard for a registered callback. Unsubscribes when dropped.
pub struct Subscription {
    id: SubscriptionId,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Keep the callback registered past this guard's lifetime. The caller
    /// takes over deregistration through [`ChangeBus::unsubscribe`].
    pub fn detach(self) -> SubscriptionId {
        let id = self.id;
        std::mem::forget(self);
        id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().remove(self.id);
        }
    }
}
