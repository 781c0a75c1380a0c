//! Payload-less broadcast signal
//!
//! A signal records which behaviours listen to it. Subscribing hands back a
//! [`SubscriptionKey`] that the subscriber must give back when it is disabled;
//! the [`Stage`](crate::Stage) dispatches the signal to the listeners.

use slotmap::{new_key_type, SlotMap};
use crate::BehaviourKey;

new_key_type! {
    /// Key identifying one subscription to a signal
    pub struct SubscriptionKey;
}

/// A broadcast signal with no payload
#[derive(Default)]
pub struct Signal {
    subscribers: SlotMap<SubscriptionKey, BehaviourKey>,
}

impl Signal {
    /// Create a signal with no subscribers
    pub fn new() -> Self {
        Self {
            subscribers: SlotMap::with_key(),
        }
    }

    /// Register a listener
    pub fn subscribe(&mut self, listener: BehaviourKey) -> SubscriptionKey {
        self.subscribers.insert(listener)
    }

    /// Remove a subscription
    ///
    /// Returns false if the key was already released.
    pub fn unsubscribe(&mut self, key: SubscriptionKey) -> bool {
        self.subscribers.remove(key).is_some()
    }

    /// Remove every subscription held by `listener`, returning how many there were
    pub fn unsubscribe_listener(&mut self, listener: BehaviourKey) -> usize {
        let before = self.subscribers.len();
        self.subscribers.retain(|_, l| *l != listener);
        before - self.subscribers.len()
    }

    /// Check whether a subscription is still live
    pub fn is_subscribed(&self, key: SubscriptionKey) -> bool {
        self.subscribers.contains_key(key)
    }

    /// Snapshot of current subscriptions
    pub fn subscriptions(&self) -> Vec<(SubscriptionKey, BehaviourKey)> {
        self.subscribers.iter().map(|(k, l)| (k, *l)).collect()
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Check if nobody is listening
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}
