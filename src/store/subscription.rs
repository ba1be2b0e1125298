use super::lock;
use super::store::ListenerMap;
use std::fmt;
use std::sync::{RwLock, Weak};

/// Opaque token identifying one listener registration.
///
/// Tokens are unique per store and increase with registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw token value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscription#{}", self.0)
    }
}

/// Handle returned by [`Store::subscribe`](crate::Store::subscribe).
///
/// Removes exactly the registration it was created for, regardless of which
/// callback was registered. Dropping the handle leaves the listener
/// registered; call [`unsubscribe`](Self::unsubscribe) to remove it.
///
/// The handle only holds a weak reference to the store's listener list and
/// never keeps the store alive.
pub struct Subscription {
    id: SubscriptionId,
    listeners: Weak<RwLock<ListenerMap>>,
}

impl Subscription {
    pub(crate) fn new(id: SubscriptionId, listeners: Weak<RwLock<ListenerMap>>) -> Self {
        Self { id, listeners }
    }

    /// The token of this registration.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Remove this registration from the store.
    ///
    /// Returns `true` if the listener was still registered. Calling it again,
    /// or after the store has been dropped, is a no-op returning `false`.
    pub fn unsubscribe(&self) -> bool {
        let Some(listeners) = self.listeners.upgrade() else {
            return false;
        };
        let mut listeners = lock::write(&listeners);
        let removed = listeners.remove(&self.id).is_some();
        if removed {
            tracing::trace!(id = %self.id, remaining = listeners.len(), "listener unsubscribed");
        }
        removed
    }

    /// Whether this registration is still present in the store.
    pub fn is_active(&self) -> bool {
        self.listeners
            .upgrade()
            .is_some_and(|listeners| lock::read(&listeners).contains_key(&self.id))
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
