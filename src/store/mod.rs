//! The reducer-driven store.
//!
//! A [`Store`] holds one state value, hands it out on request, and replaces it
//! only by running an action through its reducer. Every replacement is
//! followed by a synchronous notification of all subscribed listeners.

mod lock;
mod store;
mod subscription;

pub use store::{Store, WeakStore};
pub use subscription::{Subscription, SubscriptionId};
