//! # Unistore
//!
//! A minimal unidirectional state container for Rust.
//!
//! A [`Store`] combines three things:
//! - a single state slot, empty until the first dispatch
//! - an ordered list of listeners, added with [`Store::subscribe`] and removed
//!   through the returned [`Subscription`]
//! - a pure reducer `(Option<&S>, &A) -> S` that [`Store::dispatch`] uses to
//!   compute each new state
//!
//! Dispatch is synchronous: the reducer runs, the state is replaced, and every
//! listener is called in registration order before `dispatch` returns.
//!
//! ## Composing reducers
//!
//! Root reducers that delegate to one reducer per slice of state are built
//! with [`CombineReducers`] or the [`combine_reducers!`] macro.
//!
//! ## Logging
//!
//! The crate emits `tracing` events for subscriptions, fan-out and failures.
//! Enable the `tracing` feature to also get a span around every dispatch.

pub mod error;
pub mod reducer;
pub mod store;

// Re-export main types for convenience
pub use error::{BoxError, DispatchError};
pub use reducer::{CombineReducers, Slices};
pub use store::{Store, Subscription, SubscriptionId, WeakStore};
