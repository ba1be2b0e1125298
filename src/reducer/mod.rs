//! Reducers and reducer composition.
//!
//! A reducer is any `Fn(Option<&S>, &A) -> S` (or `-> Result<S, E>` for
//! [`Store::fallible`](crate::Store::fallible)). It receives `None` as the
//! previous state on its first call and must not depend on anything but its
//! two inputs.
//!
//! Root reducers that delegate to one reducer per slice of state can be built
//! with [`CombineReducers`] when every slice has the same type, or with the
//! [`combine_reducers!`](crate::combine_reducers) macro for struct-shaped
//! state.

mod combine;

pub use combine::{CombineReducers, Slices};

/// Type-erased reducer as stored by a [`Store`](crate::Store).
pub type DynReducer<S, A, E> = dyn Fn(Option<&S>, &A) -> Result<S, E> + Send + Sync;
