//! Errors surfaced by [`Store::dispatch`](crate::Store::dispatch).

use crate::store::SubscriptionId;

/// Boxed error type accepted from fallible listeners.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure of a single dispatch.
///
/// `E` is the reducer's error type; it is [`std::convert::Infallible`] for
/// stores built with [`Store::new`](crate::Store::new).
#[derive(Debug, thiserror::Error)]
pub enum DispatchError<E> {
    /// The reducer rejected the action. The state was not replaced and no
    /// listener ran.
    #[error("reducer failed: {0}")]
    Reducer(#[source] E),

    /// A listener failed during fan-out. The new state is in place; listeners
    /// registered after this one were not invoked for this dispatch.
    #[error("listener {id} failed: {source}")]
    Listener {
        id: SubscriptionId,
        #[source]
        source: BoxError,
    },
}

impl<E> DispatchError<E> {
    /// Whether the reducer rejected the action.
    pub fn is_reducer(&self) -> bool {
        matches!(self, DispatchError::Reducer(_))
    }

    /// Whether a listener failed during fan-out.
    pub fn is_listener(&self) -> bool {
        matches!(self, DispatchError::Listener { .. })
    }
}
