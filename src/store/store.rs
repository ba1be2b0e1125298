use super::lock;
use super::subscription::{Subscription, SubscriptionId};
use crate::error::{BoxError, DispatchError};
use crate::reducer::DynReducer;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock, Weak};

type Listener = dyn Fn() -> Result<(), BoxError> + Send + Sync;

/// Registered listeners, ordered by token and therefore by registration.
pub(crate) type ListenerMap = BTreeMap<SubscriptionId, Arc<Listener>>;

struct StoreInner<S, A, E> {
    state: RwLock<Option<Arc<S>>>,
    listeners: Arc<RwLock<ListenerMap>>,
    reducer: Box<DynReducer<S, A, E>>,
    next_id: AtomicU64,
    // Serializes reducer runs so transitions stay totally ordered.
    dispatching: Mutex<()>,
}

/// A reducer-driven state container.
///
/// The store owns one state cell and an ordered list of listeners. State only
/// changes through [`dispatch`](Self::dispatch), which runs the reducer and
/// then notifies every listener in registration order.
///
/// Cloning a `Store` yields another handle to the same state and listeners.
/// Every call to [`Store::new`] or [`Store::fallible`] creates an independent
/// store.
///
/// A listener that captures a `Store` clone forms a reference cycle through
/// the store's own listener list, and the store is then never freed. Capture
/// a [`WeakStore`] from [`downgrade`](Self::downgrade) instead.
///
/// # Examples
///
/// ```
/// use unistore::Store;
///
/// enum Action {
///     Add(i32),
/// }
///
/// let store = Store::new(|state: Option<&i32>, action: &Action| match action {
///     Action::Add(n) => state.copied().unwrap_or_default() + n,
/// });
/// assert!(store.get_state().is_none());
///
/// let weak = store.downgrade();
/// let _logger = store.subscribe(move || {
///     if let Some(store) = weak.upgrade() {
///         println!("state is now {:?}", store.get_state());
///     }
/// });
///
/// store.dispatch(Action::Add(2)).unwrap();
/// assert_eq!(store.get_state().as_deref(), Some(&2));
/// ```
pub struct Store<S, A, E = Infallible> {
    inner: Arc<StoreInner<S, A, E>>,
}

/// Non-owning handle to a [`Store`], for use inside listeners.
///
/// Obtained from [`Store::downgrade`]. It does not keep the store alive.
pub struct WeakStore<S, A, E = Infallible> {
    inner: Weak<StoreInner<S, A, E>>,
}

impl<S, A, E> WeakStore<S, A, E> {
    /// A strong handle, or `None` once every [`Store`] handle has been dropped.
    pub fn upgrade(&self) -> Option<Store<S, A, E>> {
        self.inner.upgrade().map(|inner| Store { inner })
    }
}

impl<S, A, E> Clone for WeakStore<S, A, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<S, A, E> fmt::Debug for WeakStore<S, A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakStore")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl<S, A> Store<S, A, Infallible>
where
    S: Send + Sync + 'static,
    A: 'static,
{
    /// Create an uninitialized store from an infallible reducer.
    ///
    /// The reducer receives `None` as the previous state on its first call.
    pub fn new<R>(reducer: R) -> Self
    where
        R: Fn(Option<&S>, &A) -> S + Send + Sync + 'static,
    {
        Self::from_reducer(Box::new(move |state: Option<&S>, action: &A| {
            Ok::<S, Infallible>(reducer(state, action))
        }))
    }
}

impl<S, A, E> Store<S, A, E>
where
    S: Send + Sync + 'static,
    A: 'static,
    E: 'static,
{
    /// Create an uninitialized store from a reducer that may reject actions.
    ///
    /// A rejected action leaves the state untouched and is reported as
    /// [`DispatchError::Reducer`].
    pub fn fallible<R>(reducer: R) -> Self
    where
        R: Fn(Option<&S>, &A) -> Result<S, E> + Send + Sync + 'static,
    {
        Self::from_reducer(Box::new(reducer))
    }

    fn from_reducer(reducer: Box<DynReducer<S, A, E>>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(None),
                listeners: Arc::new(RwLock::new(BTreeMap::new())),
                reducer,
                next_id: AtomicU64::new(0),
                dispatching: Mutex::new(()),
            }),
        }
    }

    /// Initialize the store by reducing a bootstrap action against the absent
    /// state.
    pub fn bootstrap(self, action: A) -> Result<Self, DispatchError<E>> {
        self.dispatch(action)?;
        Ok(self)
    }

    /// A handle that does not keep the store alive.
    pub fn downgrade(&self) -> WeakStore<S, A, E> {
        WeakStore {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// The current state, or `None` before the first successful dispatch.
    ///
    /// Returns a shared handle, not a copy. Two calls without a dispatch in
    /// between return the same `Arc`. The reducer runs outside the state
    /// lock, so reads never wait for a dispatch in progress; they see the
    /// state from before it.
    pub fn get_state(&self) -> Option<Arc<S>> {
        lock::read(&self.inner.state).clone()
    }

    /// Borrow the current state without cloning the handle.
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(Option<&S>) -> R,
    {
        let state = self.get_state();
        f(state.as_deref())
    }

    /// Whether at least one dispatch has succeeded.
    pub fn is_initialized(&self) -> bool {
        lock::read(&self.inner.state).is_some()
    }

    /// Number of currently registered listeners.
    pub fn subscriber_count(&self) -> usize {
        lock::read(&self.inner.listeners).len()
    }

    /// Register a listener to be called after every dispatch.
    ///
    /// Listeners run synchronously, with no arguments, in registration order.
    /// Registering the same callback twice creates two registrations, each
    /// removable through its own [`Subscription`].
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.register(Arc::new(move || {
            listener();
            Ok::<(), BoxError>(())
        }))
    }

    /// Register a listener whose failure aborts the current fan-out.
    ///
    /// An `Err` is returned from [`dispatch`](Self::dispatch) as
    /// [`DispatchError::Listener`]; listeners after it are skipped for that
    /// dispatch.
    pub fn subscribe_fallible<F, Err>(&self, listener: F) -> Subscription
    where
        F: Fn() -> Result<(), Err> + Send + Sync + 'static,
        Err: Into<BoxError>,
    {
        self.register(Arc::new(move || {
            listener().map_err(|err| -> BoxError { err.into() })
        }))
    }

    fn register(&self, listener: Arc<Listener>) -> Subscription {
        let id = SubscriptionId::from_raw(self.inner.next_id.fetch_add(1, Ordering::SeqCst));
        {
            let mut listeners = lock::write(&self.inner.listeners);
            listeners.insert(id, listener);
            tracing::trace!(%id, listeners = listeners.len(), "listener subscribed");
        }
        Subscription::new(id, Arc::downgrade(&self.inner.listeners))
    }

    /// Reduce `action` into a new state and notify every listener.
    ///
    /// Either both the state update and the fan-out happen or neither does: a
    /// reducer error or panic leaves the previous state in place and calls no
    /// listener. The fan-out iterates a snapshot of the listeners taken after
    /// the state was replaced, so listeners added while it runs first hear
    /// about the next dispatch, and listeners removed while it runs still
    /// receive this one.
    ///
    /// Listeners may dispatch again; the nested dispatch finishes, including
    /// its own fan-out, before the remaining listeners of this one run. A
    /// reducer must not dispatch to its own store.
    pub fn dispatch(&self, action: A) -> Result<(), DispatchError<E>> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("store_dispatch").entered();

        {
            let _dispatching = lock::exclusive(&self.inner.dispatching);
            let current = self.get_state();
            let next = match (self.inner.reducer)(current.as_deref(), &action) {
                Ok(next) => next,
                Err(err) => {
                    tracing::debug!("reducer rejected action; state unchanged");
                    return Err(DispatchError::Reducer(err));
                }
            };
            *lock::write(&self.inner.state) = Some(Arc::new(next));
        }

        self.notify()
    }

    fn notify(&self) -> Result<(), DispatchError<E>> {
        let snapshot: Vec<(SubscriptionId, Arc<Listener>)> = lock::read(&self.inner.listeners)
            .iter()
            .map(|(id, listener)| (*id, Arc::clone(listener)))
            .collect();

        tracing::trace!(listeners = snapshot.len(), "notifying listeners");
        for (id, listener) in snapshot {
            if let Err(source) = listener() {
                tracing::debug!(%id, error = %source, "listener failed; fan-out stopped");
                return Err(DispatchError::Listener { id, source });
            }
        }
        Ok(())
    }
}

impl<S, A, E> Clone for Store<S, A, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, A, E> fmt::Debug for Store<S, A, E>
where
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &lock::read(&self.inner.state))
            .field("listeners", &lock::read(&self.inner.listeners).len())
            .finish()
    }
}
