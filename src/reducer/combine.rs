use super::DynReducer;
use std::collections::btree_map::{self, BTreeMap};
use std::convert::Infallible;
use std::fmt;

/// State produced by a [`CombineReducers`] root reducer: one value per named
/// slice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slices<V> {
    slices: BTreeMap<&'static str, V>,
}

impl<V> Slices<V> {
    /// The value of slice `name`, if that slice exists.
    pub fn get(&self, name: &str) -> Option<&V> {
        self.slices.get(name)
    }

    /// Slices in name order.
    pub fn iter(&self) -> btree_map::Iter<'_, &'static str, V> {
        self.slices.iter()
    }

    /// Number of slices.
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Whether there are no slices at all.
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

impl<V> Default for Slices<V> {
    fn default() -> Self {
        Self {
            slices: BTreeMap::new(),
        }
    }
}

impl<V> FromIterator<(&'static str, V)> for Slices<V> {
    fn from_iter<I: IntoIterator<Item = (&'static str, V)>>(iter: I) -> Self {
        Self {
            slices: iter.into_iter().collect(),
        }
    }
}

impl<'a, V> IntoIterator for &'a Slices<V> {
    type Item = (&'a &'static str, &'a V);
    type IntoIter = btree_map::Iter<'a, &'static str, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.slices.iter()
    }
}

/// Builds a root reducer from one reducer per named slice of state.
///
/// Each slice reducer only ever sees its own slice: `None` while the store is
/// uninitialized or the slice is missing, otherwise the previous value of that
/// slice. Slices are reduced in registration order and the first error aborts
/// the whole reduction. Slices in the previous state without a registered
/// reducer are not carried over.
///
/// # Examples
///
/// ```
/// use unistore::{CombineReducers, Store};
///
/// enum Action {
///     Bump,
/// }
///
/// fn clicks(state: Option<&u32>, action: &Action) -> u32 {
///     let state = state.copied().unwrap_or_default();
///     match action {
///         Action::Bump => state + 1,
///     }
/// }
///
/// fn views(state: Option<&u32>, _: &Action) -> u32 {
///     state.copied().unwrap_or(100)
/// }
///
/// let root = CombineReducers::new()
///     .slice("clicks", clicks)
///     .slice("views", views)
///     .build();
/// let store = Store::fallible(root);
///
/// store.dispatch(Action::Bump).unwrap();
/// let state = store.get_state().unwrap();
/// assert_eq!(state.get("clicks"), Some(&1));
/// assert_eq!(state.get("views"), Some(&100));
/// ```
pub struct CombineReducers<V, A, E = Infallible> {
    slices: Vec<(&'static str, Box<DynReducer<V, A, E>>)>,
}

impl<V, A> CombineReducers<V, A, Infallible>
where
    V: 'static,
    A: 'static,
{
    /// Start a combination of infallible slice reducers.
    pub fn new() -> Self {
        Self { slices: Vec::new() }
    }
}

impl<V, A> Default for CombineReducers<V, A, Infallible>
where
    V: 'static,
    A: 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V, A, E> CombineReducers<V, A, E>
where
    V: 'static,
    A: 'static,
    E: 'static,
{
    /// Start a combination whose slice reducers may fail with `E`.
    pub fn fallible() -> Self {
        Self { slices: Vec::new() }
    }

    /// Add an infallible reducer for slice `name`.
    ///
    /// Registering a name twice replaces the earlier reducer.
    pub fn slice<R>(self, name: &'static str, reducer: R) -> Self
    where
        R: Fn(Option<&V>, &A) -> V + Send + Sync + 'static,
    {
        self.insert(
            name,
            Box::new(move |state: Option<&V>, action: &A| Ok::<V, E>(reducer(state, action))),
        )
    }

    /// Add a fallible reducer for slice `name`.
    pub fn try_slice<R>(self, name: &'static str, reducer: R) -> Self
    where
        R: Fn(Option<&V>, &A) -> Result<V, E> + Send + Sync + 'static,
    {
        self.insert(name, Box::new(reducer))
    }

    fn insert(mut self, name: &'static str, reducer: Box<DynReducer<V, A, E>>) -> Self {
        match self.slices.iter().position(|(existing, _)| *existing == name) {
            Some(index) => self.slices[index].1 = reducer,
            None => self.slices.push((name, reducer)),
        }
        self
    }

    /// Names of the registered slices, in reduction order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.slices.iter().map(|(name, _)| *name)
    }

    /// Run every slice reducer against its slice of `state`.
    pub fn reduce(&self, state: Option<&Slices<V>>, action: &A) -> Result<Slices<V>, E> {
        let mut next = BTreeMap::new();
        for (name, reducer) in &self.slices {
            let previous = state.and_then(|state| state.get(name));
            next.insert(*name, reducer(previous, action)?);
        }
        Ok(Slices { slices: next })
    }

    /// Turn the combination into a reducer usable with
    /// [`Store::fallible`](crate::Store::fallible).
    pub fn build(self) -> impl Fn(Option<&Slices<V>>, &A) -> Result<Slices<V>, E> + Send + Sync + 'static {
        move |state: Option<&Slices<V>>, action: &A| self.reduce(state, action)
    }
}

impl<V, A, E> fmt::Debug for CombineReducers<V, A, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.slices.iter().map(|(name, _)| name))
            .finish()
    }
}

/// Build a root reducer for a struct whose fields are independent slices.
///
/// Each field is reduced by its own reducer, which receives only that field of
/// the previous state (`None` before the first dispatch). The expansion is a
/// plain closure and can be passed to [`Store::new`](crate::Store::new) or
/// called directly.
///
/// # Example
///
/// ```
/// use unistore::{combine_reducers, Store};
///
/// #[derive(Debug, PartialEq)]
/// struct Root {
///     total: i32,
///     events: usize,
/// }
///
/// enum Action {
///     Add(i32),
/// }
///
/// fn total(state: Option<&i32>, action: &Action) -> i32 {
///     let state = state.copied().unwrap_or_default();
///     match action {
///         Action::Add(n) => state + n,
///     }
/// }
///
/// fn events(state: Option<&usize>, _: &Action) -> usize {
///     state.copied().unwrap_or_default() + 1
/// }
///
/// let store = Store::new(combine_reducers!(Root, Action { total: total, events: events }));
/// store.dispatch(Action::Add(5)).unwrap();
/// store.dispatch(Action::Add(2)).unwrap();
/// assert_eq!(*store.get_state().unwrap(), Root { total: 7, events: 2 });
/// ```
#[macro_export]
macro_rules! combine_reducers {
    ($root:ident, $action:ty { $($field:ident : $reducer:expr),+ $(,)? }) => {
        move |state: ::core::option::Option<&$root>, action: &$action| $root {
            $( $field: ($reducer)(state.map(|slice| &slice.$field), action), )+
        }
    };
}
