//! Registry of live state instances, keyed by kind.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::error::TransitionError;
use super::factory::StateFactory;
use super::state::{BoxedState, State, StateKind};

/// Owns every live state instance on behalf of a machine.
///
/// The registry holds at most one instance per kind. Instances are
/// constructed lazily through the [`StateFactory`] the first time a kind
/// is resolved, and they stay registered after leaving the active slot so
/// that returning to a kind reuses the same instance rather than building
/// a fresh one.
///
/// ```
/// use statecraft::core::{State, StateFactory, StateRegistry};
/// use statecraft::kind_enum;
///
/// kind_enum! {
///     enum Movement {
///         Idle,
///         Walk,
///     }
/// }
///
/// struct Idle;
///
/// impl State<()> for Idle {
///     type Kind = Movement;
///
///     fn kind(&self) -> Movement {
///         Movement::Idle
///     }
/// }
///
/// let factory = StateFactory::new(|kind| match kind {
///     Movement::Idle => Some(Idle.boxed()),
///     Movement::Walk => None,
/// });
/// let mut registry = StateRegistry::new(factory);
///
/// assert!(!registry.contains(Movement::Idle));
/// let state = registry.resolve(Movement::Idle).unwrap();
/// assert_eq!(state.kind(), Movement::Idle);
/// assert!(registry.contains(Movement::Idle));
/// ```
pub struct StateRegistry<K: StateKind, O> {
    factory: StateFactory<K, O>,
    live: HashMap<K, BoxedState<K, O>>,
}

impl<K: StateKind, O> StateRegistry<K, O> {
    /// Creates an empty registry backed by `factory`.
    pub fn new(factory: StateFactory<K, O>) -> Self {
        Self {
            factory,
            live: HashMap::new(),
        }
    }

    /// Returns the live instance for `kind`, constructing it on first use.
    ///
    /// Fails with [`TransitionError::InvalidTarget`] when the factory has
    /// no constructor for `kind`, and with [`TransitionError::KindMismatch`]
    /// when the factory's output reports a different kind than requested.
    /// Neither failure registers anything.
    pub fn resolve(&mut self, kind: K) -> Result<&mut dyn State<O, Kind = K>, TransitionError<K>> {
        match self.live.entry(kind) {
            Entry::Occupied(entry) => Ok(entry.into_mut().as_mut()),
            Entry::Vacant(entry) => {
                let state = self
                    .factory
                    .construct(kind)
                    .ok_or(TransitionError::InvalidTarget(kind))?;
                let actual = state.kind();
                if actual != kind {
                    return Err(TransitionError::KindMismatch {
                        requested: kind,
                        actual,
                    });
                }
                Ok(entry.insert(state).as_mut())
            }
        }
    }

    /// Registers an externally constructed instance under its own kind.
    ///
    /// Any instance already registered for that kind is dropped first, so
    /// a stale instance can never shadow the one just supplied.
    pub fn install(&mut self, state: BoxedState<K, O>) -> K {
        let kind = state.kind();
        if self.live.insert(kind, state).is_some() {
            log::debug!("dropped stale instance of {}", kind.name());
        }
        kind
    }

    /// Drops the live instance for `kind`, if any. Returns whether one
    /// was registered.
    pub fn retire(&mut self, kind: K) -> bool {
        self.live.remove(&kind).is_some()
    }

    /// Shared access to the live instance for `kind`.
    pub fn get(&self, kind: K) -> Option<&dyn State<O, Kind = K>> {
        self.live.get(&kind).map(|state| state.as_ref())
    }

    /// Exclusive access to the live instance for `kind`.
    pub fn get_mut(&mut self, kind: K) -> Option<&mut dyn State<O, Kind = K>> {
        // A match gives each arm its own unsizing coercion site; `map` would
        // pin the boxed lifetime and fail to borrow-check.
        match self.live.get_mut(&kind) {
            Some(state) => Some(state.as_mut()),
            None => None,
        }
    }

    /// Whether an instance for `kind` is currently registered.
    pub fn contains(&self, kind: K) -> bool {
        self.live.contains_key(&kind)
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Whether no instances are registered.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Drops every live instance.
    pub fn clear(&mut self) {
        self.live.clear();
    }
}
