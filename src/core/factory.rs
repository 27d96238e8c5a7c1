//! Instance construction for state kinds.
//!
//! The factory is the one place where the concrete variant set must be
//! known: given a kind, it produces a default instance of that kind, or
//! `None` when it cannot. It is injected into the machine at
//! construction; there is no ambient or global lookup.

use super::state::{BoxedState, StateKind};

/// Constructs default state instances by kind.
///
/// Construction must be side-effect-free beyond allocation; the machine
/// is responsible for running `on_enter` once the instance becomes
/// current. Returning `None` marks the kind as not constructible, which
/// the machine surfaces as
/// [`TransitionError::InvalidTarget`](super::TransitionError::InvalidTarget).
///
/// # Example
///
/// ```rust
/// use statecraft::core::{State, StateFactory};
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
/// struct Walk;
///
/// impl State<()> for Idle {
///     type Kind = Movement;
///
///     fn kind(&self) -> Movement {
///         Movement::Idle
///     }
/// }
///
/// impl State<()> for Walk {
///     type Kind = Movement;
///
///     fn kind(&self) -> Movement {
///         Movement::Walk
///     }
/// }
///
/// let factory = StateFactory::new(|kind| match kind {
///     Movement::Idle => Some(Idle.boxed()),
///     Movement::Walk => Some(Walk.boxed()),
/// });
///
/// let state = factory.construct(Movement::Walk).unwrap();
/// assert_eq!(state.kind(), Movement::Walk);
/// ```
pub struct StateFactory<K: StateKind, O> {
    constructor: Box<dyn Fn(K) -> Option<BoxedState<K, O>> + Send + Sync>,
}

impl<K: StateKind, O> StateFactory<K, O> {
    /// Wrap a construction function.
    ///
    /// The function must be thread-safe (`Send + Sync`); it is called
    /// lazily, the first time each kind is requested.
    pub fn new<F>(constructor: F) -> Self
    where
        F: Fn(K) -> Option<BoxedState<K, O>> + Send + Sync + 'static,
    {
        StateFactory {
            constructor: Box::new(constructor),
        }
    }

    /// Produce a fresh instance of `kind`, or `None` if the factory
    /// does not cover it.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statecraft::core::{State, StateFactory};
    /// use statecraft::kind_enum;
    ///
    /// kind_enum! {
    ///     enum Screen {
    ///         Title,
    ///         Credits,
    ///     }
    /// }
    ///
    /// struct Title;
    ///
    /// impl State<()> for Title {
    ///     type Kind = Screen;
    ///
    ///     fn kind(&self) -> Screen {
    ///         Screen::Title
    ///     }
    /// }
    ///
    /// // Only `Title` is constructible.
    /// let factory = StateFactory::<Screen, ()>::new(|kind| match kind {
    ///     Screen::Title => Some(Title.boxed()),
    ///     Screen::Credits => None,
    /// });
    ///
    /// assert!(factory.construct(Screen::Title).is_some());
    /// assert!(factory.construct(Screen::Credits).is_none());
    /// ```
    pub fn construct(&self, kind: K) -> Option<BoxedState<K, O>> {
        (self.constructor)(kind)
    }
}
