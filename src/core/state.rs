//! State and state-kind traits.
//!
//! A machine's states are trait objects implementing [`State`]; their
//! identity is the [`StateKind`] discriminant they report. Two instances
//! of the same kind are the same state as far as transition decisions are
//! concerned, even if they are distinct allocations.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Discriminant for a closed set of states.
///
/// One fieldless `Copy` enum per machine names every state the machine
/// can be in. Kinds are what `current` and the history stack store, what
/// the registry keys instances by, and what transition requests name.
///
/// # Required Traits
///
/// - `Copy + Eq + Hash`: kinds are cheap tokens used as map keys
/// - `Debug`: kinds appear in errors and diagnostics
/// - `Serialize` + `Deserialize`: kinds appear in snapshots and journals
///
/// The [`kind_enum!`](crate::kind_enum) macro declares an enum with all
/// of the above plus the `StateKind` impl in one block.
///
/// # Example
///
/// ```rust
/// use statecraft::core::StateKind;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Movement {
///     Idle,
///     Walk,
///     Run,
/// }
///
/// impl StateKind for Movement {
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Walk => "Walk",
///             Self::Run => "Run",
///         }
///     }
/// }
///
/// assert_eq!(Movement::Walk.name(), "Walk");
/// ```
pub trait StateKind:
    Copy + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync + 'static
{
    /// Get the kind's name for display/logging.
    fn name(&self) -> &str;
}

/// Owned, type-erased state instance, as stored by the registry.
pub type BoxedState<K, O> = Box<dyn State<O, Kind = K>>;

/// A unit of behavior driven by one state machine.
///
/// States carry their own data and receive lifecycle and tick hooks. All
/// hooks take the owning entity's context `&mut O`, never the machine
/// itself: a hook therefore cannot re-enter `change_to`/`substitute` on
/// its own machine, which removes the classic synchronous-reentrancy
/// hazard at compile time.
///
/// Hook contract:
///
/// - [`on_enter`](State::on_enter) runs exactly once when the instance
///   becomes current.
/// - [`on_exit`](State::on_exit) runs exactly once when it stops being
///   current, before any hook on the replacement.
/// - [`update`](State::update) / [`fixed_update`](State::fixed_update)
///   run once per regular/fixed tick, only while current.
///
/// Hooks are assumed not to fail; a panic inside a hook propagates to
/// the tick driver or transition caller unchanged.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{State, StateKind};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Movement {
///     Idle,
///     Walk,
/// }
///
/// impl StateKind for Movement {
///     fn name(&self) -> &str {
///         match self {
///             Self::Idle => "Idle",
///             Self::Walk => "Walk",
///         }
///     }
/// }
///
/// struct Player {
///     speed: f32,
/// }
///
/// struct Walk {
///     pace: f32,
/// }
///
/// impl State<Player> for Walk {
///     type Kind = Movement;
///
///     fn kind(&self) -> Movement {
///         Movement::Walk
///     }
///
///     fn on_enter(&mut self, player: &mut Player) {
///         player.speed = self.pace;
///     }
///
///     fn on_exit(&mut self, player: &mut Player) {
///         player.speed = 0.0;
///     }
/// }
///
/// let mut player = Player { speed: 0.0 };
/// let mut walk = Walk { pace: 2.5 };
/// walk.on_enter(&mut player);
/// assert_eq!(player.speed, 2.5);
/// assert_eq!(walk.kind(), Movement::Walk);
/// ```
pub trait State<O>: Send {
    /// The closed kind set this state belongs to.
    type Kind: StateKind;

    /// The kind identifying this instance.
    ///
    /// Must be stable for the lifetime of the instance; the registry
    /// files the instance under it.
    fn kind(&self) -> Self::Kind;

    /// Invoked when this instance becomes the current state.
    fn on_enter(&mut self, _owner: &mut O) {}

    /// Invoked when this instance stops being the current state.
    fn on_exit(&mut self, _owner: &mut O) {}

    /// Invoked once per regular tick while current.
    fn update(&mut self, _owner: &mut O) {}

    /// Invoked once per fixed-rate tick while current.
    fn fixed_update(&mut self, _owner: &mut O) {}

    /// Box this state for installation into a machine.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statecraft::core::{BoxedState, State};
    /// use statecraft::kind_enum;
    ///
    /// kind_enum! {
    ///     enum Phase {
    ///         Ready,
    ///     }
    /// }
    ///
    /// struct Ready;
    ///
    /// impl State<()> for Ready {
    ///     type Kind = Phase;
    ///
    ///     fn kind(&self) -> Phase {
    ///         Phase::Ready
    ///     }
    /// }
    ///
    /// let boxed: BoxedState<Phase, ()> = Ready.boxed();
    /// assert_eq!(boxed.kind(), Phase::Ready);
    /// ```
    fn boxed(self) -> BoxedState<Self::Kind, O>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}
