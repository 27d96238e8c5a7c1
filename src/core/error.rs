//! Transition error types.

use super::state::StateKind;
use thiserror::Error;

/// Errors surfaced by transition requests.
///
/// A rejected transition has no partial effect: every failure below is
/// detected before any lifecycle hook runs, so `current` and the history
/// stack are exactly as they were before the call.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum TransitionError<K: StateKind> {
    /// The factory produced no instance for the requested kind.
    #[error("no state could be constructed for kind {0:?}")]
    InvalidTarget(K),

    /// A return to the previous state was requested with an empty
    /// history stack. Recoverable caller-logic condition.
    #[error("cannot change to previous state: history is empty")]
    EmptyHistory,

    /// The factory produced an instance that does not report the
    /// requested kind. Rejected before anything is registered.
    #[error("factory produced a state of kind {actual:?} when {requested:?} was requested")]
    KindMismatch { requested: K, actual: K },
}
