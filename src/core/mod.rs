//! Core state machine types and logic.
//!
//! Everything the machine is made of lives here:
//! - State definitions via the [`State`] trait and [`StateKind`] handles
//! - Lazy instance construction through [`StateFactory`] and [`StateRegistry`]
//! - The [`StateMachine`] itself, with its history stack
//! - The append-only [`TransitionJournal`]

mod error;
mod factory;
mod journal;
mod machine;
mod registry;
mod state;

mod macros;

pub use error::TransitionError;
pub use factory::StateFactory;
pub use journal::{TransitionCause, TransitionJournal, TransitionRecord};
pub use machine::{MachineSnapshot, StateMachine};
pub use registry::StateRegistry;
pub use state::{BoxedState, State, StateKind};
