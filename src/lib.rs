//! Statecraft: a hierarchical state machine with a history stack.
//!
//! A [`StateMachine`] drives one active state at a time on behalf of an
//! owner value, remembering where it came from on a stack so callers can
//! unwind with [`change_to_previous`]. State instances are constructed on
//! demand through a [`StateFactory`], then parked and reused whenever
//! their kind becomes current again.
//!
//! # Core Concepts
//!
//! - **Kinds**: lightweight `Copy` handles declared with [`kind_enum!`],
//!   naming each state the machine can be in
//! - **States**: behavior bound to a kind via the [`State`] trait's
//!   lifecycle hooks (`on_enter`, `on_exit`, `update`, `fixed_update`)
//! - **History**: a stack of former current kinds, with swap semantics so
//!   toggling between two states never grows it
//! - **Journal**: an append-only record of every completed transition
//!
//! # Example
//!
//! ```rust
//! use statecraft::kind_enum;
//! use statecraft::{State, StateFactory, StateMachine};
//!
//! kind_enum! {
//!     enum Mode {
//!         Explore,
//!         Combat,
//!     }
//! }
//!
//! struct Player {
//!     weapon_drawn: bool,
//! }
//!
//! struct Explore;
//! struct Combat;
//!
//! impl State<Player> for Explore {
//!     type Kind = Mode;
//!
//!     fn kind(&self) -> Mode {
//!         Mode::Explore
//!     }
//! }
//!
//! impl State<Player> for Combat {
//!     type Kind = Mode;
//!
//!     fn kind(&self) -> Mode {
//!         Mode::Combat
//!     }
//!
//!     fn on_enter(&mut self, player: &mut Player) {
//!         player.weapon_drawn = true;
//!     }
//!
//!     fn on_exit(&mut self, player: &mut Player) {
//!         player.weapon_drawn = false;
//!     }
//! }
//!
//! let mut player = Player {
//!     weapon_drawn: false,
//! };
//! let mut machine = StateMachine::new(StateFactory::new(|kind| {
//!     Some(match kind {
//!         Mode::Explore => Explore.boxed(),
//!         Mode::Combat => Combat.boxed(),
//!     })
//! }));
//!
//! machine.change_to(Mode::Explore, &mut player).unwrap();
//! machine.change_to(Mode::Combat, &mut player).unwrap();
//! assert!(player.weapon_drawn);
//! assert_eq!(machine.previous(), Some(Mode::Explore));
//!
//! machine.change_to_previous(&mut player).unwrap();
//! assert!(!player.weapon_drawn);
//! ```
//!
//! [`change_to_previous`]: StateMachine::change_to_previous

pub mod core;

// Re-export commonly used types
pub use core::{
    BoxedState, MachineSnapshot, State, StateFactory, StateKind, StateMachine, StateRegistry,
    TransitionCause, TransitionError, TransitionJournal, TransitionRecord,
};
