//! Character Movement States
//!
//! This example demonstrates a game character driven by a state machine.
//!
//! Key concepts:
//! - Lifecycle hooks mutating the owner (speed, stamina)
//! - Per-frame dispatch through tick
//! - History swap when toggling between two states
//! - Transition journal inspection
//!
//! Run with: cargo run --example character_states

use statecraft::kind_enum;
use statecraft::{State, StateFactory, StateMachine};

kind_enum! {
    enum Movement {
        Idle,
        Walk,
        Sprint,
    }
}

// Owner context the states act on
struct Character {
    position: f32,
    speed: f32,
    stamina: u32,
}

struct Idle;

impl State<Character> for Idle {
    type Kind = Movement;

    fn kind(&self) -> Movement {
        Movement::Idle
    }

    fn on_enter(&mut self, character: &mut Character) {
        character.speed = 0.0;
    }

    fn update(&mut self, character: &mut Character) {
        character.stamina = (character.stamina + 5).min(100);
    }
}

struct Walk;

impl State<Character> for Walk {
    type Kind = Movement;

    fn kind(&self) -> Movement {
        Movement::Walk
    }

    fn on_enter(&mut self, character: &mut Character) {
        character.speed = 1.5;
    }

    fn update(&mut self, character: &mut Character) {
        character.position += character.speed;
    }
}

struct Sprint;

impl State<Character> for Sprint {
    type Kind = Movement;

    fn kind(&self) -> Movement {
        Movement::Sprint
    }

    fn on_enter(&mut self, character: &mut Character) {
        character.speed = 4.0;
    }

    fn update(&mut self, character: &mut Character) {
        character.position += character.speed;
        character.stamina = character.stamina.saturating_sub(10);
    }
}

fn main() {
    env_logger::init();

    println!("=== Character Movement States ===\n");

    let mut character = Character {
        position: 0.0,
        speed: 0.0,
        stamina: 100,
    };
    let mut machine = StateMachine::new(StateFactory::new(|kind| {
        Some(match kind {
            Movement::Idle => Idle.boxed(),
            Movement::Walk => Walk.boxed(),
            Movement::Sprint => Sprint.boxed(),
        })
    }));

    machine.change_to(Movement::Idle, &mut character).unwrap();
    println!("Spawned in {:?}", machine.current().unwrap());

    println!("\nWalking for 3 frames:");
    machine.change_to(Movement::Walk, &mut character).unwrap();
    for _ in 0..3 {
        machine.tick(&mut character);
        println!("  position = {:.1}", character.position);
    }

    println!("\nSprinting for 3 frames:");
    machine.change_to(Movement::Sprint, &mut character).unwrap();
    for _ in 0..3 {
        machine.tick(&mut character);
        println!(
            "  position = {:.1}, stamina = {}",
            character.position, character.stamina
        );
    }
    println!("History is {:?}", machine.history());

    println!("\nWinding down:");
    machine.change_to_previous(&mut character).unwrap();
    println!("  back to {:?}", machine.current().unwrap());
    machine.change_to_previous(&mut character).unwrap();
    println!("  back to {:?}", machine.current().unwrap());

    println!("\nPacing between Idle and Walk never deepens the history:");
    for _ in 0..3 {
        machine.change_to(Movement::Walk, &mut character).unwrap();
        machine.change_to(Movement::Idle, &mut character).unwrap();
        println!(
            "  current = {:?}, depth = {}",
            machine.current().unwrap(),
            machine.depth()
        );
    }

    println!("\nJournal:");
    for record in machine.journal().records() {
        println!("  {:?} -> {:?} ({:?})", record.from, record.to, record.cause);
    }

    machine.shutdown(&mut character);
    println!("\n=== Example Complete ===");
}
