//! Menu Stack Navigation
//!
//! This example demonstrates stacked UI screens backed by the history
//! stack, the way pause menus nest in games.
//!
//! Key concepts:
//! - Deep push/pop navigation (screens nest, back unwinds)
//! - Substitution that replaces a screen without recording it
//! - Parked instances keeping their data between visits
//! - Handling the empty-history error at the navigation root
//!
//! Run with: cargo run --example menu_stack

use statecraft::kind_enum;
use statecraft::{State, StateFactory, StateMachine, TransitionError};

kind_enum! {
    enum Screen {
        Title,
        World,
        Pause,
        Settings,
        Audio,
    }
}

struct Game {
    paused: bool,
    volume: u8,
}

struct Title;

impl State<Game> for Title {
    type Kind = Screen;

    fn kind(&self) -> Screen {
        Screen::Title
    }
}

struct World;

impl State<Game> for World {
    type Kind = Screen;

    fn kind(&self) -> Screen {
        Screen::World
    }
}

struct Pause;

impl State<Game> for Pause {
    type Kind = Screen;

    fn kind(&self) -> Screen {
        Screen::Pause
    }

    fn on_enter(&mut self, game: &mut Game) {
        game.paused = true;
    }

    fn on_exit(&mut self, game: &mut Game) {
        game.paused = false;
    }
}

// Remembers its cursor row across visits: the instance is parked, not
// destroyed, when the screen is left.
struct Settings {
    cursor: usize,
}

impl State<Game> for Settings {
    type Kind = Screen;

    fn kind(&self) -> Screen {
        Screen::Settings
    }

    fn on_enter(&mut self, _game: &mut Game) {
        println!("    [settings] cursor at row {}", self.cursor);
    }

    fn update(&mut self, _game: &mut Game) {
        self.cursor += 1;
    }
}

struct Audio;

impl State<Game> for Audio {
    type Kind = Screen;

    fn kind(&self) -> Screen {
        Screen::Audio
    }

    fn update(&mut self, game: &mut Game) {
        game.volume = (game.volume + 10).min(100);
    }
}

fn main() {
    env_logger::init();

    println!("=== Menu Stack Navigation ===\n");

    let mut game = Game {
        paused: false,
        volume: 30,
    };
    let mut machine = StateMachine::new(StateFactory::new(|kind| {
        Some(match kind {
            Screen::Title => Title.boxed(),
            Screen::World => World.boxed(),
            Screen::Pause => Pause.boxed(),
            Screen::Settings => Settings { cursor: 0 }.boxed(),
            Screen::Audio => Audio.boxed(),
        })
    }));

    println!("Navigating in:");
    for screen in [Screen::Title, Screen::World, Screen::Pause, Screen::Settings] {
        machine.change_to(screen, &mut game).unwrap();
        println!(
            "  -> {:?} (depth {}, paused: {})",
            machine.current().unwrap(),
            machine.depth(),
            game.paused
        );
    }

    println!("\nScrolling the settings list for 2 frames:");
    machine.tick(&mut game);
    machine.tick(&mut game);

    println!("\nSwitching the settings screen for the audio page (no history record):");
    machine.substitute(Screen::Audio, &mut game).unwrap();
    machine.tick(&mut game);
    println!(
        "  on {:?}, volume now {}, previous is {:?}",
        machine.current().unwrap(),
        game.volume,
        machine.previous().unwrap()
    );

    println!("\nBacking out:");
    while let Ok(screen) = machine.change_to_previous(&mut game) {
        println!("  <- {:?} (depth {})", screen, machine.depth());
    }

    match machine.change_to_previous(&mut game) {
        Err(TransitionError::EmptyHistory) => {
            println!("  nothing left to go back to, staying on {:?}", machine.current().unwrap());
        }
        other => println!("  unexpected: {other:?}"),
    }

    println!("\nRevisiting settings (the cursor row survived):");
    machine.change_to(Screen::Settings, &mut game).unwrap();

    println!("\n=== Example Complete ===");
}
