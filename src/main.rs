//! Fire & Water entry point
//!
//! Headless driver: no window or renderer, just the fixed loop feeding scripted
//! intents into the simulation and logging what happens.
//!
//! Usage: `fire-water [settings.json]`

use std::path::Path;

use fire_water::Settings;
use fire_water::sim::{GameEvent, GameState, Snapshot, step};

fn main() {
    env_logger::init();
    log::info!("Fire & Water (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };

    let mut state = match GameState::new(&settings) {
        Ok(state) => state,
        Err(err) => {
            log::error!("Cannot build level: {}", err);
            std::process::exit(1);
        }
    };
    println!("{}", state.grid);

    for frame in 0..settings.max_frames {
        let input = demo::input_for(frame);
        let outcome = step(&mut state, &input, settings.frame_time);

        for event in &state.events {
            match event {
                GameEvent::Respawned {
                    element,
                    lives_left,
                } => log::info!("{} respawned, {} lives left", element.as_str(), lives_left),
                GameEvent::ReachedExit { element } => {
                    log::info!("{} is at its exit", element.as_str())
                }
                GameEvent::Won | GameEvent::GameOver => {}
            }
        }

        if outcome.phase.is_terminal() {
            break;
        }
    }

    let snapshot = Snapshot::capture(&state);
    log::debug!(
        "Final snapshot: {} tiles, {} characters",
        snapshot.tiles.len(),
        snapshot.characters.len()
    );
    println!("{}", state);
}

/// Scripted stand-in for keyboard input
mod demo {
    use fire_water::sim::{CharacterIntent, TickInput};

    /// Both characters walk right in bursts and hop every second
    pub fn input_for(frame: u32) -> TickInput {
        let walking = frame % 90 < 60;
        let hop = frame.is_multiple_of(60);
        TickInput {
            fireboy: CharacterIntent {
                move_right: walking,
                jump: hop,
                ..Default::default()
            },
            watergirl: CharacterIntent {
                move_left: !walking,
                move_right: walking,
                jump: hop,
            },
        }
    }
}
