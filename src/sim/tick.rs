//! Per-frame simulation step
//!
//! One frame: apply intents, integrate both characters, resolve each against
//! the grid, then check for a win or an exhausted life counter.

use super::character::Character;
use super::collision::resolve_tile_collisions;
use super::state::{GameEvent, GamePhase, GameState};

/// Discrete movement commands for one character
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharacterIntent {
    pub move_left: bool,
    pub move_right: bool,
    pub jump: bool,
}

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub fireboy: CharacterIntent,
    pub watergirl: CharacterIntent,
}

/// Result of a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub won: bool,
    pub phase: GamePhase,
}

impl StepOutcome {
    fn of(state: &GameState) -> Self {
        Self {
            won: state.won(),
            phase: state.phase,
        }
    }
}

/// Advance the game by `dt` seconds of wall time.
///
/// Terminal phases (`Won`, `GameOver`) freeze the state: further calls only
/// report the outcome.
pub fn step(state: &mut GameState, input: &TickInput, dt: f32) -> StepOutcome {
    state.events.clear();
    if state.phase.is_terminal() {
        return StepOutcome::of(state);
    }
    let dt = dt.max(0.0);

    apply_intent(&mut state.fireboy, &input.fireboy, dt);
    apply_intent(&mut state.watergirl, &input.watergirl, dt);

    let world = state.grid.world_bounds();
    state.fireboy.update(dt, &world);
    state.watergirl.update(dt, &world);

    let was_at_exit = [state.fireboy_at_exit, state.watergirl_at_exit];
    let mut at_exit = [false; 2];
    let mut out_of_lives = false;
    for (i, ch) in [&mut state.fireboy, &mut state.watergirl]
        .into_iter()
        .enumerate()
    {
        let respawn = state.grid.spawn_point(ch.element());
        let contact = resolve_tile_collisions(&state.grid, ch, respawn);
        if contact.respawned {
            state.events.push(GameEvent::Respawned {
                element: ch.element(),
                lives_left: ch.lives(),
            });
            out_of_lives |= ch.lives() == 0;
        }
        if contact.reached_exit && !was_at_exit[i] {
            log::debug!("{} reached its exit", ch.name());
            state.events.push(GameEvent::ReachedExit {
                element: ch.element(),
            });
        }
        at_exit[i] = contact.reached_exit;
    }
    [state.fireboy_at_exit, state.watergirl_at_exit] = at_exit;
    state.frame += 1;

    if state.fireboy_at_exit && state.watergirl_at_exit {
        state.phase = GamePhase::Won;
        state.events.push(GameEvent::Won);
        log::info!("Both characters reached their exits on frame {}", state.frame);
    } else if out_of_lives {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver);
        log::info!("Out of lives on frame {}", state.frame);
    }

    StepOutcome::of(state)
}

fn apply_intent(ch: &mut Character, intent: &CharacterIntent, dt: f32) {
    if intent.move_left {
        ch.move_left(dt);
    }
    if intent.move_right {
        ch.move_right(dt);
    }
    if intent.jump {
        ch.jump();
    }
}
