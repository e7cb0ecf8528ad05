//! Game state and core simulation types

use std::fmt;

use serde::{Deserialize, Serialize};

use super::character::{Character, Element};
use super::grid::{Grid, GridError, generate};
use crate::settings::Settings;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Physics advancing every step
    Playing,
    /// Both characters stood on their exits in the same frame (terminal)
    Won,
    /// A character ran out of lives (terminal)
    GameOver,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Things that happened during the latest step, for audio/UI collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A character touched a hazard and went back to its spawn
    Respawned { element: Element, lives_left: u32 },
    /// A character started overlapping its exit this frame
    ReachedExit { element: Element },
    Won,
    GameOver,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Generation seed (0 = entropy-seeded, not reproducible)
    pub seed: u64,
    /// Level layout, read-only after construction
    pub grid: Grid,
    pub fireboy: Character,
    pub watergirl: Character,
    /// Exit flags from the latest collision pass (not sticky)
    pub fireboy_at_exit: bool,
    pub watergirl_at_exit: bool,
    pub phase: GamePhase,
    /// Steps simulated while playing
    pub frame: u64,
    /// Events raised by the latest step
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Generate a level from the settings and place both characters at their spawns
    pub fn new(settings: &Settings) -> Result<Self, GridError> {
        let grid = generate(settings.map_width, settings.map_height, settings.seed)?;
        let mut state = Self::with_grid(grid, settings);
        state.seed = settings.seed;
        Ok(state)
    }

    /// Start a run on an existing grid (hand-authored levels, tests)
    pub fn with_grid(grid: Grid, settings: &Settings) -> Self {
        let fireboy = Character::new(
            "Fireboy",
            Element::Fire,
            grid.spawn_point(Element::Fire),
            settings.lives,
        )
        .with_tuning(settings.speed, settings.jump_impulse);
        let watergirl = Character::new(
            "Watergirl",
            Element::Water,
            grid.spawn_point(Element::Water),
            settings.lives,
        )
        .with_tuning(settings.speed, settings.jump_impulse);

        Self {
            seed: 0,
            grid,
            fireboy,
            watergirl,
            fireboy_at_exit: false,
            watergirl_at_exit: false,
            phase: GamePhase::Playing,
            frame: 0,
            events: Vec::new(),
        }
    }

    pub fn won(&self) -> bool {
        self.phase == GamePhase::Won
    }

    /// Both characters, in processing order
    pub fn characters(&self) -> [&Character; 2] {
        [&self.fireboy, &self.watergirl]
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Game state ({:?}, frame {}):", self.phase, self.frame)?;
        writeln!(f, "Map: {}x{}", self.grid.width(), self.grid.height())?;
        writeln!(f, "Fireboy: {}", self.fireboy)?;
        writeln!(f, "Watergirl: {}", self.watergirl)
    }
}
