//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, threaded explicitly into generation
//! - Grid is read-only once generated
//! - Fixed character processing order (Fireboy, then Watergirl)
//! - No rendering or platform dependencies

pub mod character;
pub mod collision;
pub mod grid;
pub mod state;
pub mod tick;
pub mod tile;
pub mod view;

pub use character::{Character, Element};
pub use collision::{Contact, Rect, resolve_tile_collisions};
pub use grid::{Grid, GridError, generate, rng_for_seed};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{CharacterIntent, StepOutcome, TickInput, step};
pub use tile::{Color, Tile, TileType};
pub use view::{CharacterView, Snapshot, TileView};
