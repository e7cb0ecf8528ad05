//! Fire & Water - a two-character elemental platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile grid, level generation, kinematics, collisions)
//! - `settings`: Data-driven configuration (map size, seed, character tuning)
//!
//! Windowing, input mapping and drawing live outside this crate. The simulation
//! consumes per-frame elapsed time plus movement intents, and hands back a
//! read-only [`sim::Snapshot`] for presentation.

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Edge length of one tile (and of a character) in world units
    pub const TILE_SIZE: f32 = 48.0;

    /// Downward acceleration (world units/s², y grows downward)
    pub const GRAVITY: f32 = 900.0;
    /// Largest slice of a frame integrated in one go
    pub const MAX_SUB_STEP: f32 = 0.02;
    /// Maximum sub-steps per update (10 s of simulated time); the rest of an
    /// oversized frame is dropped
    pub const MAX_SUB_STEPS: u32 = 500;

    /// Character defaults
    pub const DEFAULT_SPEED: f32 = 160.0;
    pub const DEFAULT_JUMP_IMPULSE: f32 = 360.0;
    pub const DEFAULT_LIVES: u32 = 3;

    /// Platform walk: inclusive ranges for run and gap lengths (in tiles)
    pub const PLATFORM_LEN_MIN: i32 = 1;
    pub const PLATFORM_LEN_MAX: i32 = 3;
    pub const GAP_LEN_MIN: i32 = 1;
    pub const GAP_LEN_MAX: i32 = 3;

    /// Map defaults
    pub const DEFAULT_MAP_WIDTH: i32 = 14;
    pub const DEFAULT_MAP_HEIGHT: i32 = 9;
    pub const DEFAULT_SEED: u64 = 12345;
    /// Smallest width/height that still fits every fixed hazard and exit
    pub const MIN_GRID_DIM: i32 = 6;
    /// Upper bound on width * height
    pub const MAX_GRID_TILES: i32 = 1 << 20;

    /// Spawn columns (tiles), both on row `height - 2`
    pub const FIRE_SPAWN_COL: i32 = 1;
    pub const WATER_SPAWN_COL: i32 = 5;
}

/// Top-left world position of grid cell (col, row)
#[inline]
pub fn grid_to_world(col: i32, row: i32) -> Vec2 {
    Vec2::new(col as f32 * consts::TILE_SIZE, row as f32 * consts::TILE_SIZE)
}

/// Grid cell containing a world point (floored, so negatives map below zero)
#[inline]
pub fn world_to_grid(x: f32, y: f32) -> (i32, i32) {
    (
        (x / consts::TILE_SIZE).floor() as i32,
        (y / consts::TILE_SIZE).floor() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_world_mapping() {
        assert_eq!(grid_to_world(3, 2), Vec2::new(144.0, 96.0));
        assert_eq!(world_to_grid(144.0, 96.0), (3, 2));
        assert_eq!(world_to_grid(47.9, 0.0), (0, 0));
        assert_eq!(world_to_grid(-0.5, -48.5), (-1, -2));
    }
}
