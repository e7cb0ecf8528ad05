//! Character-vs-grid collision detection and response
//!
//! Characters are axis-aligned boxes one tile in size. Each frame, after
//! integration, every grid cell the box touches is classified relative to the
//! character's affinity: ground to stand on, a hazard that costs a life, or the
//! character's own exit. Only vertical separation is modeled.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::character::Character;
use super::grid::Grid;
use crate::consts::TILE_SIZE;

/// Axis-aligned rectangle in world units (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Overlap with positive area. Boxes that only share an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left().max(other.left()) < self.right().min(other.right())
            && self.top().max(other.top()) < self.bottom().min(other.bottom())
    }
}

/// Outcome of one character's collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Contact {
    /// Overlapping the character's own exit at the end of the pass
    pub reached_exit: bool,
    /// Touched a lethal hazard and was sent back to its spawn point
    pub respawned: bool,
}

/// Inclusive (col, row) range of cells touched by `rect`, clamped to the grid
fn touched_cells(grid: &Grid, rect: &Rect) -> (i32, i32, i32, i32) {
    let left_col = ((rect.left() / TILE_SIZE).floor() as i32).max(0);
    let right_col = ((rect.right() / TILE_SIZE).floor() as i32).min(grid.width() - 1);
    let top_row = ((rect.top() / TILE_SIZE).floor() as i32).max(0);
    let bottom_row = ((rect.bottom() / TILE_SIZE).floor() as i32).min(grid.height() - 1);
    (left_col, right_col, top_row, bottom_row)
}

/// Resolve a character against every grid cell its box touches.
///
/// Cells are scanned row by row, top to bottom. For a tile that is solid for
/// this character and truly overlaps the box, the character is snapped on top
/// when its center is above the tile's center, otherwise pushed below it with
/// vertical velocity zeroed. Either way it counts as grounded. The box is
/// recomputed after every correction so later cells see the moved character.
///
/// Any touched hazard of the opposite element respawns the character at
/// `respawn` and ends the pass immediately.
pub fn resolve_tile_collisions(grid: &Grid, ch: &mut Character, respawn: Vec2) -> Contact {
    let mut contact = Contact::default();
    let element = ch.element();
    let mut bounds = ch.bounds();
    let (left_col, right_col, top_row, bottom_row) = touched_cells(grid, &bounds);

    for row in top_row..=bottom_row {
        for col in left_col..=right_col {
            let Some(tile) = grid.tile(col, row) else {
                continue;
            };
            let kind = tile.kind();
            let tile_rect = tile.rect();

            if kind.is_solid_for(element) && bounds.intersects(&tile_rect) {
                ch.set_on_ground(true);
                if bounds.center().y < tile_rect.center().y {
                    ch.set_position(Vec2::new(bounds.left(), tile_rect.top() - bounds.size.y));
                } else {
                    ch.set_position(Vec2::new(bounds.left(), tile_rect.bottom()));
                    ch.stop_vertical_movement();
                }
                bounds = ch.bounds();
            }

            if kind.is_lethal_for(element) {
                ch.take_damage_and_respawn(respawn);
                log::info!("{} touched {} at ({}, {})", ch.name(), kind, col, row);
                return Contact {
                    reached_exit: false,
                    respawned: true,
                };
            }

            if kind.is_exit_for(element) && bounds.intersects(&tile_rect) {
                contact.reached_exit = true;
            }
        }
    }

    contact
}
