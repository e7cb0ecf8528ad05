//! Read-only frame snapshot for the renderer
//!
//! Presentation state (sprites, shapes, textures) never lives in the
//! simulation. The renderer gets plain positions and colours instead.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::character::{Character, Element};
use super::collision::Rect;
use super::state::{GamePhase, GameState};
use super::tile::{Color, TileType};

/// A non-empty tile to draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileView {
    pub kind: TileType,
    /// Top-left corner in world units
    pub pos: Vec2,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterView {
    pub name: String,
    pub element: Element,
    pub bounds: Rect,
    pub color: Color,
    pub lives: u32,
}

impl From<&Character> for CharacterView {
    fn from(ch: &Character) -> Self {
        Self {
            name: ch.name().to_owned(),
            element: ch.element(),
            bounds: ch.bounds(),
            color: ch.element().color(),
            lives: ch.lives(),
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub world: Rect,
    pub tiles: Vec<TileView>,
    pub characters: Vec<CharacterView>,
    pub phase: GamePhase,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let tiles = state
            .grid
            .tiles()
            .filter(|tile| tile.kind() != TileType::Empty)
            .map(|tile| TileView {
                kind: tile.kind(),
                pos: tile.world_pos(),
                color: tile.kind().color(),
            })
            .collect();

        Self {
            world: state.grid.world_bounds(),
            tiles,
            characters: state
                .characters()
                .into_iter()
                .map(CharacterView::from)
                .collect(),
            phase: state.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::Grid;

    #[test]
    fn test_capture_skips_empty_tiles() {
        let grid = Grid::from_layout(
            "......
             .w..f.
             ......
             ......
             ..F.W.
             ######",
        )
        .unwrap();
        let state = GameState::with_grid(grid, &Settings::default());
        let snapshot = Snapshot::capture(&state);

        assert_eq!(snapshot.tiles.len(), 10);
        assert!(snapshot.tiles.iter().all(|t| t.kind != TileType::Empty));
        let exit = snapshot
            .tiles
            .iter()
            .find(|t| t.kind == TileType::ExitFire)
            .unwrap();
        assert_eq!(exit.pos, Vec2::new(192.0, 48.0));
        assert_eq!(exit.color, Color::rgb(255, 165, 0));

        assert_eq!(snapshot.characters.len(), 2);
        assert_eq!(snapshot.characters[0].name, "Fireboy");
        assert_eq!(snapshot.characters[0].color, Color::RED);
        assert_eq!(snapshot.characters[1].color, Color::BLUE);
        assert_eq!(snapshot.characters[1].bounds.size, Vec2::splat(48.0));
        assert_eq!(snapshot.phase, GamePhase::Playing);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(&Settings::default()).unwrap();
        let json = serde_json::to_string(&Snapshot::capture(&state)).unwrap();
        assert!(json.contains("\"Fireboy\""));
    }
}
