//! Tile grid: procedural level generation and spatial queries
//!
//! The grid is filled once (either by [`Grid::generate_ascending_platforms`] or
//! from a text layout) and is read-only for the rest of the run. Anything
//! outside `[0, width) x [0, height)` reads as `Solid`, which closes the level
//! without explicit border tiles.

use std::fmt;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::character::Element;
use super::collision::Rect;
use super::tile::{Tile, TileType};
use crate::consts::*;
use crate::{grid_to_world, world_to_grid};

/// Errors raised while building a grid
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid {width}x{height} is smaller than the {min}x{min} minimum")]
    TooSmall { width: i32, height: i32, min: i32 },
    #[error("grid {width}x{height} exceeds the {max} tile limit")]
    TooLarge { width: i32, height: i32, max: i32 },
    #[error("layout row {row} has {found} tiles, expected {expected}")]
    RaggedLayout {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown tile symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol { symbol: char, row: usize, col: usize },
    #[error("layout contains no rows")]
    EmptyLayout,
}

/// Build the generation RNG. Seed 0 asks for a fresh, entropy-sourced stream.
pub fn rng_for_seed(seed: u64) -> Pcg32 {
    if seed == 0 {
        Pcg32::from_rng(&mut rand::rng())
    } else {
        Pcg32::seed_from_u64(seed)
    }
}

/// Create a `width x height` grid and run the platform walk on it
pub fn generate(width: i32, height: i32, seed: u64) -> Result<Grid, GridError> {
    let mut grid = Grid::new(width, height)?;
    let mut rng = rng_for_seed(seed);
    grid.generate_ascending_platforms(&mut rng);
    log::info!("Generated {}x{} grid (seed {})", width, height, seed);
    Ok(grid)
}

/// 2D array of tiles, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// All-empty grid. Rejects sizes that cannot hold the fixed hazards/exits
    /// and sizes above [`MAX_GRID_TILES`].
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width < MIN_GRID_DIM || height < MIN_GRID_DIM {
            return Err(GridError::TooSmall {
                width,
                height,
                min: MIN_GRID_DIM,
            });
        }
        let count = width
            .checked_mul(height)
            .filter(|&count| count <= MAX_GRID_TILES)
            .ok_or(GridError::TooLarge {
                width,
                height,
                max: MAX_GRID_TILES,
            })?;

        let mut tiles = Vec::with_capacity(count as usize);
        for row in 0..height {
            for col in 0..width {
                tiles.push(Tile::new(TileType::Empty, col, row));
            }
        }
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    /// Parse a hand-authored level, one line per row (see [`TileType::symbol`]).
    /// Blank lines and surrounding whitespace are ignored.
    pub fn from_layout(layout: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let expected = rows.first().ok_or(GridError::EmptyLayout)?.chars().count();

        let mut grid = Self::new(expected as i32, rows.len() as i32)?;
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != expected {
                return Err(GridError::RaggedLayout {
                    row,
                    expected,
                    found,
                });
            }
            for (col, symbol) in line.chars().enumerate() {
                let kind = TileType::from_symbol(symbol)
                    .ok_or(GridError::UnknownSymbol { symbol, row, col })?;
                grid.set(col as i32, row as i32, kind);
            }
        }
        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn in_bounds(&self, col: i32, row: i32) -> bool {
        (0..self.width).contains(&col) && (0..self.height).contains(&row)
    }

    #[inline]
    fn index(&self, col: i32, row: i32) -> usize {
        (row * self.width + col) as usize
    }

    fn set(&mut self, col: i32, row: i32, kind: TileType) {
        if self.in_bounds(col, row) {
            let idx = self.index(col, row);
            self.tiles[idx] = Tile::new(kind, col, row);
        }
    }

    /// Reset to empty, then lay a staircase of short platforms rising from the
    /// bottom-left toward the top-right, and finally stamp the fixed hazards,
    /// exits and helper ledges over whatever the walk produced.
    pub fn generate_ascending_platforms<R: Rng>(&mut self, rng: &mut R) {
        for row in 0..self.height {
            for col in 0..self.width {
                self.set(col, row, TileType::Empty);
            }
        }

        let mut current_row = self.height - 2;
        let mut c = 1;
        while c < self.width - 1 && current_row > 0 {
            let len = rng.random_range(PLATFORM_LEN_MIN..=PLATFORM_LEN_MAX);
            for _ in 0..len {
                if c >= self.width - 1 {
                    break;
                }
                self.set(c, current_row, TileType::Solid);
                c += 1;
            }
            let gap = rng.random_range(GAP_LEN_MIN..=GAP_LEN_MAX);
            c += gap;
            if current_row > 1 {
                current_row -= 1;
            }
        }

        let (w, h) = (self.width, self.height);
        self.set(2, h - 2, TileType::Fire);
        self.set(w - 3, h - 3, TileType::Water);
        self.set(w - 2, 1, TileType::ExitFire);
        self.set(1, 1, TileType::ExitWater);
        if h > 3 {
            self.set(1, 3, TileType::Solid);
        }
        if h > 5 && w > 2 {
            self.set(2, 5, TileType::Solid);
        }
        log::debug!("Platform walk finished\n{}", self);
    }

    /// Tile at a grid cell, or `None` outside the grid
    pub fn tile(&self, col: i32, row: i32) -> Option<&Tile> {
        if self.in_bounds(col, row) {
            Some(&self.tiles[self.index(col, row)])
        } else {
            None
        }
    }

    /// Tile type at a grid cell; anything off the grid is `Solid`
    pub fn tile_type_at_grid(&self, col: i32, row: i32) -> TileType {
        self.tile(col, row).map_or(TileType::Solid, Tile::kind)
    }

    pub fn tile_type_at_world(&self, x: f32, y: f32) -> TileType {
        let (col, row) = world_to_grid(x, y);
        self.tile_type_at_grid(col, row)
    }

    /// All tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// World-space rectangle covered by the grid
    pub fn world_bounds(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.width as f32 * TILE_SIZE,
            self.height as f32 * TILE_SIZE,
        )
    }

    /// Where a character of the given affinity starts and respawns
    pub fn spawn_point(&self, element: Element) -> Vec2 {
        let col = match element {
            Element::Water => WATER_SPAWN_COL,
            Element::Fire | Element::Neutral => FIRE_SPAWN_COL,
        };
        grid_to_world(col, self.height - 2)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.chunks(self.width as usize) {
            for tile in row {
                write!(f, "{}", tile.kind().symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_determinism() {
        let a = generate(14, 9, 12345).unwrap();
        let b = generate(14, 9, 12345).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fixed_cells_placed() {
        let grid = generate(14, 9, 777).unwrap();
        assert_eq!(grid.tile_type_at_grid(2, 7), TileType::Fire);
        assert_eq!(grid.tile_type_at_grid(11, 6), TileType::Water);
        assert_eq!(grid.tile_type_at_grid(12, 1), TileType::ExitFire);
        assert_eq!(grid.tile_type_at_grid(1, 1), TileType::ExitWater);
        assert_eq!(grid.tile_type_at_grid(1, 3), TileType::Solid);
        assert_eq!(grid.tile_type_at_grid(2, 5), TileType::Solid);
    }

    #[test]
    fn test_walk_stays_inside_border_columns() {
        let grid = generate(14, 9, 4242).unwrap();
        for row in 0..grid.height() {
            assert_eq!(grid.tile_type_at_grid(0, row), TileType::Empty);
            assert_eq!(grid.tile_type_at_grid(grid.width() - 1, row), TileType::Empty);
        }
        // The bottom row is never reached by the walk
        for col in 0..grid.width() {
            assert_eq!(grid.tile_type_at_grid(col, grid.height() - 1), TileType::Empty);
        }
    }

    #[test]
    fn test_regenerate_resets_previous_content() {
        let mut grid = Grid::from_layout(
            "######
             ######
             ######
             ######
             ######
             ######",
        )
        .unwrap();
        grid.generate_ascending_platforms(&mut Pcg32::seed_from_u64(5));
        assert_eq!(grid.tile_type_at_grid(0, 0), TileType::Empty);
        assert_eq!(grid.tile_type_at_grid(5, 5), TileType::Empty);
    }

    #[test]
    fn test_entropy_seed_still_generates() {
        let grid = generate(8, 8, 0).unwrap();
        assert_eq!(grid.tile_type_at_grid(1, 1), TileType::ExitWater);
    }

    #[test]
    fn test_too_small_rejected() {
        assert_eq!(
            Grid::new(5, 9),
            Err(GridError::TooSmall {
                width: 5,
                height: 9,
                min: MIN_GRID_DIM
            })
        );
        assert!(generate(14, 3, 1).is_err());
    }

    #[test]
    fn test_too_large_rejected() {
        assert_eq!(
            Grid::new(i32::MAX, 10),
            Err(GridError::TooLarge {
                width: i32::MAX,
                height: 10,
                max: MAX_GRID_TILES
            })
        );
        assert!(matches!(
            Grid::new(2048, 1024),
            Err(GridError::TooLarge { .. })
        ));
        assert!(Grid::new(1024, 1024).is_ok());
    }

    #[test]
    fn test_world_queries() {
        let grid = Grid::new(10, 8).unwrap();
        let bounds = grid.world_bounds();
        assert_eq!(bounds.size, Vec2::new(480.0, 384.0));
        assert_eq!(grid.tile_type_at_world(10.0, 10.0), TileType::Empty);
        assert_eq!(grid.tile_type_at_world(-1.0, 10.0), TileType::Solid);
        assert_eq!(grid.tile_type_at_world(480.0, 10.0), TileType::Solid);
        assert_eq!(grid.spawn_point(Element::Fire), Vec2::new(48.0, 288.0));
        assert_eq!(grid.spawn_point(Element::Water), Vec2::new(240.0, 288.0));
    }

    #[test]
    fn test_layout_parse_and_display() {
        let layout = "\
            ......
            .w..f.
            ......
            .#....
            ..F.W.
            ######
        ";
        let grid = Grid::from_layout(layout).unwrap();
        assert_eq!(grid.width(), 6);
        assert_eq!(grid.height(), 6);
        assert_eq!(grid.tile_type_at_grid(4, 1), TileType::ExitFire);
        assert_eq!(grid.tile_type_at_grid(4, 4), TileType::Water);
        assert_eq!(grid.tile(2, 4).map(|t| (t.col(), t.row())), Some((2, 4)));

        let text = grid.to_string();
        assert_eq!(text.lines().nth(1), Some(".w..f."));
        assert_eq!(Grid::from_layout(&text).unwrap(), grid);
    }

    #[test]
    fn test_layout_errors() {
        assert_eq!(Grid::from_layout("  \n"), Err(GridError::EmptyLayout));
        let ragged = "......\n......\n.....\n......\n......\n......";
        assert_eq!(
            Grid::from_layout(ragged),
            Err(GridError::RaggedLayout {
                row: 2,
                expected: 6,
                found: 5
            })
        );
        let unknown = "......\n..x...\n......\n......\n......\n......";
        assert_eq!(
            Grid::from_layout(unknown),
            Err(GridError::UnknownSymbol {
                symbol: 'x',
                row: 1,
                col: 2
            })
        );
    }

    proptest! {
        #[test]
        fn same_seed_same_grid(seed in 1u64..u64::MAX, w in 6i32..30, h in 6i32..20) {
            prop_assert_eq!(generate(w, h, seed).unwrap(), generate(w, h, seed).unwrap());
        }

        #[test]
        fn out_of_range_is_solid(col in -100i32..100, row in -100i32..100) {
            let grid = generate(14, 9, 99).unwrap();
            prop_assume!(!(0..14).contains(&col) || !(0..9).contains(&row));
            prop_assert_eq!(grid.tile_type_at_grid(col, row), TileType::Solid);
        }
    }
}
