//! Tile types and their elemental rules

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::character::Element;
use super::collision::Rect;
use crate::consts::TILE_SIZE;
use crate::grid_to_world;

/// What occupies a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TileType {
    #[default]
    Empty,
    Solid,
    /// Lava pool: ground for fire, lethal for water
    Fire,
    /// Water pool: ground for water, lethal for fire
    Water,
    ExitFire,
    ExitWater,
}

impl TileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TileType::Empty => "Empty",
            TileType::Solid => "Solid",
            TileType::Fire => "Fire",
            TileType::Water => "Water",
            TileType::ExitFire => "ExitFire",
            TileType::ExitWater => "ExitWater",
        }
    }

    /// Single-character form used by the text grid layout
    pub fn symbol(&self) -> char {
        match self {
            TileType::Empty => '.',
            TileType::Solid => '#',
            TileType::Fire => 'F',
            TileType::Water => 'W',
            TileType::ExitFire => 'f',
            TileType::ExitWater => 'w',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '.' => Some(TileType::Empty),
            '#' => Some(TileType::Solid),
            'F' => Some(TileType::Fire),
            'W' => Some(TileType::Water),
            'f' => Some(TileType::ExitFire),
            'w' => Some(TileType::ExitWater),
            _ => None,
        }
    }

    /// Whether a character with this affinity stands on / bumps into the tile
    pub fn is_solid_for(&self, element: Element) -> bool {
        matches!(
            (self, element),
            (TileType::Solid, _)
                | (TileType::Fire, Element::Fire)
                | (TileType::Water, Element::Water)
        )
    }

    /// Whether touching the tile costs this character a life
    pub fn is_lethal_for(&self, element: Element) -> bool {
        matches!(
            (self, element),
            (TileType::Fire, Element::Water) | (TileType::Water, Element::Fire)
        )
    }

    /// Whether this is the exit belonging to the given affinity
    pub fn is_exit_for(&self, element: Element) -> bool {
        matches!(
            (self, element),
            (TileType::ExitFire, Element::Fire) | (TileType::ExitWater, Element::Water)
        )
    }

    /// Fill colour for drawing (Empty is fully transparent)
    pub fn color(&self) -> Color {
        match self {
            TileType::Empty => Color::TRANSPARENT,
            TileType::Solid => Color::rgb(100, 100, 100),
            TileType::Fire => Color::RED,
            TileType::Water => Color::BLUE,
            TileType::ExitFire => Color::rgb(255, 165, 0),
            TileType::ExitWater => Color::CYAN,
        }
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RGBA colour handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const CYAN: Color = Color::rgb(0, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// One grid cell. Built once during generation and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tile {
    kind: TileType,
    col: i32,
    row: i32,
}

impl Tile {
    pub fn new(kind: TileType, col: i32, row: i32) -> Self {
        Self { kind, col, row }
    }

    #[inline]
    pub fn kind(&self) -> TileType {
        self.kind
    }

    #[inline]
    pub fn col(&self) -> i32 {
        self.col
    }

    #[inline]
    pub fn row(&self) -> i32 {
        self.row
    }

    /// Top-left corner in world units
    pub fn world_pos(&self) -> Vec2 {
        grid_to_world(self.col, self.row)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.world_pos(), Vec2::splat(TILE_SIZE))
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}
