//! Player characters: kinematic boxes with an elemental affinity

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::tile::Color;
use crate::consts::*;

/// Elemental affinity, fixed for the lifetime of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Water,
    Neutral,
}

impl Element {
    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Water => "Water",
            Element::Neutral => "Neutral",
        }
    }

    /// Body colour used when no sprite is available
    pub fn color(&self) -> Color {
        match self {
            Element::Fire => Color::RED,
            Element::Water => Color::BLUE,
            Element::Neutral => Color::WHITE,
        }
    }
}

/// A player-controlled body, one tile in size.
///
/// Holds simulation state only; sprites and shapes belong to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    name: String,
    element: Element,
    /// Top-left corner, world units
    position: Vec2,
    velocity: Vec2,
    lives: u32,
    on_ground: bool,
    /// Horizontal walking speed (units/s)
    speed: f32,
    /// Upward velocity applied by a jump (units/s)
    jump_impulse: f32,
}

impl Character {
    pub fn new(name: impl Into<String>, element: Element, position: Vec2, lives: u32) -> Self {
        Self {
            name: name.into(),
            element,
            position,
            velocity: Vec2::ZERO,
            lives,
            on_ground: false,
            speed: DEFAULT_SPEED,
            jump_impulse: DEFAULT_JUMP_IMPULSE,
        }
    }

    /// Override walking speed and jump impulse
    pub fn with_tuning(mut self, speed: f32, jump_impulse: f32) -> Self {
        self.speed = speed;
        self.jump_impulse = jump_impulse;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn element(&self) -> Element {
        self.element
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Landing also kills any vertical motion
    pub fn set_on_ground(&mut self, on_ground: bool) {
        self.on_ground = on_ground;
        if on_ground {
            self.velocity.y = 0.0;
        }
    }

    pub fn stop_vertical_movement(&mut self) {
        self.velocity.y = 0.0;
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(self.position, Vec2::splat(TILE_SIZE))
    }

    /// Advance kinematics by `dt` seconds inside `world`.
    ///
    /// The frame is consumed in slices of at most [`MAX_SUB_STEP`]; a shorter
    /// remainder runs as one final slice. Each slice applies gravity (unless
    /// grounded), integrates position, then rests the body on the world floor
    /// or marks it airborne, and keeps it inside the horizontal extent.
    /// At most [`MAX_SUB_STEPS`] slices run; NaN counts as zero elapsed time.
    /// Tile collisions are resolved separately afterwards.
    pub fn update(&mut self, dt: f32, world: &Rect) -> bool {
        // f32::max drops NaN
        let mut remaining = dt.max(0.0);
        if remaining == 0.0 {
            // Nothing to integrate, but walking may still have pushed us out
            self.rest_on_floor(world);
            self.clamp_horizontal(world);
            return true;
        }

        let mut slices = 0;
        while remaining > 0.0 && slices < MAX_SUB_STEPS {
            slices += 1;
            let step = remaining.min(MAX_SUB_STEP);
            if !self.on_ground {
                self.velocity.y += GRAVITY * step;
            }
            self.position += self.velocity * step;

            if !self.rest_on_floor(world) {
                self.on_ground = false;
            }
            self.clamp_horizontal(world);

            remaining -= step;
        }
        if remaining > 0.0 {
            log::warn!("{}: dropped {}s of frame time", self.name, remaining);
        }
        true
    }

    /// Snap onto the world floor if the body reached or sank below it
    fn rest_on_floor(&mut self, world: &Rect) -> bool {
        if self.position.y + TILE_SIZE >= world.bottom() {
            self.position.y = world.bottom() - TILE_SIZE;
            self.velocity.y = 0.0;
            self.on_ground = true;
            true
        } else {
            false
        }
    }

    fn clamp_horizontal(&mut self, world: &Rect) {
        if self.position.x < world.left() {
            self.position.x = world.left();
        }
        if self.position.x + TILE_SIZE > world.right() {
            self.position.x = world.right() - TILE_SIZE;
        }
    }

    /// Walk left; penetration is corrected later by the collision pass
    pub fn move_left(&mut self, dt: f32) {
        self.position.x -= self.speed * dt;
    }

    pub fn move_right(&mut self, dt: f32) {
        self.position.x += self.speed * dt;
    }

    /// Only from the ground; no air jumps
    pub fn jump(&mut self) {
        if self.on_ground {
            self.velocity.y = -self.jump_impulse;
            self.on_ground = false;
        }
    }

    /// Lose a life (never below zero) and restart at `respawn`
    pub fn take_damage_and_respawn(&mut self, respawn: Vec2) {
        self.lives = self.lives.saturating_sub(1);
        self.position = respawn;
        self.velocity = Vec2::ZERO;
        self.on_ground = false;
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pos=({},{}) lives={}",
            self.name, self.position.x as i32, self.position.y as i32, self.lives
        )
    }
}
