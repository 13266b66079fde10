//! World geometry: axis-aligned rectangles and the images drawn over them

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
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
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }
}

/// Which way the player sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Side {
    Left,
    #[default]
    Right,
}

/// Player sprite sheet selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteVariant {
    RunRight,
    RunLeft,
    StandRight,
    StandLeft,
}

impl SpriteVariant {
    pub fn is_running(self) -> bool {
        matches!(self, SpriteVariant::RunRight | SpriteVariant::RunLeft)
    }
}

/// Handle to an image owned by the render collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Drawable {
    Background,
    Platform,
    Floor,
    Player(SpriteVariant),
}

impl Drawable {
    /// Stand-in used when a sprite image is missing
    pub const FALLBACK_SPRITE: Drawable = Drawable::Player(SpriteVariant::StandRight);
}

/// A platform or floor segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldObject {
    pub pos: Vec2,
    size: Vec2,
    drawable: Drawable,
}

impl WorldObject {
    pub fn new(pos: Vec2, size: Vec2, drawable: Drawable) -> Self {
        Self {
            pos,
            size,
            drawable,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn drawable(&self) -> Drawable {
        self.drawable
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }
}
