//! Entities and their bounding rectangles

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in playfield pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
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

    /// Shrink by `margin` on every side (may invert for large margins)
    pub fn inset(&self, margin: f32) -> Self {
        Self {
            pos: self.pos + Vec2::splat(margin),
            size: self.size - Vec2::splat(2.0 * margin),
        }
    }
}

/// Per-kind behavior every entity kind supplies
pub trait EntityKind: Copy {
    /// Points awarded on pickup (0 for anything that hurts)
    fn score_value(&self) -> u32;
    /// Display glyph for the renderer
    fn label(&self) -> &'static str;
    fn name(&self) -> &'static str;

    fn is_hazard(&self) -> bool {
        self.score_value() == 0
    }
}

/// A spawned falling or approaching object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity<K> {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: K,
    /// Pixels moved per tick along the mode's travel axis
    pub speed: f32,
}

impl<K: EntityKind> Entity<K> {
    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    pub fn score_value(&self) -> u32 {
        self.kind.score_value()
    }
}
