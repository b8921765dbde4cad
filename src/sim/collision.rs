//! Axis-aligned bounding boxes and overlap testing
//!
//! Everything in the playfield is a box: `pos` is the top-left corner, y grows
//! downward, and `size` is the extent used both for collisions and for the
//! default (unsprited) drawing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned box in playfield pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Entity {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Entity {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Square box of side `size`
    pub fn square(pos: Vec2, size: f32) -> Self {
        Self {
            pos,
            size: Vec2::splat(size),
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

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Strict overlap on both axes; boxes that only share an edge don't collide
    #[inline]
    pub fn overlaps(&self, other: &Entity) -> bool {
        is_colliding(self, other)
    }
}

/// Check whether two boxes overlap by at least some positive area
fn is_colliding(a: &Entity, b: &Entity) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}
