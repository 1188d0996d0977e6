use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::core::geometry::Rect;

/// Snapshot kind codes used on the wire.
pub mod kinds {
    pub const TERRAIN: f32 = 0.0;
    pub const PLAYER_SMALL: f32 = 1.0;
    pub const PLAYER_BIG: f32 = 2.0;
    pub const PLAYER_FIRE: f32 = 3.0;
    pub const GOOMBA: f32 = 4.0;
    pub const KOOPA: f32 = 5.0;
    pub const BLOCK_QUESTION: f32 = 6.0;
    pub const BLOCK_EMPTY: f32 = 7.0;
    pub const MUSHROOM: f32 = 8.0;
    pub const FIRE_FLOWER: f32 = 9.0;
    pub const FIREBALL: f32 = 10.0;
    pub const GOAL: f32 = 11.0;
    pub const KILL_ZONE: f32 = 12.0;
}

/// One visible entity, flattened for the host renderer.
/// `x, y` is the box centre in pixels; `state` is a per-kind state code.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct EntitySnapshot {
    pub kind: f32,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub state: f32,
    /// −1 left, +1 right.
    pub facing: f32,
    pub alpha: f32,
}

impl EntitySnapshot {
    pub const FLOATS: usize = 8;

    pub fn new(kind: f32, bounds: Rect) -> Self {
        let center = bounds.center();
        Self {
            kind,
            x: center.x,
            y: center.y,
            w: bounds.width(),
            h: bounds.height(),
            state: 0.0,
            facing: 1.0,
            alpha: 1.0,
        }
    }

    pub fn with_state(mut self, state: f32) -> Self {
        self.state = state;
        self
    }

    pub fn with_facing(mut self, facing: f32) -> Self {
        self.facing = facing;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}
