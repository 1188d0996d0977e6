use glam::Vec2;

use super::Simulated;
use crate::api::types::EntityId;
use crate::core::body::BodySlot;
use crate::core::geometry::Rect;
use crate::core::physics::{BodySpec, PhysicsWorld};

pub const BLOCK_HALF_EXTENTS: Vec2 = Vec2::new(16.0, 16.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Question,
    Empty,
}

/// A question block. Static for the life of the level.
pub struct Block {
    id: EntityId,
    body: BodySlot,
    block_type: BlockType,
}

impl Block {
    pub fn new(physics: &mut PhysicsWorld, id: EntityId, center: Vec2) -> Self {
        let spec = BodySpec::fixed(center, BLOCK_HALF_EXTENTS);
        Self {
            id,
            body: BodySlot::create(physics, id, &spec),
            block_type: BlockType::Question,
        }
    }

    pub fn block_type(&self) -> BlockType {
        self.block_type
    }

    /// Strike the block. `true` only for the hit that empties it.
    pub fn hit(&mut self) -> bool {
        if self.block_type == BlockType::Question {
            self.block_type = BlockType::Empty;
            return true;
        }
        false
    }
}

impl Simulated for Block {
    fn id(&self) -> EntityId {
        self.id
    }

    fn update(&mut self, _physics: &mut PhysicsWorld, _dt: f32) {}

    fn is_alive(&self) -> bool {
        true
    }

    fn bounds(&self) -> Rect {
        Rect::from_center(self.body.position(), BLOCK_HALF_EXTENTS)
    }

    fn position(&self) -> Vec2 {
        self.body.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_hit_only() {
        let mut physics = PhysicsWorld::new(Vec2::ZERO);
        let mut block = Block::new(&mut physics, EntityId(1), Vec2::new(64.0, 64.0));
        assert_eq!(block.block_type(), BlockType::Question);
        assert!(block.hit());
        assert_eq!(block.block_type(), BlockType::Empty);
        assert!(!block.hit());
        assert!(!block.hit());
        assert_eq!(block.block_type(), BlockType::Empty);
    }

    #[test]
    fn bounds_are_32px_square() {
        let mut physics = PhysicsWorld::new(Vec2::ZERO);
        let block = Block::new(&mut physics, EntityId(1), Vec2::new(64.0, 64.0));
        let b = block.bounds();
        assert!((b.width() - 32.0).abs() < 0.01);
        assert!((b.min.y - 48.0).abs() < 0.01);
        assert_eq!(physics.body_count(), 1);
    }
}
