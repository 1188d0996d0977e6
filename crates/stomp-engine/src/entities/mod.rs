//! Gameplay entities. Each owns at most one physics body through a
//! [`BodySlot`](crate::core::body::BodySlot) and a small explicit state machine.

pub mod block;
pub mod enemy;
pub mod fireball;
pub mod goal;
pub mod item;
pub mod player;

use glam::Vec2;

use crate::api::types::EntityId;
use crate::core::geometry::Rect;
use crate::core::physics::PhysicsWorld;

/// Capability shared by everything the level steps each tick.
pub trait Simulated {
    fn id(&self) -> EntityId;

    /// Advance one tick. Reads the body's fresh transform first.
    fn update(&mut self, physics: &mut PhysicsWorld, dt: f32);

    /// `false` once the entity is terminal and may be garbage-collected.
    fn is_alive(&self) -> bool;

    /// Collision bounds in pixels.
    fn bounds(&self) -> Rect;

    /// Centre position in pixels.
    fn position(&self) -> Vec2;
}
