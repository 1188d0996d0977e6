use glam::Vec2;

use crate::api::types::EntityId;
use crate::core::physics::{BodyKind, BodySpec, PhysicsBody, PhysicsWorld};

/// Zero-or-one body handle owned by an entity, with a cached transform.
///
/// Reads never touch the physics world: they return whatever the last
/// `sync()` (or local write) observed, so an entity whose body was destroyed
/// keeps reporting its last-known position and velocity.
#[derive(Debug, Clone)]
pub struct BodySlot {
    owner: EntityId,
    handle: Option<PhysicsBody>,
    half_extents: Vec2,
    position: Vec2,
    velocity: Vec2,
}

impl BodySlot {
    /// A slot with no body yet, parked at `position`.
    pub fn empty(owner: EntityId, position: Vec2) -> Self {
        Self {
            owner,
            handle: None,
            half_extents: Vec2::ZERO,
            position,
            velocity: Vec2::ZERO,
        }
    }

    /// Create a body from `spec` and wrap it.
    pub fn create(physics: &mut PhysicsWorld, owner: EntityId, spec: &BodySpec) -> Self {
        let mut slot = Self::empty(owner, spec.position);
        slot.install(physics, spec);
        slot
    }

    fn install(&mut self, physics: &mut PhysicsWorld, spec: &BodySpec) {
        self.handle = Some(physics.create_body(self.owner, spec));
        self.half_extents = spec.half_extents;
        self.position = spec.position;
        self.velocity = spec.velocity;
    }

    /// Destroy the current body (if any) and install a new one built from
    /// `spec`. The slot never exposes the destroyed handle.
    pub fn reprovision(&mut self, physics: &mut PhysicsWorld, spec: &BodySpec) {
        if let Some(old) = self.handle.take() {
            physics.destroy_body(&old);
        }
        self.install(physics, spec);
    }

    /// Destroy the body and leave the slot empty. Idempotent.
    pub fn release(&mut self, physics: &mut PhysicsWorld) {
        if let Some(old) = self.handle.take() {
            physics.destroy_body(&old);
        }
    }

    /// Refresh the cached transform from the physics world.
    /// A handle the world no longer knows is dropped.
    pub fn sync(&mut self, physics: &PhysicsWorld) {
        let Some(handle) = self.handle else {
            return;
        };
        match (physics.position(&handle), physics.velocity(&handle)) {
            (Some(pos), Some(vel)) => {
                self.position = pos;
                self.velocity = vel;
            }
            _ => {
                log::warn!("entity {:?} held a stale body handle; dropping it", self.owner);
                self.handle = None;
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.handle.is_some()
    }

    pub fn handle(&self) -> Option<PhysicsBody> {
        self.handle
    }

    /// Cached position in pixels.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Cached velocity in physics units.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Half extents of the current (or last) body box, in pixels.
    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    /// Move the cached position of a body-less slot (spawning items).
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn set_velocity(&mut self, physics: &mut PhysicsWorld, vel: Vec2) {
        if let Some(handle) = &self.handle {
            physics.set_velocity(handle, vel);
            self.velocity = vel;
        }
    }

    pub fn apply_impulse(&mut self, physics: &mut PhysicsWorld, impulse: Vec2) {
        if let Some(handle) = &self.handle {
            physics.apply_impulse(handle, impulse);
        }
    }

    pub fn apply_force(&mut self, physics: &mut PhysicsWorld, force: Vec2) {
        if let Some(handle) = &self.handle {
            physics.apply_force(handle, force);
        }
    }

    pub fn set_kind(&mut self, physics: &mut PhysicsWorld, kind: BodyKind) {
        if let Some(handle) = &self.handle {
            physics.set_body_kind(handle, kind);
        }
    }

    pub fn set_interaction(&mut self, physics: &mut PhysicsWorld, interacts: bool) {
        if let Some(handle) = &self.handle {
            physics.set_interaction(handle, interacts);
        }
    }

    pub fn mass(&self, physics: &PhysicsWorld) -> f32 {
        self.handle.as_ref().map(|h| physics.mass(h)).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec_at(pos: Vec2) -> BodySpec {
        BodySpec::dynamic(pos, Vec2::new(12.0, 16.0))
    }

    #[test]
    fn released_slot_keeps_last_transform() {
        let mut physics = PhysicsWorld::new(Vec2::ZERO);
        let mut slot = BodySlot::create(&mut physics, EntityId(1), &spec_at(Vec2::new(50.0, 60.0)));
        slot.set_velocity(&mut physics, Vec2::new(2.0, 0.0));
        slot.sync(&physics);

        slot.release(&mut physics);
        assert!(!slot.is_valid());
        assert_eq!(physics.body_count(), 0);

        slot.sync(&physics);
        assert!((slot.position().x - 50.0).abs() < 0.01);
        assert!((slot.velocity().x - 2.0).abs() < 0.001);

        // Writes on an empty slot are silent
        slot.set_velocity(&mut physics, Vec2::new(9.0, 9.0));
        slot.apply_impulse(&mut physics, Vec2::ONE);
        assert!((slot.velocity().x - 2.0).abs() < 0.001);
        slot.release(&mut physics);
    }

    #[test]
    fn reprovision_replaces_handle() {
        let mut physics = PhysicsWorld::new(Vec2::ZERO);
        let mut slot = BodySlot::create(&mut physics, EntityId(1), &spec_at(Vec2::ZERO));
        let old = slot.handle().unwrap();

        slot.reprovision(&mut physics, &BodySpec::dynamic(Vec2::new(0.0, -12.0), Vec2::new(12.0, 28.0)));
        let new = slot.handle().unwrap();

        assert_eq!(physics.body_count(), 1);
        assert!(!physics.is_valid(&old));
        assert!(physics.is_valid(&new));
        assert_eq!(slot.half_extents(), Vec2::new(12.0, 28.0));
    }

    #[test]
    fn sync_drops_handle_destroyed_elsewhere() {
        let mut physics = PhysicsWorld::new(Vec2::ZERO);
        let mut slot = BodySlot::create(&mut physics, EntityId(1), &spec_at(Vec2::new(5.0, 5.0)));
        let handle = slot.handle().unwrap();
        physics.destroy_body(&handle);

        slot.sync(&physics);
        assert!(!slot.is_valid());
        assert!((slot.position().x - 5.0).abs() < 0.01);
    }
}
