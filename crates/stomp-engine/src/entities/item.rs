use glam::Vec2;

use super::Simulated;
use crate::api::types::{EntityId, ItemKind};
use crate::core::body::BodySlot;
use crate::core::geometry::Rect;
use crate::core::physics::{BodySpec, PhysicsWorld};

/// Rise speed out of the block, pixels per second.
const RISE_SPEED: f32 = 30.0;
/// How far above the spawn point the item stops rising.
const RISE_HEIGHT: f32 = 32.0;
const BLINK_INTERVAL: f32 = 0.1;
pub const ITEM_HALF_EXTENTS: Vec2 = Vec2::new(7.0, 7.0);
/// The body is created slightly above the final rise position.
const BODY_LIFT: f32 = 2.0;
pub const DRIFT_SPEED: f32 = 2.0;
/// Drift is re-asserted when |vx| decays below this.
const DRIFT_FLOOR: f32 = 1.0;

/// A power-up. Rises out of its block with no body while blinking, then
/// (mushrooms only) gets a dynamic body and drifts right.
pub struct Item {
    id: EntityId,
    kind: ItemKind,
    body: BodySlot,
    target_y: f32,
    spawning: bool,
    collected: bool,
    blink_timer: f32,
    visible: bool,
}

impl Item {
    /// Start spawning at `at` (the block centre).
    pub fn new(id: EntityId, kind: ItemKind, at: Vec2) -> Self {
        Self {
            id,
            kind,
            body: BodySlot::empty(id, at),
            target_y: at.y - RISE_HEIGHT,
            spawning: true,
            collected: false,
            blink_timer: 0.0,
            visible: true,
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn is_spawning(&self) -> bool {
        self.spawning
    }

    pub fn is_collected(&self) -> bool {
        self.collected
    }

    pub fn has_body(&self) -> bool {
        self.body.is_valid()
    }

    /// Render alpha: blinks between 1 and 0 while spawning.
    pub fn alpha(&self) -> f32 {
        if self.visible {
            1.0
        } else {
            0.0
        }
    }

    /// Mark collected and free the body. Later calls do nothing.
    pub fn collect(&mut self, physics: &mut PhysicsWorld) -> bool {
        if self.collected {
            return false;
        }
        self.collected = true;
        self.body.release(physics);
        true
    }

    fn finish_spawning(&mut self, physics: &mut PhysicsWorld) {
        self.spawning = false;
        self.visible = true;
        if self.kind == ItemKind::FireFlower {
            return;
        }
        let pos = self.body.position();
        let spec = BodySpec::dynamic(Vec2::new(pos.x, pos.y - BODY_LIFT), ITEM_HALF_EXTENTS)
            .with_friction(0.0)
            .with_velocity(Vec2::new(DRIFT_SPEED, 0.0));
        self.body.reprovision(physics, &spec);
    }
}

impl Simulated for Item {
    fn id(&self) -> EntityId {
        self.id
    }

    fn update(&mut self, physics: &mut PhysicsWorld, dt: f32) {
        if self.collected {
            return;
        }
        if self.spawning {
            self.blink_timer += dt;
            if self.blink_timer > BLINK_INTERVAL {
                self.blink_timer = 0.0;
                self.visible = !self.visible;
            }
            let pos = self.body.position();
            let y = pos.y - RISE_SPEED * dt;
            self.body.set_position(Vec2::new(pos.x, y.max(self.target_y)));
            if y <= self.target_y {
                self.finish_spawning(physics);
            }
            return;
        }

        self.body.sync(physics);
        let vel = self.body.velocity();
        if self.body.is_valid() && vel.x.abs() < DRIFT_FLOOR {
            self.body
                .set_velocity(physics, Vec2::new(DRIFT_SPEED, vel.y));
        }
    }

    fn is_alive(&self) -> bool {
        !self.collected
    }

    fn bounds(&self) -> Rect {
        Rect::from_center(self.body.position(), ITEM_HALF_EXTENTS)
    }

    fn position(&self) -> Vec2 {
        self.body.position()
    }
}
