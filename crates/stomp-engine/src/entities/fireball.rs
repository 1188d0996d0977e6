use glam::Vec2;

use super::Simulated;
use crate::api::types::EntityId;
use crate::core::body::BodySlot;
use crate::core::geometry::Rect;
use crate::core::physics::{BodySpec, PhysicsWorld};

pub const FIREBALL_SPEED: f32 = 8.0;
pub const FIREBALL_HALF_EXTENTS: Vec2 = Vec2::new(3.0, 3.0);
/// Spawn offset ahead of the thrower's centre.
pub const SPAWN_OFFSET: f32 = 16.0;
/// Slack beyond the level edges before a fireball is discarded.
const BOUNDS_MARGIN: f32 = 100.0;
const FRAME_TIME: f32 = 0.05;
const FRAMES: u32 = 4;

/// Kinematic projectile flying straight at constant speed.
pub struct Fireball {
    id: EntityId,
    body: BodySlot,
    direction: f32,
    min_x: f32,
    max_x: f32,
    alive: bool,
    bounce_count: u32,
    anim_timer: f32,
    anim_frame: u32,
}

impl Fireball {
    /// `level_width` bounds the horizontal window the fireball may live in.
    pub fn new(
        physics: &mut PhysicsWorld,
        id: EntityId,
        at: Vec2,
        direction: f32,
        level_width: f32,
    ) -> Self {
        let direction = if direction < 0.0 { -1.0 } else { 1.0 };
        let spec = BodySpec::kinematic(at, FIREBALL_HALF_EXTENTS)
            .with_density(0.5)
            .with_velocity(Vec2::new(FIREBALL_SPEED * direction, 0.0));
        Self {
            id,
            body: BodySlot::create(physics, id, &spec),
            direction,
            min_x: -BOUNDS_MARGIN,
            max_x: level_width + BOUNDS_MARGIN,
            alive: true,
            bounce_count: 0,
            anim_timer: 0.0,
            anim_frame: 0,
        }
    }

    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn bounce_count(&self) -> u32 {
        self.bounce_count
    }

    pub fn anim_frame(&self) -> u32 {
        self.anim_frame
    }

    pub fn has_body(&self) -> bool {
        self.body.is_valid()
    }

    /// Clear the alive flag and free the body. Idempotent.
    pub fn destroy(&mut self, physics: &mut PhysicsWorld) {
        self.alive = false;
        self.body.release(physics);
    }
}

impl Simulated for Fireball {
    fn id(&self) -> EntityId {
        self.id
    }

    fn update(&mut self, physics: &mut PhysicsWorld, dt: f32) {
        if !self.alive {
            return;
        }
        self.anim_timer += dt;
        if self.anim_timer >= FRAME_TIME {
            self.anim_timer = 0.0;
            self.anim_frame = (self.anim_frame + 1) % FRAMES;
        }

        self.body.sync(physics);
        self.body
            .set_velocity(physics, Vec2::new(FIREBALL_SPEED * self.direction, 0.0));

        let x = self.body.position().x;
        if x < self.min_x || x > self.max_x {
            self.destroy(physics);
        }
    }

    fn is_alive(&self) -> bool {
        self.alive
    }

    fn bounds(&self) -> Rect {
        Rect::from_center(self.body.position(), FIREBALL_HALF_EXTENTS)
    }

    fn position(&self) -> Vec2 {
        self.body.position()
    }
}
