use glam::Vec2;

use super::Simulated;
use crate::api::types::EntityId;
use crate::core::geometry::Rect;
use crate::core::physics::PhysicsWorld;

const FRAME_TIME: f32 = 0.1;
const FRAMES: u32 = 4;
/// Time from trigger until the flag animation reports completion.
pub const ANIMATION_DURATION: f32 = 2.0;
const POLE_WIDTH: f32 = 8.0;
const POLE_HEIGHT: f32 = 320.0;

/// End-of-level flag pole. Has no body; the player only has to cross its x.
pub struct Goal {
    id: EntityId,
    base: Vec2,
    triggered: bool,
    animation_complete: bool,
    anim_timer: f32,
    anim_frame: u32,
    elapsed: f32,
}

impl Goal {
    /// `base` is the foot of the pole.
    pub fn new(id: EntityId, base: Vec2) -> Self {
        Self {
            id,
            base,
            triggered: false,
            animation_complete: false,
            anim_timer: 0.0,
            anim_frame: 0,
            elapsed: 0.0,
        }
    }

    pub fn x(&self) -> f32 {
        self.base.x
    }

    /// Start the flag animation. Only the first call has an effect.
    pub fn trigger(&mut self) -> bool {
        if self.triggered {
            return false;
        }
        self.triggered = true;
        self.anim_timer = 0.0;
        self.anim_frame = 0;
        self.elapsed = 0.0;
        log::info!("goal reached at x={}", self.base.x);
        true
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    pub fn is_animation_complete(&self) -> bool {
        self.animation_complete
    }

    pub fn anim_frame(&self) -> u32 {
        self.anim_frame
    }
}

impl Simulated for Goal {
    fn id(&self) -> EntityId {
        self.id
    }

    fn update(&mut self, _physics: &mut PhysicsWorld, dt: f32) {
        if !self.triggered || self.animation_complete {
            return;
        }
        self.elapsed += dt;
        self.anim_timer += dt;
        if self.anim_timer >= FRAME_TIME {
            self.anim_timer = 0.0;
            self.anim_frame = (self.anim_frame + 1) % FRAMES;
        }
        if self.elapsed >= ANIMATION_DURATION {
            self.animation_complete = true;
        }
    }

    fn is_alive(&self) -> bool {
        true
    }

    fn bounds(&self) -> Rect {
        Rect::from_feet(self.base, POLE_WIDTH, POLE_HEIGHT)
    }

    fn position(&self) -> Vec2 {
        self.bounds().center()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_until_triggered() {
        let mut physics = PhysicsWorld::new(Vec2::ZERO);
        let mut goal = Goal::new(EntityId(1), Vec2::new(3000.0, 500.0));
        for _ in 0..300 {
            goal.update(&mut physics, 1.0 / 60.0);
        }
        assert!(!goal.is_triggered());
        assert!(!goal.is_animation_complete());
        assert_eq!(goal.anim_frame(), 0);
    }

    #[test]
    fn trigger_is_one_shot_and_completes_after_duration() {
        let mut physics = PhysicsWorld::new(Vec2::ZERO);
        let mut goal = Goal::new(EntityId(1), Vec2::new(3000.0, 500.0));
        assert!(goal.trigger());

        for _ in 0..60 {
            goal.update(&mut physics, 1.0 / 60.0);
        }
        assert!(!goal.trigger(), "re-trigger must not restart the animation");
        assert!(!goal.is_animation_complete());

        for _ in 0..70 {
            goal.update(&mut physics, 1.0 / 60.0);
        }
        assert!(goal.is_animation_complete());
    }
}
