//! The player: momentum-ramped movement, arcade jump curve, and the
//! Small → Big → Fire tier ladder with body swaps.

use glam::Vec2;

use super::Simulated;
use crate::api::config::PlayerTuning;
use crate::api::types::{Direction, EntityId, Tier};
use crate::core::body::BodySlot;
use crate::core::geometry::Rect;
use crate::core::physics::{BodySpec, PhysicsWorld};
use crate::input::intent::PlayerIntent;

/// Half extents of the small collision box, in pixels.
pub const SMALL_HALF_EXTENTS: Vec2 = Vec2::new(12.0, 16.0);
/// Half extents of the tall (Big / Fire) collision box, in pixels.
pub const TALL_HALF_EXTENTS: Vec2 = Vec2::new(12.0, 28.0);

const PLAYER_FRICTION: f32 = 0.3;
/// Below this |vx| the player counts as standing still.
const MOVING_EPSILON: f32 = 0.1;
/// Skid damping snaps to zero below this |vx|.
const STOP_EPSILON: f32 = 0.05;
const HEAD_SENSOR_HEIGHT: f32 = 6.0;
const HEAD_SENSOR_INSET: f32 = 2.0;

/// Movement / animation state derived each update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Running,
    Jumping,
    Braking,
    Crouching,
    Throwing,
    Dead,
}

/// Result of [`Player::take_damage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Invulnerable or already dead; nothing changed.
    Ignored,
    /// Lost one tier; carries the new tier.
    Downgraded(Tier),
    /// Was Small; now dead.
    Died,
}

fn half_extents_for(tier: Tier) -> Vec2 {
    if tier.is_tall() {
        TALL_HALF_EXTENTS
    } else {
        SMALL_HALF_EXTENTS
    }
}

pub struct Player {
    id: EntityId,
    body: BodySlot,
    tuning: PlayerTuning,
    tier: Tier,
    state: PlayerState,
    facing: Direction,
    intent: PlayerIntent,
    jump_was_held: bool,
    crouching: bool,
    skidding: bool,
    can_jump: bool,
    ground_timer: f32,
    run_timer: f32,
    run_direction: f32,
    invulnerable_timer: f32,
    fireball_cooldown: f32,
    throw_timer: f32,
    dead: bool,
    frozen: bool,
}

impl Player {
    pub fn new(physics: &mut PhysicsWorld, id: EntityId, start: Vec2, tuning: PlayerTuning) -> Self {
        let spec = Self::body_spec(start, SMALL_HALF_EXTENTS, Vec2::ZERO);
        Self {
            id,
            body: BodySlot::create(physics, id, &spec),
            tuning,
            tier: Tier::Small,
            state: PlayerState::Idle,
            facing: Direction::Right,
            intent: PlayerIntent::default(),
            jump_was_held: false,
            crouching: false,
            skidding: false,
            can_jump: false,
            ground_timer: 0.0,
            run_timer: 0.0,
            run_direction: 0.0,
            invulnerable_timer: 0.0,
            fireball_cooldown: 0.0,
            throw_timer: 0.0,
            dead: false,
            frozen: false,
        }
    }

    fn body_spec(center: Vec2, half_extents: Vec2, velocity: Vec2) -> BodySpec {
        BodySpec::dynamic(center, half_extents)
            .with_velocity(velocity)
            .with_friction(PLAYER_FRICTION)
    }

    // -- Input --

    /// Turn this tick's intent into a horizontal velocity and (on a jump
    /// edge) a vertical impulse. Ignored while dead or frozen.
    pub fn handle_input(&mut self, physics: &mut PhysicsWorld, intent: PlayerIntent, dt: f32) {
        if self.dead || self.frozen {
            self.intent = PlayerIntent::default();
            return;
        }
        self.intent = intent;

        self.crouching = intent.crouch && self.tier.is_tall() && self.can_jump;
        let dir = if self.crouching { 0.0 } else { intent.horizontal() };

        if dir != 0.0 {
            if dir == self.run_direction {
                self.run_timer += dt;
            } else {
                self.run_timer = 0.0;
                self.run_direction = dir;
            }
            self.facing = Direction::from_sign(dir);
        } else {
            self.run_timer = 0.0;
            self.run_direction = 0.0;
        }

        let vel = self.body.velocity();
        self.skidding = dir != 0.0 && vel.x * dir < 0.0 && vel.x.abs() > MOVING_EPSILON;

        let vx = if dir == 0.0 || self.skidding {
            let damped = vel.x * self.tuning.skid_damping;
            if damped.abs() < STOP_EPSILON {
                0.0
            } else {
                damped
            }
        } else {
            dir * self.target_speed()
        };
        self.body.set_velocity(physics, Vec2::new(vx, vel.y));

        let jump_edge = intent.jump && !self.jump_was_held;
        if jump_edge && self.can_jump && !self.crouching {
            let mass = self.body.mass(physics);
            let dv = -self.tuning.jump_speed - vel.y;
            self.body.apply_impulse(physics, Vec2::new(0.0, mass * dv));
            self.can_jump = false;
            self.ground_timer = 0.0;
        }
        self.jump_was_held = intent.jump;
    }

    /// Walk speed until the run delay elapses, then a linear ramp to run speed.
    fn target_speed(&self) -> f32 {
        let t = &self.tuning;
        if self.run_timer <= t.run_delay {
            return t.walk_speed;
        }
        let progress = if t.run_ramp > 0.0 {
            ((self.run_timer - t.run_delay) / t.run_ramp).min(1.0)
        } else {
            1.0
        };
        t.walk_speed + (t.run_speed - t.walk_speed) * progress
    }

    // -- Tier transitions --

    /// Small → Big. No-op at any other tier or when dead.
    pub fn grow(&mut self, physics: &mut PhysicsWorld) -> bool {
        if self.dead || self.tier != Tier::Small {
            return false;
        }
        self.set_tier(physics, Tier::Big);
        true
    }

    /// Upgrade one step toward Fire: Big → Fire, Small → Big.
    /// No-op when already Fire or dead.
    pub fn become_fire(&mut self, physics: &mut PhysicsWorld) -> bool {
        match self.tier {
            _ if self.dead => false,
            Tier::Fire => false,
            Tier::Small => self.grow(physics),
            Tier::Big => {
                self.set_tier(physics, Tier::Fire);
                true
            }
        }
    }

    /// Step the tier down once. Grants the invulnerability window unless
    /// the hit was fatal.
    pub fn take_damage(&mut self, physics: &mut PhysicsWorld) -> DamageOutcome {
        if self.dead || self.is_invulnerable() {
            return DamageOutcome::Ignored;
        }
        let next = match self.tier {
            Tier::Fire => Tier::Big,
            Tier::Big => Tier::Small,
            Tier::Small => {
                self.die(physics);
                return DamageOutcome::Died;
            }
        };
        self.set_tier(physics, next);
        self.invulnerable_timer = self.tuning.invulnerability_time;
        DamageOutcome::Downgraded(next)
    }

    /// Kill the player: death hop, then a body that touches nothing but still
    /// falls under gravity. Returns `false` if already dead.
    pub fn die(&mut self, physics: &mut PhysicsWorld) -> bool {
        if self.dead {
            return false;
        }
        self.dead = true;
        self.frozen = true;
        self.state = PlayerState::Dead;
        self.intent = PlayerIntent::default();
        self.can_jump = false;

        let hop = Vec2::new(0.0, -self.tuning.death_hop_speed);
        let spec = Self::body_spec(self.body.position(), self.body.half_extents(), hop)
            .with_interaction(false);
        self.body.reprovision(physics, &spec);
        log::info!("player died at {:?}", self.body.position());
        true
    }

    /// Upward kick after a successful stomp.
    pub fn bounce(&mut self, physics: &mut PhysicsWorld) {
        if self.dead {
            return;
        }
        let vel = self.body.velocity();
        self.body
            .set_velocity(physics, Vec2::new(vel.x, -self.tuning.bounce_speed));
        self.can_jump = false;
        self.ground_timer = 0.0;
    }

    /// Query-with-side-effect: returns `true` when a fireball should be
    /// spawned now, and arms the cooldown and throw animation if so.
    pub fn try_shoot_fireball(&mut self) -> bool {
        if self.tier != Tier::Fire
            || self.dead
            || self.frozen
            || self.fireball_cooldown > 0.0
            || !self.intent.throw
        {
            return false;
        }
        self.fireball_cooldown = self.tuning.fireball_cooldown;
        self.throw_timer = self.tuning.throw_animation_time;
        true
    }

    /// Disable controls (goal reached). Physics keeps running.
    pub fn freeze(&mut self) {
        self.frozen = true;
        self.intent = PlayerIntent::default();
    }

    /// Change tier, swapping the body when the box size changes. The new box
    /// keeps the velocity and is recentred so the feet stay planted.
    fn set_tier(&mut self, physics: &mut PhysicsWorld, tier: Tier) {
        let old_half = self.body.half_extents();
        let new_half = half_extents_for(tier);
        self.tier = tier;
        if old_half == new_half {
            return;
        }
        let pos = self.body.position();
        let center = Vec2::new(pos.x, pos.y + old_half.y - new_half.y);
        let spec = Self::body_spec(center, new_half, self.body.velocity());
        self.body.reprovision(physics, &spec);
        log::debug!("player tier -> {:?}", tier);
    }

    fn derive_state(&self) -> PlayerState {
        if self.dead {
            PlayerState::Dead
        } else if self.throw_timer > 0.0 {
            PlayerState::Throwing
        } else if !self.can_jump {
            PlayerState::Jumping
        } else if self.crouching {
            PlayerState::Crouching
        } else if self.skidding {
            PlayerState::Braking
        } else if self.body.velocity().x.abs() > MOVING_EPSILON {
            PlayerState::Running
        } else {
            PlayerState::Idle
        }
    }

    // -- Queries --

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity()
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_timer > 0.0
    }

    pub fn can_jump(&self) -> bool {
        self.can_jump
    }

    /// Small box just above the head, used to strike blocks.
    pub fn head_sensor(&self) -> Rect {
        let bounds = self.bounds();
        let half_w = bounds.width() * 0.25;
        let cx = bounds.center().x;
        Rect::new(
            Vec2::new(cx - half_w, bounds.min.y - (HEAD_SENSOR_HEIGHT - HEAD_SENSOR_INSET)),
            Vec2::new(cx + half_w, bounds.min.y + HEAD_SENSOR_INSET),
        )
    }

    #[cfg(test)]
    pub(crate) fn body(&self) -> &BodySlot {
        &self.body
    }
}

impl Simulated for Player {
    fn id(&self) -> EntityId {
        self.id
    }

    /// Re-read the body, apply the asymmetric jump gravity, advance the
    /// grounded hysteresis and timers, and derive the movement state.
    fn update(&mut self, physics: &mut PhysicsWorld, dt: f32) {
        self.body.sync(physics);

        self.invulnerable_timer = (self.invulnerable_timer - dt).max(0.0);
        self.fireball_cooldown = (self.fireball_cooldown - dt).max(0.0);
        self.throw_timer = (self.throw_timer - dt).max(0.0);

        if self.dead {
            self.state = PlayerState::Dead;
            return;
        }

        let vel = self.body.velocity();
        let weight = self.body.mass(physics) * physics.gravity().y;
        if vel.y > 0.0 {
            self.body
                .apply_force(physics, Vec2::new(0.0, weight * self.tuning.fall_gravity));
        } else if vel.y < 0.0 && !self.intent.jump {
            self.body
                .apply_force(physics, Vec2::new(0.0, weight * self.tuning.low_jump_gravity));
        }

        if vel.y.abs() < self.tuning.ground_epsilon {
            self.ground_timer += dt;
            if self.ground_timer >= self.tuning.ground_time {
                self.can_jump = true;
            }
        } else {
            self.ground_timer = 0.0;
            self.can_jump = false;
        }

        self.state = self.derive_state();
    }

    fn is_alive(&self) -> bool {
        !self.dead
    }

    fn bounds(&self) -> Rect {
        Rect::from_center(self.body.position(), self.body.half_extents())
    }

    fn position(&self) -> Vec2 {
        self.body.position()
    }
}
