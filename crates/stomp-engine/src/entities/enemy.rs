//! Walking enemies. A single `Enemy` type tagged by [`EnemyKind`]; the Koopa
//! variant replaces the one-way stomp kill with the shell cycle.

use glam::Vec2;

use super::Simulated;
use crate::api::types::{EnemyKind, EntityId};
use crate::core::body::BodySlot;
use crate::core::geometry::Rect;
use crate::core::physics::{BodyKind, BodySpec, PhysicsWorld};

pub const WALK_SPEED: f32 = 1.5;
pub const SHELL_SPEED: f32 = 5.0;
/// Kicks scale with the kicker's speed up to this multiple of `SHELL_SPEED`.
const MAX_KICK_FACTOR: f32 = 2.0;
const KICK_SPEED_SCALE: f32 = 1.2;
/// |vx| below this after a physics step means the enemy walked into something.
const WALL_EPSILON: f32 = 0.1;
pub const STOMP_DELAY: f32 = 0.5;
const WALK_FRAME_TIME: f32 = 0.15;
const WALK_FRAMES: u32 = 2;
const SHELL_FRAME_TIME: f32 = 0.05;
const SHELL_FRAMES: u32 = 3;
const BURN_HOP_SPEED: f32 = 4.0;
const BURN_FALL_TIME: f32 = 1.0;

pub const GOOMBA_SIZE: Vec2 = Vec2::new(32.0, 32.0);
pub const KOOPA_SIZE: Vec2 = Vec2::new(28.0, 48.0);

/// Full state of an enemy. Goombas only use `Walking`, `Stomped` and `Dead`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    Walking,
    /// Squashed; dies when the stomp delay runs out.
    Stomped,
    /// Idle Koopa shell.
    Shell,
    /// Kicked Koopa shell sliding at shell speed.
    ShellMoving,
    /// Knocked out by a fireball, falling through the world.
    ShellDying,
    Dead,
}

/// Coarse life state shared by every variant. Shell states count as
/// `Stomped` so the generic stomp delay never applies to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeState {
    Walking,
    Stomped,
    Dead,
}

/// What the arbiter needs to know about a Koopa shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellView {
    pub moving: bool,
}

pub struct Enemy {
    id: EntityId,
    kind: EnemyKind,
    body: BodySlot,
    state: EnemyState,
    direction: f32,
    shell_speed: f32,
    state_timer: f32,
    anim_timer: f32,
    anim_frame: u32,
}

impl Enemy {
    /// Spawn an enemy standing with its feet at `feet` (pixels).
    pub fn new(physics: &mut PhysicsWorld, id: EntityId, kind: EnemyKind, feet: Vec2) -> Self {
        let size = Self::size_of(kind);
        let center = Vec2::new(feet.x, feet.y - size.y * 0.5);
        let direction = -1.0;
        let mut spec = BodySpec::dynamic(center, size * 0.5)
            .with_velocity(Vec2::new(WALK_SPEED * direction, 0.0));
        if kind == EnemyKind::Koopa {
            spec = spec.with_friction(0.0);
        }
        Self {
            id,
            kind,
            body: BodySlot::create(physics, id, &spec),
            state: EnemyState::Walking,
            direction,
            shell_speed: SHELL_SPEED,
            state_timer: 0.0,
            anim_timer: 0.0,
            anim_frame: 0,
        }
    }

    pub fn size_of(kind: EnemyKind) -> Vec2 {
        match kind {
            EnemyKind::Goomba => GOOMBA_SIZE,
            EnemyKind::Koopa => KOOPA_SIZE,
        }
    }

    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn life_state(&self) -> LifeState {
        match self.state {
            EnemyState::Walking => LifeState::Walking,
            EnemyState::Dead => LifeState::Dead,
            _ => LifeState::Stomped,
        }
    }

    /// Walk direction, −1 or +1.
    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn velocity(&self) -> Vec2 {
        self.body.velocity()
    }

    pub fn anim_frame(&self) -> u32 {
        self.anim_frame
    }

    /// Bottom-centre of the body box.
    pub fn feet(&self) -> Vec2 {
        self.bounds().feet()
    }

    /// Shell capability; `None` for Goombas and for Koopas out of their shell.
    pub fn as_shell(&self) -> Option<ShellView> {
        match self.state {
            EnemyState::Shell => Some(ShellView { moving: false }),
            EnemyState::ShellMoving => Some(ShellView { moving: true }),
            _ => None,
        }
    }

    pub fn is_shell(&self) -> bool {
        self.as_shell().is_some()
    }

    pub fn is_idle_shell(&self) -> bool {
        self.as_shell() == Some(ShellView { moving: false })
    }

    /// Whether the player can still stomp, kick or be hurt by this enemy.
    pub fn is_interactive(&self) -> bool {
        matches!(
            self.state,
            EnemyState::Walking | EnemyState::Shell | EnemyState::ShellMoving
        )
    }

    /// Apply a stomp. Returns `true` if the state changed.
    pub fn stomp(&mut self, physics: &mut PhysicsWorld) -> bool {
        match (self.kind, self.state) {
            (EnemyKind::Goomba, EnemyState::Walking) => {
                self.state = EnemyState::Stomped;
                self.state_timer = 0.0;
                self.body.set_velocity(physics, Vec2::ZERO);
                self.body.set_kind(physics, BodyKind::Kinematic);
                true
            }
            (EnemyKind::Koopa, EnemyState::Walking) | (EnemyKind::Koopa, EnemyState::ShellMoving) => {
                self.state = EnemyState::Shell;
                self.body.set_velocity(physics, Vec2::ZERO);
                true
            }
            (EnemyKind::Koopa, EnemyState::Shell) => {
                self.launch_shell(physics, 1.0, SHELL_SPEED);
                true
            }
            _ => false,
        }
    }

    /// Kick an idle shell. Speed scales with the kicker's horizontal speed,
    /// never below `SHELL_SPEED` and never above twice that.
    pub fn kick(&mut self, physics: &mut PhysicsWorld, direction: f32, kicker_speed: f32) -> bool {
        if self.state != EnemyState::Shell {
            return false;
        }
        let speed = (kicker_speed.abs() * KICK_SPEED_SCALE)
            .max(SHELL_SPEED)
            .min(SHELL_SPEED * MAX_KICK_FACTOR);
        let direction = if direction < 0.0 { -1.0 } else { 1.0 };
        self.launch_shell(physics, direction, speed);
        true
    }

    fn launch_shell(&mut self, physics: &mut PhysicsWorld, direction: f32, speed: f32) {
        self.state = EnemyState::ShellMoving;
        self.direction = direction;
        self.shell_speed = speed;
        self.body.set_kind(physics, BodyKind::Dynamic);
        self.body
            .set_velocity(physics, Vec2::new(speed * direction, 0.0));
    }

    /// Fireball hit on a shell: drop out of the world with a small hop, then die.
    pub fn kill_by_fireball(&mut self, physics: &mut PhysicsWorld) -> bool {
        if !self.is_shell() {
            return false;
        }
        self.state = EnemyState::ShellDying;
        self.state_timer = 0.0;
        self.body.set_kind(physics, BodyKind::Dynamic);
        self.body.set_interaction(physics, false);
        self.body.set_velocity(physics, Vec2::new(0.0, -BURN_HOP_SPEED));
        true
    }

    /// The only place the body is destroyed.
    fn enter_dead(&mut self, physics: &mut PhysicsWorld) {
        if self.state == EnemyState::Dead {
            return;
        }
        self.state = EnemyState::Dead;
        self.body.release(physics);
        log::debug!("enemy {:?} dead", self.id);
    }

    /// Re-assert patrol velocity, flipping direction when blocked.
    fn patrol(&mut self, physics: &mut PhysicsWorld, speed: f32) {
        let vel = self.body.velocity();
        if vel.x.abs() < WALL_EPSILON {
            self.direction = -self.direction;
        }
        self.body
            .set_velocity(physics, Vec2::new(speed * self.direction, vel.y));
    }

    fn animate(&mut self, dt: f32, frame_time: f32, frames: u32) {
        self.anim_timer += dt;
        if self.anim_timer >= frame_time {
            self.anim_timer = 0.0;
            self.anim_frame = (self.anim_frame + 1) % frames;
        }
    }

    #[cfg(test)]
    pub(crate) fn body(&self) -> &BodySlot {
        &self.body
    }

    #[cfg(test)]
    pub(crate) fn state_timer(&self) -> f32 {
        self.state_timer
    }
}

impl Simulated for Enemy {
    fn id(&self) -> EntityId {
        self.id
    }

    fn update(&mut self, physics: &mut PhysicsWorld, dt: f32) {
        self.body.sync(physics);
        match self.state {
            EnemyState::Walking => {
                self.animate(dt, WALK_FRAME_TIME, WALK_FRAMES);
                self.patrol(physics, WALK_SPEED);
            }
            EnemyState::Stomped => {
                self.state_timer += dt;
                if self.state_timer >= STOMP_DELAY {
                    self.enter_dead(physics);
                }
            }
            EnemyState::Shell => {}
            EnemyState::ShellMoving => {
                self.animate(dt, SHELL_FRAME_TIME, SHELL_FRAMES);
                self.patrol(physics, self.shell_speed);
            }
            EnemyState::ShellDying => {
                self.state_timer += dt;
                if self.state_timer >= BURN_FALL_TIME {
                    self.enter_dead(physics);
                }
            }
            EnemyState::Dead => {}
        }
    }

    fn is_alive(&self) -> bool {
        self.state != EnemyState::Dead
    }

    fn bounds(&self) -> Rect {
        Rect::from_center(self.body.position(), Self::size_of(self.kind) * 0.5)
    }

    fn position(&self) -> Vec2 {
        self.body.position()
    }
}
