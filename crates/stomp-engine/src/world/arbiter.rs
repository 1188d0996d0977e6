//! Per-frame collision arbitration: turns overlaps between the player and
//! the level's entities into game events, in a fixed priority order.
//!
//! 1. kill zones, 2. block strikes, 3. item pickups, 4. enemy contact (gated
//! by the stomp cooldown, at most one resolution per frame), 5. fireballs,
//! 6. goal. Steps 1–4 and 6 are skipped while the player is dead.

use glam::Vec2;

use super::cooldown::StompCooldown;
use super::scene::LevelScene;
use crate::api::config::SimConfig;
use crate::api::events::GameEvent;
use crate::api::types::{ItemKind, Tier};
use crate::core::geometry::Rect;
use crate::core::physics::PhysicsWorld;
use crate::entities::enemy::Enemy;
use crate::entities::player::{DamageOutcome, Player};
use crate::entities::Simulated;

const STOMP_BOX_WIDTH_FACTOR: f32 = 0.6;
/// How far the stomp box reaches above the enemy's head.
const STOMP_BOX_RISE: f32 = 6.0;
const STOMP_BOX_HEIGHT: f32 = 14.0;
/// Extra width added to the damage box beyond the enemy's own box.
const DAMAGE_BOX_MARGIN: f32 = 8.0;

/// Narrow head-only band a falling player must land in to stomp.
pub fn stomp_box(feet: Vec2, size: Vec2) -> Rect {
    let half_w = size.x * STOMP_BOX_WIDTH_FACTOR * 0.5;
    let top = feet.y - size.y - STOMP_BOX_RISE;
    Rect::new(
        Vec2::new(feet.x - half_w, top),
        Vec2::new(feet.x + half_w, top + STOMP_BOX_HEIGHT),
    )
}

/// Full-body box, wider than the stomp box so off-centre landings hurt.
pub fn damage_box(feet: Vec2, size: Vec2) -> Rect {
    Rect::from_feet(feet, size.x + DAMAGE_BOX_MARGIN, size.y)
}

fn enemy_boxes(enemy: &Enemy) -> (Rect, Rect) {
    let feet = enemy.feet();
    let size = Enemy::size_of(enemy.kind());
    (stomp_box(feet, size), damage_box(feet, size))
}

/// Stateless rules; all cross-frame state lives in the scene, the player
/// and the [`StompCooldown`] passed in.
#[derive(Debug, Clone, Copy)]
pub struct Arbiter {
    stomp_min_fall_speed: f32,
}

impl Arbiter {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            stomp_min_fall_speed: config.stomp_min_fall_speed,
        }
    }

    /// Run one arbitration pass. Never ticks the cooldown; only arms it.
    pub fn check_collisions(
        &self,
        player: &mut Player,
        scene: &mut LevelScene,
        physics: &mut PhysicsWorld,
        cooldown: &mut StompCooldown,
    ) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if !player.is_dead() {
            self.kill_zones(player, scene, physics, &mut events);
        }
        if !player.is_dead() {
            self.block_strikes(player, scene, &mut events);
            self.item_pickups(player, scene, physics, &mut events);
        }
        if !player.is_dead() && cooldown.is_ready() {
            self.enemy_contact(player, scene, physics, cooldown, &mut events);
        }
        self.fireball_hits(scene, physics, &mut events);
        if !player.is_dead() {
            self.goal(player, scene, &mut events);
        }

        events
    }

    fn kill_zones(
        &self,
        player: &mut Player,
        scene: &LevelScene,
        physics: &mut PhysicsWorld,
        events: &mut Vec<GameEvent>,
    ) {
        let bounds = player.bounds();
        if scene.kill_zones.iter().any(|zone| zone.intersects(&bounds)) && player.die(physics) {
            events.push(GameEvent::PlayerDied { at: player.position() });
        }
    }

    fn block_strikes(&self, player: &Player, scene: &mut LevelScene, events: &mut Vec<GameEvent>) {
        let sensor = player.head_sensor();
        for index in 0..scene.blocks.len() {
            let block = &mut scene.blocks[index];
            if !block.bounds().intersects(&sensor) {
                continue;
            }
            let first = block.hit();
            let block_id = block.id();
            let at = block.position();
            events.push(GameEvent::BlockHit { block: block_id, first });
            if !first {
                continue;
            }

            // The opening block always gives a mushroom.
            let kind = if index > 0 && player.tier() >= Tier::Big {
                ItemKind::FireFlower
            } else {
                ItemKind::Mushroom
            };
            let item = scene.spawn_item(kind, at);
            log::debug!("block {:?} spawned {:?}", block_id, kind);
            events.push(GameEvent::ItemSpawned { item, kind, at });
        }
    }

    fn item_pickups(
        &self,
        player: &mut Player,
        scene: &mut LevelScene,
        physics: &mut PhysicsWorld,
        events: &mut Vec<GameEvent>,
    ) {
        for item in &mut scene.items {
            if item.is_collected() || item.is_spawning() {
                continue;
            }
            if !item.bounds().intersects(&player.bounds()) {
                continue;
            }
            item.collect(physics);
            match item.kind() {
                ItemKind::FireFlower => player.become_fire(physics),
                ItemKind::Mushroom => player.grow(physics),
            };
            events.push(GameEvent::ItemCollected {
                item: item.id(),
                kind: item.kind(),
                tier: player.tier(),
            });
        }
    }

    fn enemy_contact(
        &self,
        player: &mut Player,
        scene: &mut LevelScene,
        physics: &mut PhysicsWorld,
        cooldown: &mut StompCooldown,
        events: &mut Vec<GameEvent>,
    ) {
        let bounds = player.bounds();
        let falling = player.velocity().y > self.stomp_min_fall_speed;

        for enemy in scene.enemies.iter_mut().filter(|e| e.is_interactive()) {
            let (stomp, damage) = enemy_boxes(enemy);

            if falling && bounds.intersects(&stomp) {
                enemy.stomp(physics);
                player.bounce(physics);
                cooldown.arm();
                log::debug!("stomped {:?}", enemy.id());
                events.push(GameEvent::EnemyStomped { enemy: enemy.id() });
                return;
            }

            if !bounds.intersects(&damage) {
                continue;
            }

            if enemy.is_idle_shell() {
                let dx = enemy.position().x - player.position().x;
                let direction = if dx == 0.0 {
                    player.facing().sign()
                } else {
                    dx.signum()
                };
                enemy.kick(physics, direction, player.velocity().x);
                cooldown.arm();
                events.push(GameEvent::ShellKicked {
                    enemy: enemy.id(),
                    direction,
                });
                return;
            }

            // Damage leaves the cooldown alone so contact keeps hurting.
            match player.take_damage(physics) {
                DamageOutcome::Downgraded(tier) => events.push(GameEvent::PlayerDamaged { tier }),
                DamageOutcome::Died => events.push(GameEvent::PlayerDied { at: player.position() }),
                DamageOutcome::Ignored => {}
            }
            return;
        }
    }

    fn fireball_hits(&self, scene: &mut LevelScene, physics: &mut PhysicsWorld, events: &mut Vec<GameEvent>) {
        for fireball in scene.fireballs.iter_mut().filter(|f| f.is_alive()) {
            let fb_bounds = fireball.bounds();
            let target = scene
                .enemies
                .iter_mut()
                .filter(|e| e.is_alive())
                .find(|e| e.bounds().intersects(&fb_bounds));
            let Some(enemy) = target else {
                continue;
            };

            // A squashed goomba or a falling shell still eats the fireball.
            let burned = if enemy.is_shell() {
                enemy.kill_by_fireball(physics)
            } else {
                enemy.stomp(physics)
            };
            fireball.destroy(physics);
            if burned {
                events.push(GameEvent::EnemyBurned {
                    enemy: enemy.id(),
                    fireball: fireball.id(),
                });
            } else {
                log::debug!("fireball {:?} spent on {:?}", fireball.id(), enemy.id());
            }
        }
    }

    fn goal(&self, player: &mut Player, scene: &mut LevelScene, events: &mut Vec<GameEvent>) {
        let Some(goal) = scene.goal.as_mut() else {
            return;
        };
        if player.position().x >= goal.x() && goal.trigger() {
            player.freeze();
            events.push(GameEvent::GoalReached { x: goal.x() });
        }
    }
}
