use glam::Vec2;

use super::arbiter::Arbiter;
use super::cooldown::StompCooldown;
use super::scene::LevelScene;
use crate::api::config::SimConfig;
use crate::api::events::GameEvent;
use crate::api::types::{EnemyKind, EntityId, ItemKind, Tier};
use crate::assets::layout::LevelLayout;
use crate::bridge::snapshot::{kinds, EntitySnapshot};
use crate::core::geometry::Rect;
use crate::core::physics::{BodySpec, PhysicsWorld};
use crate::entities::block::{Block, BlockType};
use crate::entities::enemy::{Enemy, EnemyState};
use crate::entities::fireball::SPAWN_OFFSET;
use crate::entities::goal::Goal;
use crate::entities::player::{Player, PlayerState, SMALL_HALF_EXTENTS};
use crate::entities::Simulated;
use crate::input::intent::PlayerIntent;

/// One playable level: owns the physics world, the player and every other
/// entity, and drives them through a fixed per-tick order.
pub struct Level {
    config: SimConfig,
    physics: PhysicsWorld,
    scene: LevelScene,
    player: Player,
    cooldown: StompCooldown,
    arbiter: Arbiter,
    terrain: Vec<Rect>,
    ground_y: f32,
}

impl Level {
    pub fn new(config: &SimConfig, layout: &LevelLayout) -> Self {
        let mut physics = PhysicsWorld::new(Vec2::new(0.0, config.gravity));
        physics.set_dt(config.fixed_dt);
        let mut scene = LevelScene::new(layout.width);

        let terrain: Vec<Rect> = layout
            .ground_rects()
            .chain(layout.platforms.iter().copied())
            .collect();
        for rect in &terrain {
            let id = scene.next_id();
            physics.create_body(id, &BodySpec::fixed(rect.center(), rect.center() - rect.min));
        }

        for &center in &layout.blocks {
            let id = scene.next_id();
            scene.add_block(Block::new(&mut physics, id, center));
        }
        for spawn in &layout.enemies {
            let id = scene.next_id();
            scene.add_enemy(Enemy::new(&mut physics, id, spawn.kind, spawn.feet));
        }
        for &zone in &layout.kill_zones {
            scene.add_kill_zone(zone);
        }
        let goal_id = scene.next_id();
        scene.set_goal(Goal::new(goal_id, Vec2::new(layout.goal_x, layout.ground_y)));

        let player_id = scene.next_id();
        let start = layout.player_start - Vec2::new(0.0, SMALL_HALF_EXTENTS.y);
        let player = Player::new(&mut physics, player_id, start, config.player);

        log::info!(
            "level built: {} terrain, {} blocks, {} enemies, width {}",
            terrain.len(),
            layout.blocks.len(),
            layout.enemies.len(),
            layout.width
        );

        Self {
            config: config.clone(),
            physics,
            scene,
            player,
            cooldown: StompCooldown::new(config.stomp_cooldown),
            arbiter: Arbiter::new(config),
            terrain,
            ground_y: layout.ground_y,
        }
    }

    /// Advance one fixed tick and return the events it produced.
    pub fn step(&mut self, dt: f32, intent: PlayerIntent) -> Vec<GameEvent> {
        let mut events = Vec::new();

        self.player.handle_input(&mut self.physics, intent, dt);
        self.physics.set_dt(dt);
        self.physics.step();
        self.player.update(&mut self.physics, dt);

        if self.player.try_shoot_fireball() {
            let direction = self.player.facing().sign();
            let at = self.player.position() + Vec2::new(SPAWN_OFFSET * direction, 0.0);
            let fireball = self.spawn_fireball(at.x, at.y, direction);
            events.push(GameEvent::FireballThrown { fireball, direction });
        }

        self.scene.update(&mut self.physics, dt);
        self.cooldown.tick(dt);
        events.extend(self.arbiter.check_collisions(
            &mut self.player,
            &mut self.scene,
            &mut self.physics,
            &mut self.cooldown,
        ));

        if !self.player.is_dead()
            && self.player.position().y > self.config.fall_death_y
            && self.player.die(&mut self.physics)
        {
            events.push(GameEvent::PlayerDied { at: self.player.position() });
        }

        self.scene.collect_garbage(&mut self.physics);
        events
    }

    /// While the death hop plays out only physics and the player move.
    pub fn step_death_animation(&mut self, dt: f32) {
        self.physics.set_dt(dt);
        self.physics.step();
        self.player.update(&mut self.physics, dt);
    }

    pub fn spawn_fireball(&mut self, x: f32, y: f32, direction: f32) -> EntityId {
        self.scene
            .spawn_fireball(&mut self.physics, Vec2::new(x, y), direction)
    }

    pub fn spawn_item(&mut self, kind: ItemKind, x: f32, y: f32) -> EntityId {
        self.scene.spawn_item(kind, Vec2::new(x, y))
    }

    // -- Queries --

    pub fn ground_y(&self) -> f32 {
        self.ground_y
    }

    pub fn level_width(&self) -> f32 {
        self.scene.level_width()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn scene(&self) -> &LevelScene {
        &self.scene
    }

    pub fn cooldown(&self) -> &StompCooldown {
        &self.cooldown
    }

    pub fn is_goal_reached(&self) -> bool {
        self.scene.goal().is_some_and(|g| g.is_triggered())
    }

    pub fn is_goal_animation_complete(&self) -> bool {
        self.scene.goal().is_some_and(|g| g.is_animation_complete())
    }

    /// Mutable access for scripted setups (tests, debug tools).
    pub fn parts_mut(&mut self) -> (&mut Player, &mut LevelScene, &mut PhysicsWorld) {
        (&mut self.player, &mut self.scene, &mut self.physics)
    }

    /// Flatten every visible entity for the renderer.
    pub fn snapshots(&self, out: &mut Vec<EntitySnapshot>) {
        out.clear();
        for rect in &self.terrain {
            out.push(EntitySnapshot::new(kinds::TERRAIN, *rect));
        }
        for zone in self.scene.kill_zones() {
            out.push(EntitySnapshot::new(kinds::KILL_ZONE, *zone));
        }
        if let Some(goal) = self.scene.goal() {
            out.push(EntitySnapshot::new(kinds::GOAL, goal.bounds()).with_state(goal.anim_frame() as f32));
        }
        for block in self.scene.blocks() {
            let kind = match block.block_type() {
                BlockType::Question => kinds::BLOCK_QUESTION,
                BlockType::Empty => kinds::BLOCK_EMPTY,
            };
            out.push(EntitySnapshot::new(kind, block.bounds()));
        }
        for item in self.scene.items().iter().filter(|i| !i.is_collected()) {
            let kind = match item.kind() {
                ItemKind::Mushroom => kinds::MUSHROOM,
                ItemKind::FireFlower => kinds::FIRE_FLOWER,
            };
            out.push(EntitySnapshot::new(kind, item.bounds()).with_alpha(item.alpha()));
        }
        for enemy in self.scene.enemies().iter().filter(|e| e.is_alive()) {
            let kind = match enemy.kind() {
                EnemyKind::Goomba => kinds::GOOMBA,
                EnemyKind::Koopa => kinds::KOOPA,
            };
            out.push(
                EntitySnapshot::new(kind, enemy.bounds())
                    .with_state(enemy_state_code(enemy.state()))
                    .with_facing(enemy.direction()),
            );
        }
        for fireball in self.scene.fireballs().iter().filter(|f| f.is_alive()) {
            out.push(
                EntitySnapshot::new(kinds::FIREBALL, fireball.bounds())
                    .with_state(fireball.anim_frame() as f32)
                    .with_facing(fireball.direction()),
            );
        }

        let player_kind = match self.player.tier() {
            Tier::Small => kinds::PLAYER_SMALL,
            Tier::Big => kinds::PLAYER_BIG,
            Tier::Fire => kinds::PLAYER_FIRE,
        };
        out.push(
            EntitySnapshot::new(player_kind, self.player.bounds())
                .with_state(player_state_code(self.player.state()))
                .with_facing(self.player.facing().sign()),
        );
    }
}

fn player_state_code(state: PlayerState) -> f32 {
    match state {
        PlayerState::Idle => 0.0,
        PlayerState::Running => 1.0,
        PlayerState::Jumping => 2.0,
        PlayerState::Braking => 3.0,
        PlayerState::Crouching => 4.0,
        PlayerState::Throwing => 5.0,
        PlayerState::Dead => 6.0,
    }
}

fn enemy_state_code(state: EnemyState) -> f32 {
    match state {
        EnemyState::Walking => 0.0,
        EnemyState::Stomped => 1.0,
        EnemyState::Shell => 2.0,
        EnemyState::ShellMoving => 3.0,
        EnemyState::ShellDying => 4.0,
        EnemyState::Dead => 5.0,
    }
}
