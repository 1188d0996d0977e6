use glam::Vec2;

use crate::api::types::{EntityId, IdAllocator, ItemKind};
use crate::core::geometry::Rect;
use crate::core::physics::PhysicsWorld;
use crate::entities::block::Block;
use crate::entities::enemy::Enemy;
use crate::entities::fireball::Fireball;
use crate::entities::goal::Goal;
use crate::entities::item::Item;
use crate::entities::Simulated;

/// Owned entity collections of one level, stored in flat Vecs.
/// Entity counts are small (tens), so lookups are linear scans.
pub struct LevelScene {
    pub(super) ids: IdAllocator,
    pub(super) blocks: Vec<Block>,
    pub(super) items: Vec<Item>,
    pub(super) enemies: Vec<Enemy>,
    pub(super) fireballs: Vec<Fireball>,
    pub(super) kill_zones: Vec<Rect>,
    pub(super) goal: Option<Goal>,
    level_width: f32,
}

impl LevelScene {
    pub fn new(level_width: f32) -> Self {
        Self {
            ids: IdAllocator::new(),
            blocks: Vec::new(),
            items: Vec::new(),
            enemies: Vec::new(),
            fireballs: Vec::new(),
            kill_zones: Vec::new(),
            goal: None,
            level_width,
        }
    }

    pub fn next_id(&mut self) -> EntityId {
        self.ids.next_id()
    }

    pub fn level_width(&self) -> f32 {
        self.level_width
    }

    // -- Population --

    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn add_enemy(&mut self, enemy: Enemy) {
        self.enemies.push(enemy);
    }

    pub fn add_kill_zone(&mut self, zone: Rect) {
        self.kill_zones.push(zone);
    }

    pub fn set_goal(&mut self, goal: Goal) {
        self.goal = Some(goal);
    }

    /// Start a power-up rising out of a block at `at`.
    pub fn spawn_item(&mut self, kind: ItemKind, at: Vec2) -> EntityId {
        let id = self.ids.next_id();
        self.items.push(Item::new(id, kind, at));
        id
    }

    pub fn spawn_fireball(&mut self, physics: &mut PhysicsWorld, at: Vec2, direction: f32) -> EntityId {
        let id = self.ids.next_id();
        self.fireballs
            .push(Fireball::new(physics, id, at, direction, self.level_width));
        id
    }

    // -- Queries --

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn fireballs(&self) -> &[Fireball] {
        &self.fireballs
    }

    pub fn kill_zones(&self) -> &[Rect] {
        &self.kill_zones
    }

    pub fn goal(&self) -> Option<&Goal> {
        self.goal.as_ref()
    }

    pub fn enemy(&self, id: EntityId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id() == id)
    }

    pub fn item(&self, id: EntityId) -> Option<&Item> {
        self.items.iter().find(|i| i.id() == id)
    }

    // -- Per-frame --

    /// Update every non-player entity once.
    pub fn update(&mut self, physics: &mut PhysicsWorld, dt: f32) {
        for block in &mut self.blocks {
            block.update(physics, dt);
        }
        for item in &mut self.items {
            item.update(physics, dt);
        }
        for enemy in &mut self.enemies {
            enemy.update(physics, dt);
        }
        for fireball in &mut self.fireballs {
            fireball.update(physics, dt);
        }
        if let Some(goal) = &mut self.goal {
            goal.update(physics, dt);
        }
    }

    /// Drop dead enemies, spent fireballs and collected items.
    /// Their bodies are already gone by the time they are terminal.
    pub fn collect_garbage(&mut self, physics: &mut PhysicsWorld) {
        self.enemies.retain(|e| e.is_alive());
        self.items.retain(|i| i.is_alive());
        for fireball in self.fireballs.iter_mut().filter(|f| !f.is_alive()) {
            fireball.destroy(physics);
        }
        self.fireballs.retain(|f| f.is_alive());
    }
}
