use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::api::types::{EntityId, ItemKind, Tier};

/// A discrete gameplay event produced during one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// The player's head sensor struck a block. `first` is true only for the
    /// hit that emptied it.
    BlockHit { block: EntityId, first: bool },
    /// A power-up started rising out of a block.
    ItemSpawned { item: EntityId, kind: ItemKind, at: Vec2 },
    /// The player touched an active power-up.
    ItemCollected { item: EntityId, kind: ItemKind, tier: Tier },
    /// An enemy was stomped (or a Koopa shell changed state from a stomp).
    EnemyStomped { enemy: EntityId },
    /// An idle shell was kicked by the player.
    ShellKicked { enemy: EntityId, direction: f32 },
    /// The player lost a tier.
    PlayerDamaged { tier: Tier },
    /// The player died.
    PlayerDied { at: Vec2 },
    /// A fireball struck an enemy.
    EnemyBurned { enemy: EntityId, fireball: EntityId },
    /// The player threw a fireball.
    FireballThrown { fireball: EntityId, direction: f32 },
    /// The player crossed the goal.
    GoalReached { x: f32 },
}

/// Event kind codes used on the wire.
pub mod kinds {
    pub const BLOCK_HIT: f32 = 1.0;
    pub const ITEM_SPAWNED: f32 = 2.0;
    pub const ITEM_COLLECTED: f32 = 3.0;
    pub const ENEMY_STOMPED: f32 = 4.0;
    pub const SHELL_KICKED: f32 = 5.0;
    pub const PLAYER_DAMAGED: f32 = 6.0;
    pub const PLAYER_DIED: f32 = 7.0;
    pub const ENEMY_BURNED: f32 = 8.0;
    pub const FIREBALL_THROWN: f32 = 9.0;
    pub const GOAL_REACHED: f32 = 10.0;
}

/// Generic wire container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct EventRecord {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl EventRecord {
    pub const FLOATS: usize = 4;

    fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}

fn tier_code(tier: Tier) -> f32 {
    match tier {
        Tier::Small => 0.0,
        Tier::Big => 1.0,
        Tier::Fire => 2.0,
    }
}

fn item_code(kind: ItemKind) -> f32 {
    match kind {
        ItemKind::Mushroom => 0.0,
        ItemKind::FireFlower => 1.0,
    }
}

impl From<&GameEvent> for EventRecord {
    fn from(event: &GameEvent) -> Self {
        match *event {
            GameEvent::BlockHit { block, first } => {
                EventRecord::new(kinds::BLOCK_HIT, block.0 as f32, if first { 1.0 } else { 0.0 }, 0.0)
            }
            GameEvent::ItemSpawned { item, kind, at } => {
                EventRecord::new(kinds::ITEM_SPAWNED, item.0 as f32, item_code(kind), at.x)
            }
            GameEvent::ItemCollected { item, kind, tier } => {
                EventRecord::new(kinds::ITEM_COLLECTED, item.0 as f32, item_code(kind), tier_code(tier))
            }
            GameEvent::EnemyStomped { enemy } => {
                EventRecord::new(kinds::ENEMY_STOMPED, enemy.0 as f32, 0.0, 0.0)
            }
            GameEvent::ShellKicked { enemy, direction } => {
                EventRecord::new(kinds::SHELL_KICKED, enemy.0 as f32, direction, 0.0)
            }
            GameEvent::PlayerDamaged { tier } => {
                EventRecord::new(kinds::PLAYER_DAMAGED, tier_code(tier), 0.0, 0.0)
            }
            GameEvent::PlayerDied { at } => EventRecord::new(kinds::PLAYER_DIED, at.x, at.y, 0.0),
            GameEvent::EnemyBurned { enemy, fireball } => {
                EventRecord::new(kinds::ENEMY_BURNED, enemy.0 as f32, fireball.0 as f32, 0.0)
            }
            GameEvent::FireballThrown { fireball, direction } => {
                EventRecord::new(kinds::FIREBALL_THROWN, fireball.0 as f32, direction, 0.0)
            }
            GameEvent::GoalReached { x } => EventRecord::new(kinds::GOAL_REACHED, x, 0.0, 0.0),
        }
    }
}
