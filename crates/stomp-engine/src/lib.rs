pub mod api;
pub mod assets;
pub mod bridge;
pub mod core;
#[cfg(feature = "physics")]
pub mod entities;
pub mod input;
#[cfg(feature = "physics")]
pub mod world;

// Re-export key types at crate root for convenience
pub use api::config::{PlayerTuning, SimConfig};
pub use api::events::{EventRecord, GameEvent};
pub use api::types::{Direction, EnemyKind, EntityId, IdAllocator, ItemKind, Tier};
pub use assets::layout::{EnemySpawn, LevelLayout};
pub use bridge::protocol::ProtocolLayout;
pub use bridge::snapshot::EntitySnapshot;
pub use crate::core::geometry::Rect;
pub use crate::core::time::FixedTimestep;
pub use input::intent::{KeyState, PlayerIntent};
pub use input::queue::{InputEvent, InputQueue};

#[cfg(feature = "physics")]
pub use crate::core::body::BodySlot;
#[cfg(feature = "physics")]
pub use crate::core::physics::{BodyKind, BodySpec, PhysicsBody, PhysicsWorld, WORLD_SCALE};
#[cfg(feature = "physics")]
pub use entities::{
    block::{Block, BlockType},
    enemy::{Enemy, EnemyState, LifeState, ShellView},
    fireball::Fireball,
    goal::Goal,
    item::Item,
    player::{DamageOutcome, Player, PlayerState},
    Simulated,
};
#[cfg(feature = "physics")]
pub use world::{
    arbiter::Arbiter,
    cooldown::StompCooldown,
    level::Level,
    scene::LevelScene,
    session::{Session, SessionState},
};
