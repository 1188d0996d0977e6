use serde::{Deserialize, Serialize};

/// Unique identifier for a simulated entity. Stored in the physics body's
/// user data so handles can be traced back to their owner in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Monotonic id source owned by a level.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Horizontal facing / travel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// −1.0 for left, +1.0 for right.
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    pub fn from_sign(sign: f32) -> Self {
        if sign < 0.0 {
            Direction::Left
        } else {
            Direction::Right
        }
    }
}

/// Player power tier. Upgrades and downgrades move one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    Small,
    Big,
    Fire,
}

impl Tier {
    /// Whether this tier uses the tall collision box.
    pub fn is_tall(self) -> bool {
        self >= Tier::Big
    }
}

/// Power-up variant spawned from a question block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Mushroom,
    FireFlower,
}

/// Enemy variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Goomba,
    Koopa,
}
