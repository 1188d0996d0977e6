use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::types::EnemyKind;
use crate::core::geometry::Rect;

/// Placement of everything a level is built from. All coordinates are in
/// pixels, Y-down. Loaded from JSON or taken from [`LevelLayout::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelLayout {
    /// Horizontal extent of the playable area.
    pub width: f32,
    /// Y of the top surface of the ground.
    pub ground_y: f32,
    /// Thickness of the ground slabs.
    pub ground_depth: f32,
    /// Solid ground sections as `[start_x, end_x]`. Gaps between them are pits.
    pub ground: Vec<[f32; 2]>,
    /// Solid floating platforms.
    pub platforms: Vec<Rect>,
    /// Question block centres, in level order.
    pub blocks: Vec<Vec2>,
    pub enemies: Vec<EnemySpawn>,
    /// Areas that kill the player on contact. They have no physics body.
    pub kill_zones: Vec<Rect>,
    /// Player feet position at level start.
    pub player_start: Vec2,
    /// X of the goal pole; its base sits on `ground_y`.
    pub goal_x: f32,
}

/// One enemy placement; `feet` is the bottom-centre of its box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub feet: Vec2,
}

impl LevelLayout {
    /// Parse a layout from a JSON string. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Ground slab rectangles derived from the `ground` sections.
    pub fn ground_rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.ground.iter().map(|[x0, x1]| {
            Rect::new(
                Vec2::new(*x0, self.ground_y),
                Vec2::new(*x1, self.ground_y + self.ground_depth),
            )
        })
    }
}

impl Default for LevelLayout {
    fn default() -> Self {
        let ground_y = 550.0;
        let block_y = ground_y - 128.0;
        let goomba = |x: f32| EnemySpawn {
            kind: EnemyKind::Goomba,
            feet: Vec2::new(x, ground_y),
        };
        let koopa = |x: f32| EnemySpawn {
            kind: EnemyKind::Koopa,
            feet: Vec2::new(x, ground_y),
        };
        let platform = |x: f32, y: f32, w: f32| Rect::new(Vec2::new(x, y), Vec2::new(x + w, y + 32.0));
        let spikes = |x: f32, w: f32| Rect::new(Vec2::new(x, ground_y - 16.0), Vec2::new(x + w, ground_y));

        Self {
            width: 6400.0,
            ground_y,
            ground_depth: 100.0,
            ground: vec![[0.0, 1100.0], [1216.0, 3000.0], [3100.0, 4700.0], [4800.0, 6400.0]],
            platforms: vec![
                platform(1400.0, ground_y - 160.0, 192.0),
                platform(2200.0, ground_y - 192.0, 128.0),
                platform(3600.0, ground_y - 160.0, 256.0),
                platform(5200.0, ground_y - 224.0, 160.0),
            ],
            blocks: vec![
                Vec2::new(400.0, block_y),
                Vec2::new(900.0, block_y),
                Vec2::new(1800.0, block_y),
                Vec2::new(2800.0, block_y),
                Vec2::new(4000.0, block_y),
                Vec2::new(5600.0, block_y),
            ],
            enemies: vec![
                goomba(700.0),
                goomba(1500.0),
                koopa(2000.0),
                goomba(2600.0),
                koopa(3400.0),
                goomba(4200.0),
                goomba(4300.0),
                koopa(5000.0),
                goomba(5800.0),
            ],
            kill_zones: vec![spikes(2450.0, 48.0), spikes(4450.0, 64.0)],
            player_start: Vec2::new(100.0, ground_y),
            goal_x: 6200.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_consistent() {
        let layout = LevelLayout::default();
        assert!(!layout.blocks.is_empty());
        assert!(layout.goal_x < layout.width);
        assert!(layout.player_start.x < layout.goal_x);
        for spawn in &layout.enemies {
            assert!(spawn.feet.x > 0.0 && spawn.feet.x < layout.width);
        }
        let ground: Vec<Rect> = layout.ground_rects().collect();
        assert_eq!(ground.len(), 4);
        assert!((ground[0].min.y - layout.ground_y).abs() < 1e-6);
    }

    #[test]
    fn parse_minimal_layout() {
        let json = r#"{
            "width": 800,
            "ground": [[0, 800]],
            "blocks": [[200, 400]],
            "enemies": [{ "kind": "Koopa", "feet": [500, 550] }],
            "kill_zones": [{ "min": [600, 540], "max": [640, 550] }]
        }"#;
        let layout = LevelLayout::from_json(json).unwrap();
        assert!((layout.width - 800.0).abs() < 1e-6);
        assert_eq!(layout.blocks, vec![Vec2::new(200.0, 400.0)]);
        assert_eq!(layout.enemies[0].kind, EnemyKind::Koopa);
        assert_eq!(layout.kill_zones.len(), 1);
        // Unspecified fields fall back to the default level
        assert!((layout.ground_y - 550.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_unknown_enemy_kind() {
        let json = r#"{ "enemies": [{ "kind": "Boo", "feet": [0, 0] }] }"#;
        assert!(LevelLayout::from_json(json).is_err());
    }
}
