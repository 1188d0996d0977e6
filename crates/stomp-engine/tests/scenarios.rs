#![cfg(feature = "physics")]

use glam::Vec2;
use stomp_engine::{
    EnemyKind, EnemySpawn, EnemyState, GameEvent, ItemKind, Level, LevelLayout, PlayerIntent, Rect,
    SimConfig, Simulated, Tier,
};

const DT: f32 = 1.0 / 60.0;
const GROUND_Y: f32 = 500.0;

/// Flat floor with nothing on it; the player starts far from the action.
fn flat_layout(player_x: f32) -> LevelLayout {
    LevelLayout {
        width: 2000.0,
        ground_y: GROUND_Y,
        ground_depth: 40.0,
        ground: vec![[0.0, 2000.0]],
        platforms: Vec::new(),
        blocks: Vec::new(),
        enemies: Vec::new(),
        kill_zones: Vec::new(),
        player_start: Vec2::new(player_x, GROUND_Y),
        goal_x: 1950.0,
    }
}

fn idle() -> PlayerIntent {
    PlayerIntent::default()
}

fn run_for(level: &mut Level, frames: usize, intent: PlayerIntent) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..frames {
        events.extend(level.step(DT, intent));
    }
    events
}

fn make_fire(level: &mut Level) {
    let (player, _, physics) = level.parts_mut();
    player.grow(physics);
    player.become_fire(physics);
    assert_eq!(player.tier(), Tier::Fire);
}

#[test]
fn jumping_into_block_spawns_one_item() {
    let mut layout = flat_layout(100.0);
    // Block bottom sits 40 px above the small player's head.
    let block_center = Vec2::new(100.0, GROUND_Y - 32.0 - 40.0 - 16.0);
    layout.blocks.push(block_center);
    let mut level = Level::new(&SimConfig::default(), &layout);

    run_for(&mut level, 30, idle());
    assert!(level.player().can_jump(), "player should have settled on the ground");

    let jump = PlayerIntent { jump: true, ..idle() };
    let mut spawned = None;
    for _ in 0..60 {
        for event in level.step(DT, jump) {
            if let GameEvent::ItemSpawned { item, kind, at } = event {
                assert!(spawned.is_none(), "only one item may spawn");
                assert_eq!(kind, ItemKind::Mushroom);
                assert!((at - block_center).length() < 1e-3);
                spawned = Some(item);
                let item = level.scene().item(item).unwrap();
                assert!(item.is_spawning());
                assert!((item.position() - block_center).length() < 1e-3);
            }
        }
    }
    assert!(spawned.is_some(), "head strike should spawn an item");

    // Land, jump again: the block is empty now.
    let events = run_for(&mut level, 60, idle());
    assert!(!events.iter().any(|e| matches!(e, GameEvent::ItemSpawned { .. })));
    let events = run_for(&mut level, 60, jump);
    assert!(!events.iter().any(|e| matches!(e, GameEvent::ItemSpawned { .. })));
    assert_eq!(level.scene().items().len(), 1);
}

#[test]
fn goomba_turns_around_at_a_wall() {
    let mut layout = flat_layout(1500.0);
    layout.platforms.push(Rect::new(
        Vec2::new(100.0, GROUND_Y - 80.0),
        Vec2::new(132.0, GROUND_Y),
    ));
    layout.enemies.push(EnemySpawn {
        kind: EnemyKind::Goomba,
        feet: Vec2::new(250.0, GROUND_Y),
    });
    let mut level = Level::new(&SimConfig::default(), &layout);
    assert_eq!(level.scene().enemies()[0].direction(), -1.0);

    let mut flipped = false;
    for _ in 0..360 {
        level.step(DT, idle());
        let goomba = &level.scene().enemies()[0];
        assert!(
            goomba.bounds().min.x > 130.0,
            "goomba walked into the wall: {:?}",
            goomba.bounds()
        );
        if goomba.direction() > 0.0 {
            flipped = true;
            break;
        }
    }
    assert!(flipped, "goomba should reverse after hitting the wall");

    run_for(&mut level, 30, idle());
    let goomba = &level.scene().enemies()[0];
    assert_eq!(goomba.state(), EnemyState::Walking);
    assert!(
        (goomba.velocity().x - 1.5).abs() < 1e-3,
        "should walk right at 1.5, vx = {}",
        goomba.velocity().x
    );
}

#[test]
fn falling_player_stomps_one_of_two_goombas() {
    // Two goombas a pixel apart walk left under a player dropped from 120 px.
    // They drift about 21 px before the player's feet reach their heads, so
    // the player lands across the gap with both stomp boxes under it.
    let mut layout = flat_layout(215.0);
    layout.player_start = Vec2::new(215.0, GROUND_Y - 120.0);
    for x in [220.0, 253.0] {
        layout.enemies.push(EnemySpawn {
            kind: EnemyKind::Goomba,
            feet: Vec2::new(x, GROUND_Y),
        });
    }
    let mut level = Level::new(&SimConfig::default(), &layout);

    let mut stomp_frame = None;
    for frame in 0..90 {
        let events = level.step(DT, idle());
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, GameEvent::PlayerDamaged { .. } | GameEvent::PlayerDied { .. })),
            "landing should not hurt: {:?}",
            events
        );
        let stomps = events
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyStomped { .. }))
            .count();
        if stomps > 0 {
            assert_eq!(stomps, 1, "one resolution per frame");
            stomp_frame = Some(frame);
            break;
        }
    }
    assert!(stomp_frame.is_some(), "player should land on a goomba");
    assert!(level.player().velocity().y < 0.0, "bounce: vy = {}", level.player().velocity().y);
    assert!(!level.cooldown().is_ready());

    // Inside the cooldown window the neighbour stays untouched.
    let events = run_for(&mut level, 25, idle());
    assert!(
        !events.iter().any(|e| matches!(
            e,
            GameEvent::EnemyStomped { .. } | GameEvent::PlayerDamaged { .. } | GameEvent::PlayerDied { .. }
        )),
        "cooldown should hold: {:?}",
        events
    );
    let states: Vec<EnemyState> = level.scene().enemies().iter().map(|e| e.state()).collect();
    assert_eq!(
        states.iter().filter(|s| **s == EnemyState::Stomped).count(),
        1,
        "{:?}",
        states
    );
    assert_eq!(
        states.iter().filter(|s| **s == EnemyState::Walking).count(),
        1,
        "{:?}",
        states
    );
    assert!(!level.player().is_dead());
}

#[test]
fn fire_player_hit_by_goomba_drops_to_big_once() {
    let mut layout = flat_layout(100.0);
    layout.enemies.push(EnemySpawn {
        kind: EnemyKind::Goomba,
        feet: Vec2::new(260.0, GROUND_Y),
    });
    let mut level = Level::new(&SimConfig::default(), &layout);
    make_fire(&mut level);

    let mut hit = false;
    for _ in 0..600 {
        let events = level.step(DT, idle());
        if events.contains(&GameEvent::PlayerDamaged { tier: Tier::Big }) {
            hit = true;
            break;
        }
    }
    assert!(hit, "goomba should reach the player");
    assert_eq!(level.player().tier(), Tier::Big);
    assert!(level.player().is_invulnerable());

    let events = run_for(&mut level, 60, idle());
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, GameEvent::PlayerDamaged { .. } | GameEvent::PlayerDied { .. })),
        "no further damage while invulnerable: {:?}",
        events
    );
    assert_eq!(level.player().tier(), Tier::Big);
}

#[test]
fn fireball_burns_idle_shell() {
    let mut layout = flat_layout(100.0);
    layout.enemies.push(EnemySpawn {
        kind: EnemyKind::Koopa,
        feet: Vec2::new(400.0, GROUND_Y),
    });
    let mut level = Level::new(&SimConfig::default(), &layout);
    make_fire(&mut level);
    let koopa = {
        let (_, scene, physics) = level.parts_mut();
        let koopa = &mut scene.enemies_mut()[0];
        assert!(koopa.stomp(physics));
        assert!(koopa.is_idle_shell());
        koopa.id()
    };

    let throw = PlayerIntent { throw: true, ..idle() };
    let events = level.step(DT, throw);
    let fireball = events
        .iter()
        .find_map(|e| match e {
            GameEvent::FireballThrown { fireball, direction } => {
                assert_eq!(*direction, 1.0);
                Some(*fireball)
            }
            _ => None,
        })
        .expect("fire player should throw");

    let mut burned = false;
    for _ in 0..180 {
        let events = level.step(DT, idle());
        if events.contains(&GameEvent::EnemyBurned { enemy: koopa, fireball }) {
            burned = true;
            break;
        }
    }
    assert!(burned, "fireball should reach the shell");
    assert_eq!(level.scene().enemy(koopa).unwrap().state(), EnemyState::ShellDying);
    assert!(
        level
            .scene()
            .fireballs()
            .iter()
            .all(|f| f.id() != fireball || !f.is_alive()),
        "fireball must be spent after the hit"
    );

    run_for(&mut level, 90, idle());
    assert!(level.scene().enemy(koopa).is_none(), "dead shell is collected");
}

#[test]
fn kicked_shell_slides_away() {
    let mut layout = flat_layout(100.0);
    layout.enemies.push(EnemySpawn {
        kind: EnemyKind::Koopa,
        feet: Vec2::new(200.0, GROUND_Y),
    });
    let mut level = Level::new(&SimConfig::default(), &layout);
    let koopa = {
        let (_, scene, physics) = level.parts_mut();
        scene.enemies_mut()[0].stomp(physics);
        scene.enemies_mut()[0].id()
    };

    let right = PlayerIntent { right: true, ..idle() };
    let mut kicked = false;
    for _ in 0..180 {
        let events = level.step(DT, right);
        if events
            .iter()
            .any(|e| matches!(e, GameEvent::ShellKicked { enemy, direction } if *enemy == koopa && *direction > 0.0))
        {
            kicked = true;
            break;
        }
        assert!(!level.player().is_dead());
    }
    assert!(kicked, "walking into an idle shell kicks it");
    assert!(!level.cooldown().is_ready());

    run_for(&mut level, 20, idle());
    let shell = level.scene().enemy(koopa).unwrap();
    assert_eq!(shell.state(), EnemyState::ShellMoving);
    assert!(shell.position().x > 240.0, "shell at {}", shell.position().x);
}

#[test]
fn mushroom_rises_then_drifts_and_grows_player() {
    let mut level = Level::new(&SimConfig::default(), &flat_layout(300.0));
    let spawn_at = Vec2::new(150.0, GROUND_Y - 16.0);
    let id = level.spawn_item(ItemKind::Mushroom, spawn_at.x, spawn_at.y);

    // 32 px at 30 px/s
    run_for(&mut level, 70, idle());
    let item = level.scene().item(id).unwrap();
    assert!(!item.is_spawning());
    assert!(item.has_body());

    let mut grew = false;
    for _ in 0..300 {
        let events = level.step(DT, idle());
        if events.iter().any(|e| matches!(e, GameEvent::ItemCollected { tier: Tier::Big, .. })) {
            grew = true;
            break;
        }
    }
    assert!(grew, "drifting mushroom should reach the player");
    assert_eq!(level.player().tier(), Tier::Big);
    assert!(level.scene().item(id).is_none());
}
