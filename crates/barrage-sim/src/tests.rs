//! Tests for the match engine: determinism, turn resolution, skills, items,
//! the computer opponent, and the deferred-action guards.

use barrage_core::commands::PlayerCommand;
use barrage_core::constants::*;
use barrage_core::enums::*;
use barrage_core::events::GameEvent;
use barrage_core::state::MatchSnapshot;
use barrage_core::types::Position;

use crate::engine::{MatchConfig, MatchEngine};
use crate::match_setup;

const FIELD_W: f64 = 1280.0;
const FIELD_H: f64 = 720.0;

fn engine_with_seed(seed: u64) -> MatchEngine {
    MatchEngine::new(MatchConfig { seed })
}

fn start(engine: &mut MatchEngine, mode: GameMode) -> MatchSnapshot {
    engine.queue_command(PlayerCommand::StartMatch {
        width: FIELD_W,
        height: FIELD_H,
        mode,
        classes: [TankClass::Standard; 2],
    });
    engine.tick()
}

/// A short, safe shot: fired flat at low power it buries itself in nearby
/// ground (or drifts out of bounds) without reaching the enemy.
fn throwaway_fire(engine: &mut MatchEngine, player: PlayerId) {
    engine.queue_command(PlayerCommand::Fire {
        player,
        angle: 0.0,
        power: 20.0,
    });
}

fn resolved(snap: &MatchSnapshot) -> bool {
    snap.shell.is_none() && snap.stage == TurnStage::Aiming
}

/// Tick until the in-flight shell resolves, collecting every event seen.
fn run_until_resolved(engine: &mut MatchEngine, max_ticks: u32) -> (bool, Vec<GameEvent>) {
    let mut events = Vec::new();
    for _ in 0..max_ticks {
        let snap = engine.tick();
        events.extend(snap.events.iter().cloned());
        if resolved(&snap) {
            return (true, events);
        }
    }
    (false, events)
}

/// Tick `n` times, collecting every event seen.
fn run_ticks(engine: &mut MatchEngine, n: u32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..n {
        let snap = engine.tick();
        events.extend(snap.events.iter().cloned());
    }
    events
}

/// Drop a zero-velocity shell right on a tank's hull (for hit resolution
/// tests that must not depend on aim).
fn plant_shell_on(engine: &mut MatchEngine, target: PlayerId, owner: PlayerId, is_double: bool) {
    let snap = engine.tick();
    let view = snap
        .tanks
        .iter()
        .find(|t| t.player == target)
        .expect("target tank view");
    let pos = Position::new(view.x, view.y);
    match_setup::spawn_shell(engine.world_mut(), pos, 0.0, 0.0, owner, 1.0, is_double);
}

// ---- Menu and setup ----

#[test]
fn test_menu_snapshot_before_start() {
    let mut engine = engine_with_seed(1);
    let snap = engine.tick();

    assert_eq!(snap.phase, MatchPhase::Menu);
    assert!(snap.terrain.is_empty());
    assert!(snap.tanks.is_empty());
    assert!(snap.shell.is_none());
    assert_eq!(snap.time.tick, 0, "time stands still in the menu");
}

#[test]
fn test_start_match_spawns_tanks_on_terrain() {
    let mut engine = engine_with_seed(2);
    let snap = start(&mut engine, GameMode::Pvp);

    assert_eq!(snap.phase, MatchPhase::Active);
    assert_eq!(snap.stage, TurnStage::Aiming);
    assert_eq!(snap.current_player, PlayerId::One);
    assert_eq!(snap.turn_count, 0);
    assert_eq!(snap.terrain.len(), FIELD_W as usize);

    assert_eq!(snap.tanks.len(), 2);
    assert_eq!(snap.tanks[0].player, PlayerId::One);
    assert_eq!(snap.tanks[1].player, PlayerId::Two);

    // Spawn fractions, with slack for first-tick slope slide.
    assert!((snap.tanks[0].x - FIELD_W * TANK_SPAWN_FRAC_P1).abs() < 35.0);
    assert!((snap.tanks[1].x - FIELD_W * TANK_SPAWN_FRAC_P2).abs() < 35.0);

    // Tanks rest on the ground near their column's height (slope slide can
    // shift the column between the snap and the sample).
    for tank in &snap.tanks {
        let ground = snap.terrain[tank.x as usize];
        assert!(
            (tank.y + tank.height / 2.0 - ground).abs() < 20.0,
            "tank {:?} should rest on the terrain",
            tank.player
        );
    }
}

#[test]
fn test_start_match_pve_applies_npc_profile() {
    let mut engine = engine_with_seed(3);
    start(&mut engine, GameMode::Pve);

    let npc = engine.tank(PlayerId::Two).unwrap();
    assert_eq!(npc.health, 100.0, "level 1 computer has base health");
    assert_eq!(npc.accuracy, 18.0, "level 1 aim error is 18 degrees");
    assert!((npc.power_mult - 1.1).abs() < 1e-12);

    let human = engine.tank(PlayerId::One).unwrap();
    assert_eq!(human.accuracy, 0.0, "humans have no injected aim error");
}

#[test]
fn test_return_to_menu_resets() {
    let mut engine = engine_with_seed(4);
    start(&mut engine, GameMode::Pvp);

    engine.queue_command(PlayerCommand::ReturnToMenu);
    let snap = engine.tick();

    assert_eq!(snap.phase, MatchPhase::Menu);
    assert!(snap.terrain.is_empty());
    assert!(snap.tanks.is_empty());
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = engine_with_seed(12345);
    let mut engine_b = engine_with_seed(12345);

    start(&mut engine_a, GameMode::Pve);
    start(&mut engine_b, GameMode::Pve);
    throwaway_fire(&mut engine_a, PlayerId::One);
    throwaway_fire(&mut engine_b, PlayerId::One);

    for tick in 0..400 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "snapshots diverged at tick {tick}");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = engine_with_seed(111);
    let mut engine_b = engine_with_seed(222);

    start(&mut engine_a, GameMode::Pvp);
    start(&mut engine_b, GameMode::Pvp);

    let mut diverged = false;
    for _ in 0..50 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "different seeds should produce different terrain");
}

#[test]
fn test_shell_trajectory_reproducible() {
    let mut engine_a = engine_with_seed(77);
    let mut engine_b = engine_with_seed(77);
    start(&mut engine_a, GameMode::Pve);
    start(&mut engine_b, GameMode::Pve);
    engine_a.set_wind(0.03);
    engine_b.set_wind(0.03);

    let fire = PlayerCommand::Fire {
        player: PlayerId::One,
        angle: -0.9,
        power: 90.0,
    };
    engine_a.queue_command(fire.clone());
    engine_b.queue_command(fire);

    for tick in 0..80 {
        let shell_a = engine_a.tick().shell;
        let shell_b = engine_b.tick().shell;
        match (shell_a, shell_b) {
            (Some(a), Some(b)) => {
                assert_eq!(a.x, b.x, "x diverged at tick {tick}");
                assert_eq!(a.y, b.y, "y diverged at tick {tick}");
                assert_eq!(a.vx, b.vx, "vx diverged at tick {tick}");
                assert_eq!(a.vy, b.vy, "vy diverged at tick {tick}");
            }
            (None, None) => {}
            _ => panic!("shell lifetime diverged at tick {tick}"),
        }
    }
}

// ---- Firing rules ----

#[test]
fn test_single_shell_invariant() {
    let mut engine = engine_with_seed(6);
    start(&mut engine, GameMode::Pvp);

    // Two fire commands in one tick: only the first takes.
    engine.queue_command(PlayerCommand::Fire {
        player: PlayerId::One,
        angle: -std::f64::consts::FRAC_PI_2,
        power: 20.0,
    });
    engine.queue_command(PlayerCommand::Fire {
        player: PlayerId::One,
        angle: 1.0,
        power: 99.0,
    });
    let snap = engine.tick();

    let shell = snap.shell.expect("one shell in flight");
    assert_eq!(shell.owner, PlayerId::One);
    assert_eq!(snap.stage, TurnStage::InFlight);
    assert_eq!(snap.last_fire[0].power, 20.0, "second fire must not register");

    // Firing (or moving) mid-flight changes nothing.
    engine.queue_command(PlayerCommand::Fire {
        player: PlayerId::One,
        angle: 1.0,
        power: 99.0,
    });
    for _ in 0..5 {
        engine.queue_command(PlayerCommand::Move {
            player: PlayerId::One,
            direction: MoveDir::Right,
        });
    }
    let snap = engine.tick();
    assert!(snap.shell.is_some());
    assert_eq!(snap.last_fire[0].power, 20.0);
    assert_eq!(snap.tanks[0].fuel, 300.0, "movement is ignored mid-flight");

    // The vertical lob eventually comes down and resolves.
    let (done, events) = run_until_resolved(&mut engine, 300);
    assert!(done, "lob should resolve");
    assert!(
        events.iter().any(|e| matches!(e, GameEvent::Smoke { .. })),
        "shells leave a smoke trail"
    );
}

#[test]
fn test_fire_out_of_turn_ignored() {
    let mut engine = engine_with_seed(7);
    start(&mut engine, GameMode::Pvp);

    throwaway_fire(&mut engine, PlayerId::Two);
    let snap = engine.tick();
    assert!(snap.shell.is_none(), "player 2 cannot fire on player 1's turn");
    assert_eq!(snap.stage, TurnStage::Aiming);
}

#[test]
fn test_fire_power_validation() {
    let mut engine = engine_with_seed(8);
    start(&mut engine, GameMode::Pvp);

    engine.queue_command(PlayerCommand::Fire {
        player: PlayerId::One,
        angle: 0.0,
        power: 0.0,
    });
    let snap = engine.tick();
    assert!(snap.shell.is_none(), "zero power is rejected");

    // Straight up so terrain cannot catch the shell before the snapshot.
    engine.queue_command(PlayerCommand::Fire {
        player: PlayerId::One,
        angle: -std::f64::consts::FRAC_PI_2,
        power: 500.0,
    });
    let snap = engine.tick();
    let shell = snap.shell.expect("clamped shot still fires");
    // Muzzle speed reflects the clamped power (plus one tick of gravity),
    // not the raw request.
    let expected = -(MAX_FIRE_POWER / POWER_DIVISOR) + GRAVITY;
    assert!(
        (shell.vy - expected).abs() < 1e-9,
        "power should clamp to {MAX_FIRE_POWER}: vy {} vs {expected}",
        shell.vy
    );
}

#[test]
fn test_recoil_pushes_hull_back() {
    let mut engine = engine_with_seed(9);
    start(&mut engine, GameMode::Pve);
    let before = engine.tick().tanks[0].x;

    engine.queue_command(PlayerCommand::Fire {
        player: PlayerId::One,
        angle: 0.0,
        power: 100.0,
    });
    let snap = engine.tick();

    let recoil = 100.0 * RECOIL_FACTOR;
    assert!(
        (snap.tanks[0].x - (before - recoil)).abs() < 3.0,
        "firing right at power 100 should push the hull ~{recoil} px left"
    );
}

#[test]
fn test_last_fire_recorded() {
    let mut engine = engine_with_seed(10);
    start(&mut engine, GameMode::Pvp);

    engine.queue_command(PlayerCommand::Fire {
        player: PlayerId::One,
        angle: -0.7,
        power: 80.0,
    });
    let snap = engine.tick();
    assert_eq!(snap.last_fire[0].angle, -0.7);
    assert_eq!(snap.last_fire[0].power, 80.0);
    // Player 2's default stays untouched.
    assert_eq!(snap.last_fire[1].angle, std::f64::consts::PI);
}

// ---- Turn resolution ----

#[test]
fn test_turn_alternation() {
    let mut engine = engine_with_seed(11);
    start(&mut engine, GameMode::Pvp);

    for n in 1..=4u32 {
        let player = if n % 2 == 1 {
            PlayerId::One
        } else {
            PlayerId::Two
        };
        throwaway_fire(&mut engine, player);
        let (done, _) = run_until_resolved(&mut engine, 500);
        assert!(done, "shot {n} should resolve");

        // After N resolved shots: ((initial + N - 1) mod 2) + 1.
        let expected = ((1 + n - 1) % 2) + 1;
        let snap = engine.tick();
        assert_eq!(
            snap.current_player.number(),
            expected as u8,
            "after {n} resolved shots"
        );
        assert_eq!(snap.turn_count, n);
    }
}

#[test]
fn test_out_of_bounds_passes_turn_without_effects() {
    let mut engine = engine_with_seed(12);
    start(&mut engine, GameMode::Pvp);

    // Dead-level ground so the exiting shell cannot clip a slope.
    engine.set_terrain(barrage_terrain::TerrainField::new(
        vec![600.0; FIELD_W as usize],
        FIELD_H,
    ));
    run_ticks(&mut engine, 120); // let the tanks settle onto the new floor
    let terrain_before = engine.tick().terrain.clone();

    // Straight left at full power: out of the field within a few ticks.
    engine.queue_command(PlayerCommand::Fire {
        player: PlayerId::One,
        angle: std::f64::consts::PI,
        power: 100.0,
    });
    let (done, events) = run_until_resolved(&mut engine, 60);
    assert!(done, "shot should leave the field quickly");

    assert!(
        !events.iter().any(|e| matches!(e, GameEvent::Explosion { .. })),
        "no explosion for an out-of-bounds shell"
    );
    assert!(!events.iter().any(|e| matches!(e, GameEvent::TankHit { .. })));
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::TurnChange { .. }))
            .count(),
        1
    );

    let snap = engine.tick();
    assert_eq!(snap.current_player, PlayerId::Two);
    assert_eq!(snap.terrain, terrain_before, "terrain untouched");
}

#[test]
fn test_terrain_impact_craters_monotonically() {
    let mut engine = engine_with_seed(13);
    start(&mut engine, GameMode::Pve); // level 1: flat, guaranteed ground hit
    let before = engine.tick().terrain.clone();

    throwaway_fire(&mut engine, PlayerId::One);
    let (done, events) = run_until_resolved(&mut engine, 300);
    assert!(done);
    assert!(
        events.iter().any(|e| matches!(e, GameEvent::Explosion { .. })),
        "ground impact should explode"
    );

    let after = engine.tick().terrain;
    let changed: Vec<usize> = (0..before.len())
        .filter(|&i| (after[i] - before[i]).abs() > 1e-9)
        .collect();

    assert!(!changed.is_empty(), "impact should carve a crater");
    for &i in &changed {
        assert!(after[i] > before[i], "column {i} healed upward");
    }
    // The crater spans at most the blast diameter.
    let span = changed.last().unwrap() - changed.first().unwrap();
    assert!(
        span as f64 <= CRATER_RADIUS * 2.0 + 1.0,
        "crater span {span} exceeds the blast diameter"
    );
}

// ---- Hits, shields, damage ----

#[test]
fn test_tank_hit_damage_in_range() {
    let mut engine = engine_with_seed(14);
    start(&mut engine, GameMode::Pvp);
    let before = engine.tick().tanks[1].health;

    plant_shell_on(&mut engine, PlayerId::Two, PlayerId::One, false);
    let events = run_ticks(&mut engine, 3);

    let after = engine.tick().tanks[1].health;
    let delta = before - after;
    assert!(
        (DAMAGE_BASE as f64..(DAMAGE_BASE + DAMAGE_SPREAD) as f64).contains(&delta),
        "base damage should roll in [25, 45): got {delta}"
    );

    let hit = events
        .iter()
        .find_map(|e| match e {
            GameEvent::TankHit {
                damage, shielded, ..
            } => Some((*damage, *shielded)),
            _ => None,
        })
        .expect("hit event");
    assert_eq!(hit.0, delta);
    assert!(!hit.1);
    assert!(events.iter().any(|e| matches!(e, GameEvent::Explosion { .. })));
}

#[test]
fn test_double_shot_doubles_damage() {
    let mut engine = engine_with_seed(15);
    start(&mut engine, GameMode::Pvp);
    engine.set_tank_health(PlayerId::Two, 200.0);
    let before = 200.0;

    plant_shell_on(&mut engine, PlayerId::Two, PlayerId::One, true);
    run_ticks(&mut engine, 3);

    let after = engine.tank(PlayerId::Two).unwrap().health;
    let delta = before - after;
    let lo = (DAMAGE_BASE * 2) as f64;
    let hi = ((DAMAGE_BASE + DAMAGE_SPREAD) * 2) as f64;
    assert!(
        (lo..hi).contains(&delta),
        "double shot should roll in [{lo}, {hi}): got {delta}"
    );
}

#[test]
fn test_health_floors_at_zero_and_pvp_game_over() {
    let mut engine = engine_with_seed(16);
    start(&mut engine, GameMode::Pvp);
    engine.set_tank_health(PlayerId::Two, 1.0);

    plant_shell_on(&mut engine, PlayerId::Two, PlayerId::One, false);
    let events = run_ticks(&mut engine, 3);

    let snap = engine.tick();
    assert_eq!(snap.tanks[1].health, 0.0, "health floors at exactly zero");
    assert_eq!(snap.phase, MatchPhase::GameOver);
    assert_eq!(snap.winner, Some(PlayerId::One));

    let game_over = events.iter().find_map(|e| match e {
        GameEvent::GameOver { winner, level, .. } => Some((*winner, *level)),
        _ => None,
    });
    assert_eq!(game_over, Some((PlayerId::One, 1)));

    // The dead match ignores further commands.
    throwaway_fire(&mut engine, PlayerId::One);
    let snap = engine.tick();
    assert!(snap.shell.is_none());
    assert_eq!(snap.phase, MatchPhase::GameOver);
}

#[test]
fn test_shield_negates_exactly_one_hit() {
    let mut engine = engine_with_seed(17);
    start(&mut engine, GameMode::Pvp);

    // Hand the turn to player 2 so they may raise the shield.
    throwaway_fire(&mut engine, PlayerId::One);
    let (done, _) = run_until_resolved(&mut engine, 500);
    assert!(done);

    engine.queue_command(PlayerCommand::UseSkill {
        player: PlayerId::Two,
        skill: Skill::Shield,
    });
    let snap = engine.tick();
    assert!(snap.tanks[1].shield, "shield should be up");
    let health = snap.tanks[1].health;

    // First hit: fully negated, shield consumed.
    plant_shell_on(&mut engine, PlayerId::Two, PlayerId::One, false);
    let events = run_ticks(&mut engine, 3);
    let snap = engine.tick();
    assert_eq!(snap.tanks[1].health, health, "shielded hit deals no damage");
    assert!(!snap.tanks[1].shield, "shield is consumed by the block");
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::TankHit {
            shielded: true,
            ..
        }
    )));

    // Second hit: damage lands.
    plant_shell_on(&mut engine, PlayerId::Two, PlayerId::One, false);
    run_ticks(&mut engine, 3);
    assert!(
        engine.tank(PlayerId::Two).unwrap().health < health,
        "second hit must damage"
    );
}

// ---- Skills ----

#[test]
fn test_skill_cooldown_blocks_reactivation() {
    let mut engine = engine_with_seed(18);
    start(&mut engine, GameMode::Pvp);

    engine.queue_command(PlayerCommand::UseSkill {
        player: PlayerId::One,
        skill: Skill::Shield,
    });
    engine.queue_command(PlayerCommand::UseSkill {
        player: PlayerId::One,
        skill: Skill::Shield,
    });
    let snap = engine.tick();

    assert!(snap.tanks[0].shield);
    assert_eq!(snap.tanks[0].cooldowns.shield, SHIELD_COOLDOWN_TURNS);
    let activations = snap
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::SkillActivated { .. }))
        .count();
    assert_eq!(activations, 1, "second activation is silently dropped");
}

#[test]
fn test_skill_out_of_turn_ignored() {
    let mut engine = engine_with_seed(19);
    start(&mut engine, GameMode::Pvp);

    engine.queue_command(PlayerCommand::UseSkill {
        player: PlayerId::Two,
        skill: Skill::DoubleShot,
    });
    let snap = engine.tick();
    assert!(!snap.tanks[1].double_shot, "not player 2's turn yet");
}

#[test]
fn test_cooldowns_tick_down_at_turn_start() {
    let mut engine = engine_with_seed(20);
    start(&mut engine, GameMode::Pvp);

    engine.queue_command(PlayerCommand::UseSkill {
        player: PlayerId::One,
        skill: Skill::Shield,
    });
    engine.tick();

    // One full round: player 1 shoots, then player 2 shoots.
    throwaway_fire(&mut engine, PlayerId::One);
    let (done, _) = run_until_resolved(&mut engine, 500);
    assert!(done);
    assert_eq!(
        engine.tank(PlayerId::One).unwrap().cooldowns.shield,
        SHIELD_COOLDOWN_TURNS,
        "cooldown holds until the owner's own turn starts"
    );

    throwaway_fire(&mut engine, PlayerId::Two);
    let (done, _) = run_until_resolved(&mut engine, 500);
    assert!(done);
    assert_eq!(
        engine.tank(PlayerId::One).unwrap().cooldowns.shield,
        SHIELD_COOLDOWN_TURNS - 1,
        "cooldown ticks when the turn comes back around"
    );
}

#[test]
fn test_double_shot_skill_arms_next_shell() {
    let mut engine = engine_with_seed(21);
    start(&mut engine, GameMode::Pvp);

    engine.queue_command(PlayerCommand::UseSkill {
        player: PlayerId::One,
        skill: Skill::DoubleShot,
    });
    engine.tick();
    assert!(engine.tank(PlayerId::One).unwrap().double_shot);

    throwaway_fire(&mut engine, PlayerId::One);
    let snap = engine.tick();
    let shell = snap.shell.expect("shell in flight");
    assert!(shell.is_double);
    assert_eq!(shell.radius, DOUBLE_SHELL_RADIUS);
    assert!(
        !snap.tanks[0].double_shot,
        "the charge is consumed by firing"
    );
}

// ---- Movement ----

#[test]
fn test_move_consumes_fuel() {
    let mut engine = engine_with_seed(22);
    start(&mut engine, GameMode::Pve);
    let before = engine.tick();

    for _ in 0..5 {
        engine.queue_command(PlayerCommand::Move {
            player: PlayerId::One,
            direction: MoveDir::Right,
        });
    }
    let snap = engine.tick();

    assert_eq!(snap.tanks[0].fuel, 300.0 - 5.0 * TANK_MOVE_FUEL_COST);
    assert!(
        (snap.tanks[0].x - (before.tanks[0].x + 5.0 * TANK_MOVE_STEP)).abs() < 2.0,
        "five steps right should move ~{} px",
        5.0 * TANK_MOVE_STEP
    );
}

#[test]
fn test_move_without_fuel_is_ignored() {
    let mut engine = engine_with_seed(23);
    start(&mut engine, GameMode::Pve);

    // 160 steps, but only 150 tanks of fuel worth.
    for _ in 0..160 {
        engine.queue_command(PlayerCommand::Move {
            player: PlayerId::One,
            direction: MoveDir::Right,
        });
    }
    let snap = engine.tick();

    assert_eq!(snap.tanks[0].fuel, 0.0, "fuel drains to exactly zero");
    let expected_x = FIELD_W * TANK_SPAWN_FRAC_P1 + 150.0 * TANK_MOVE_STEP;
    assert!(
        (snap.tanks[0].x - expected_x).abs() < 3.0,
        "movement stops once the tank runs dry: {} vs {expected_x}",
        snap.tanks[0].x
    );
}

#[test]
fn test_jump_gates_on_ground_contact() {
    let mut engine = engine_with_seed(24);
    start(&mut engine, GameMode::Pve);

    engine.queue_command(PlayerCommand::Jump {
        player: PlayerId::One,
    });
    engine.tick();
    let tank = engine.tank(PlayerId::One).unwrap();
    assert!(!tank.on_ground);
    assert!(
        (tank.vy - (TANK_JUMP_VELOCITY + GRAVITY)).abs() < 1e-9,
        "jump velocity plus one tick of gravity"
    );

    // A second jump mid-air is ignored: velocity keeps decaying.
    engine.queue_command(PlayerCommand::Jump {
        player: PlayerId::One,
    });
    engine.tick();
    let tank = engine.tank(PlayerId::One).unwrap();
    assert!(
        (tank.vy - (TANK_JUMP_VELOCITY + 2.0 * GRAVITY)).abs() < 1e-9,
        "air jump must not reset vertical velocity"
    );
}

#[test]
fn test_tank_settles_into_fresh_crater() {
    let mut engine = engine_with_seed(25);
    start(&mut engine, GameMode::Pve);
    let snap = engine.tick();
    let x = snap.tanks[0].x;
    let old_ground = snap.terrain[x as usize];

    // Blow a crater right under player 1.
    if let Some(terrain) = engine.terrain_mut() {
        terrain.deform(x, old_ground + 10.0, CRATER_RADIUS);
    }
    run_ticks(&mut engine, 80);

    let snap = engine.tick();
    let tank = &snap.tanks[0];
    let new_ground = snap.terrain[tank.x as usize];
    assert!(new_ground > old_ground, "crater should lower the ground");
    assert!(tank.on_ground, "tank should have settled");
    assert!(
        (tank.y + tank.height / 2.0 - new_ground).abs() < 2.0,
        "tank rests on the crater floor"
    );
}

// ---- Items ----

#[test]
fn test_fuel_item_refills_tank() {
    let mut engine = engine_with_seed(26);
    start(&mut engine, GameMode::Pve);

    for _ in 0..10 {
        engine.queue_command(PlayerCommand::Move {
            player: PlayerId::One,
            direction: MoveDir::Left,
        });
    }
    engine.tick();
    let tank = engine.tank(PlayerId::One).unwrap();
    assert!(tank.fuel < tank.max_fuel);

    let x = {
        let snap = engine.tick();
        snap.tanks[0].x
    };
    match_setup::spawn_item(engine.world_mut(), ItemKind::Fuel, x);
    let events = run_ticks(&mut engine, 300);

    assert!(
        events
            .iter()
            .any(|e| matches!(e, GameEvent::ItemCollected { kind: ItemKind::Fuel, .. })),
        "crate should land on the tank and be collected"
    );
    let tank = engine.tank(PlayerId::One).unwrap();
    assert_eq!(tank.fuel, tank.max_fuel);
}

#[test]
fn test_health_item_heals_with_cap() {
    let mut engine = engine_with_seed(27);
    start(&mut engine, GameMode::Pve);
    engine.set_tank_health(PlayerId::One, 90.0);

    let x = engine.tick().tanks[0].x;
    match_setup::spawn_item(engine.world_mut(), ItemKind::Health, x);
    run_ticks(&mut engine, 300);

    assert_eq!(
        engine.tank(PlayerId::One).unwrap().health,
        100.0,
        "healing caps at max health"
    );
}

#[test]
fn test_power_item_arms_double_shot() {
    let mut engine = engine_with_seed(28);
    start(&mut engine, GameMode::Pve);

    let x = engine.tick().tanks[0].x;
    match_setup::spawn_item(engine.world_mut(), ItemKind::Power, x);
    run_ticks(&mut engine, 300);

    assert!(engine.tank(PlayerId::One).unwrap().double_shot);
}

#[test]
fn test_items_spawn_across_turns() {
    let mut engine = engine_with_seed(29);
    start(&mut engine, GameMode::Pvp);

    let mut all_events = Vec::new();
    for n in 1..=12u32 {
        let player = if n % 2 == 1 {
            PlayerId::One
        } else {
            PlayerId::Two
        };
        throwaway_fire(&mut engine, player);
        let (done, events) = run_until_resolved(&mut engine, 500);
        assert!(done);
        all_events.extend(events);
    }

    assert!(
        all_events
            .iter()
            .any(|e| matches!(e, GameEvent::ItemSpawned { .. })),
        "a 40% per-turn roll should drop something within 12 turns"
    );
}

// ---- Wind ----

#[test]
fn test_wind_bounds_and_resample_cadence() {
    let mut engine = engine_with_seed(30);
    start(&mut engine, GameMode::Pvp);

    let mut all_events = Vec::new();
    for n in 1..=9u32 {
        let player = if n % 2 == 1 {
            PlayerId::One
        } else {
            PlayerId::Two
        };
        throwaway_fire(&mut engine, player);
        let (done, events) = run_until_resolved(&mut engine, 500);
        assert!(done);
        all_events.extend(events);
        assert!(engine.wind().abs() <= WIND_MAX);
    }

    // The match-start resample happened before collection began; within
    // these nine turns the wind shifts on turns 3, 6 and 9 only.
    let shifts = all_events
        .iter()
        .filter(|e| matches!(e, GameEvent::WindShift { .. }))
        .count();
    assert_eq!(shifts, 3, "wind resamples on turns 3, 6 and 9");
}

// ---- Computer opponent ----

#[test]
fn test_npc_takes_its_turn_and_fires() {
    let mut engine = engine_with_seed(31);
    start(&mut engine, GameMode::Pve);

    throwaway_fire(&mut engine, PlayerId::One);
    let (done, _) = run_until_resolved(&mut engine, 500);
    assert!(done);
    let snap = engine.tick();
    assert_eq!(snap.current_player, PlayerId::Two);

    // Turn delay + movement window + fire delay, with slack for flight.
    let events = run_ticks(&mut engine, 400);
    assert!(
        events
            .iter()
            .any(|e| matches!(e, GameEvent::ShotFired { player: PlayerId::Two })),
        "the computer should take its shot"
    );

    // Its shell resolves and the turn returns to the player.
    let mut back_to_player = false;
    for _ in 0..600 {
        let snap = engine.tick();
        if snap.phase != MatchPhase::Active {
            // A lucky shot ended the match; also a valid resolution.
            back_to_player = true;
            break;
        }
        if resolved(&snap) && snap.current_player == PlayerId::One {
            back_to_player = true;
            break;
        }
    }
    assert!(back_to_player, "turn should come back to player 1");
}

#[test]
fn test_stale_deferred_actions_never_fire() {
    let mut engine = engine_with_seed(32);
    start(&mut engine, GameMode::Pve);

    // Hand the computer its turn (its wake-up call is now scheduled) ...
    throwaway_fire(&mut engine, PlayerId::One);
    let (done, _) = run_until_resolved(&mut engine, 500);
    assert!(done);

    // ... then abandon the match before the timer lands.
    engine.queue_command(PlayerCommand::ReturnToMenu);
    engine.tick();
    start(&mut engine, GameMode::Pve);

    // In the fresh match it is player 1's turn; the old wake-up call must
    // not make the computer act.
    let events = run_ticks(&mut engine, 300);
    assert!(
        !events
            .iter()
            .any(|e| matches!(e, GameEvent::ShotFired { .. })),
        "a stale turn timer fired into the new match"
    );
    let snap = engine.tick();
    assert_eq!(snap.current_player, PlayerId::One);
    assert!(snap.shell.is_none());
}

// ---- PvE progression ----

#[test]
fn test_pve_player_win_advances_level() {
    let mut engine = engine_with_seed(33);
    start(&mut engine, GameMode::Pve);
    engine.set_tank_health(PlayerId::Two, 1.0);

    plant_shell_on(&mut engine, PlayerId::Two, PlayerId::One, false);
    let events = run_ticks(&mut engine, 3);

    assert!(
        events
            .iter()
            .any(|e| matches!(e, GameEvent::LevelAdvance { level: 2 })),
        "clearing level 1 should announce level 2"
    );
    assert!(
        !events.iter().any(|e| matches!(e, GameEvent::GameOver { .. })),
        "a cleared level is not a final game over"
    );
    let snap = engine.tick();
    assert_eq!(snap.phase, MatchPhase::GameOver);
    assert_eq!(snap.winner, Some(PlayerId::One));

    // After the intermission the next level begins.
    run_ticks(&mut engine, LEVEL_ADVANCE_DELAY_TICKS as u32 + 10);
    let snap = engine.tick();
    assert_eq!(snap.phase, MatchPhase::Active);
    assert_eq!(snap.npc_level, 2);
    assert_eq!(snap.score.levels_cleared, 1);
    assert!(snap.score.points >= 1000);

    let npc = engine.tank(PlayerId::Two).unwrap();
    assert_eq!(npc.health, 120.0, "level 2 computer is tougher");
    assert_eq!(npc.accuracy, 16.0, "level 2 computer aims better");
}

#[test]
fn test_pve_npc_win_is_final() {
    let mut engine = engine_with_seed(34);
    start(&mut engine, GameMode::Pve);
    engine.set_tank_health(PlayerId::One, 1.0);

    plant_shell_on(&mut engine, PlayerId::One, PlayerId::Two, false);
    let events = run_ticks(&mut engine, 3);

    let game_over = events.iter().find_map(|e| match e {
        GameEvent::GameOver { winner, level, .. } => Some((*winner, *level)),
        _ => None,
    });
    assert_eq!(game_over, Some((PlayerId::Two, 1)));

    // No level advance ever comes.
    run_ticks(&mut engine, 300);
    let snap = engine.tick();
    assert_eq!(snap.phase, MatchPhase::GameOver);
    assert_eq!(snap.npc_level, 1);
}

// ---- End-to-end ----

#[test]
fn test_flat_lob_resolves_within_two_hundred_ticks() {
    // PvE level 1: flat terrain, computer at 0.85 width with 18° accuracy.
    let mut engine = engine_with_seed(35);
    start(&mut engine, GameMode::Pve);
    engine.set_wind(0.0);

    // A 45° up-range lob at power 47 carries ~900 px — the gap between the
    // spawn fractions — so it comes down on or beside the computer.
    engine.queue_command(PlayerCommand::Fire {
        player: PlayerId::One,
        angle: -std::f64::consts::FRAC_PI_4,
        power: 47.0,
    });

    let (done, events) = run_until_resolved(&mut engine, 200);
    assert!(done, "the lob must resolve within 200 ticks");
    assert!(
        events.iter().any(|e| matches!(e, GameEvent::Explosion { .. })),
        "the lob should strike terrain or tank, not leave the field"
    );
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::TurnChange { .. }))
            .count(),
        1,
        "exactly one turn switch per resolved shot"
    );
    let snap = engine.tick();
    assert_eq!(snap.current_player, PlayerId::Two);
}
