//! Headless autoplay demo.
//!
//! Runs the match engine on its game-loop thread and drives it through the
//! public command interface: player 1 is piloted by mirroring the shot
//! search, so the binary exercises the full turn cycle (aiming, wind, items,
//! level progression) without a frontend.
//!
//! Usage: `barrage [pve|pvp] [seed]` — logging via `RUST_LOG=debug`.

mod game_loop;
mod state;

use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use barrage_ai::search::{apply_inaccuracy, plan_shot, AimContext};
use barrage_core::commands::PlayerCommand;
use barrage_core::enums::{GameMode, MatchPhase, PlayerId, TankClass, TurnStage};
use barrage_core::rankings::{RankingBoard, RankingEntry};
use barrage_core::state::MatchSnapshot;
use barrage_core::types::Position;
use barrage_sim::engine::MatchConfig;

use crate::game_loop::spawn_game_loop;
use crate::state::LoopCommand;

const FIELD_WIDTH: f64 = 1280.0;
const FIELD_HEIGHT: f64 = 720.0;

/// Stop the demo once the autopilot clears this many PvE levels.
const MAX_DEMO_LEVEL: u32 = 3;

/// Aim error injected into the autopilot so demo matches stay interesting.
const AUTOPILOT_ACCURACY: f64 = 6.0;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mode = match args.next().as_deref() {
        Some("pvp") => GameMode::Pvp,
        _ => GameMode::Pve,
    };
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);

    let slot = Arc::new(Mutex::new(None));
    let commands = spawn_game_loop(MatchConfig { seed }, Arc::clone(&slot));
    let mut jitter_rng = ChaCha8Rng::seed_from_u64(seed ^ 0x5eed);

    let _ = commands.send(LoopCommand::Player(PlayerCommand::StartMatch {
        width: FIELD_WIDTH,
        height: FIELD_HEIGHT,
        mode,
        classes: [TankClass::Standard; 2],
    }));
    log::info!("autoplay started: {mode:?}, seed {seed}");

    let mut board = RankingBoard::new();
    let mut last_fired_turn: Option<u32> = None;
    let mut last_level = 1;

    // Poll the snapshot slot a few times per tick; bounded so a stalemate
    // cannot hang the process.
    for _ in 0..20_000 {
        std::thread::sleep(Duration::from_millis(25));

        let snapshot: Option<MatchSnapshot> = match slot.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => break,
        };
        let Some(snap) = snapshot else { continue };

        if snap.npc_level != last_level {
            last_level = snap.npc_level;
            last_fired_turn = None;
            log::info!("reached level {last_level}");
            if last_level > MAX_DEMO_LEVEL {
                log::info!("demo target reached, returning to menu");
                let _ = commands.send(LoopCommand::Player(PlayerCommand::ReturnToMenu));
                break;
            }
        }

        match snap.phase {
            MatchPhase::Active => {
                if let Some(cmd) = plan_autoplay_shot(&snap, mode, &mut last_fired_turn, &mut jitter_rng) {
                    let _ = commands.send(LoopCommand::Player(cmd));
                }
            }
            MatchPhase::GameOver => {
                // A PvE player win auto-advances; anything else is final.
                if !(mode == GameMode::Pve && snap.winner == Some(PlayerId::One)) {
                    report_result(&snap, &mut board);
                    break;
                }
            }
            MatchPhase::Menu => {}
        }
    }

    let _ = commands.send(LoopCommand::Shutdown);
}

/// Pick the next shot for whichever human seat the autopilot is covering.
///
/// The shot search scans leftward arcs (it was built for the right-hand
/// tank), so player 1's aim is planned on a horizontally mirrored field and
/// reflected back.
fn plan_autoplay_shot(
    snap: &MatchSnapshot,
    mode: GameMode,
    last_fired_turn: &mut Option<u32>,
    rng: &mut ChaCha8Rng,
) -> Option<PlayerCommand> {
    if snap.stage != TurnStage::Aiming || snap.shell.is_some() {
        return None;
    }
    // The engine drives player 2 itself in PvE.
    if mode == GameMode::Pve && snap.current_player == PlayerId::Two {
        return None;
    }
    if *last_fired_turn == Some(snap.turn_count) {
        return None;
    }

    let me = snap.tanks.iter().find(|t| t.player == snap.current_player)?;
    let foe = snap.tanks.iter().find(|t| t.player != snap.current_player)?;

    let (angle, power) = if snap.current_player == PlayerId::One {
        let ctx = AimContext {
            source: Position::new(FIELD_WIDTH - me.x, me.y),
            target: Position::new(FIELD_WIDTH - foe.x, foe.y),
            wind: -snap.wind,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
        };
        let plan = plan_shot(&ctx);
        let (angle, power) = apply_inaccuracy(&plan, AUTOPILOT_ACCURACY, rng);
        (std::f64::consts::PI - angle, power)
    } else {
        let ctx = AimContext {
            source: Position::new(me.x, me.y),
            target: Position::new(foe.x, foe.y),
            wind: snap.wind,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
        };
        let plan = plan_shot(&ctx);
        apply_inaccuracy(&plan, AUTOPILOT_ACCURACY, rng)
    };

    *last_fired_turn = Some(snap.turn_count);
    Some(PlayerCommand::Fire {
        player: snap.current_player,
        angle,
        power,
    })
}

/// Log the final result and, for PvE runs, file it on the ranking board.
fn report_result(snap: &MatchSnapshot, board: &mut RankingBoard) {
    if let Some(winner) = snap.winner {
        log::info!(
            "game over: player {} wins at level {} with {} points",
            winner.number(),
            snap.npc_level,
            snap.score.points
        );
    }

    if snap.mode != GameMode::Pve {
        return;
    }
    let date = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_default();
    let entry = RankingEntry {
        name: "AUTOPILOT".into(),
        level: snap.npc_level,
        score: snap.score.points,
        date,
    };
    if let Some(rank) = board.add_entry(entry) {
        log::info!("run filed on the ranking board at #{rank}");
    }
}
