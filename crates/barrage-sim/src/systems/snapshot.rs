//! Snapshot system: queries the ECS world and builds a complete MatchSnapshot.
//!
//! This system is read-only — it never modifies the world.

use hecs::World;

use barrage_core::components::{Item, Shell, Tank};
use barrage_core::enums::{GameMode, MatchPhase, PlayerId, TurnStage};
use barrage_core::events::GameEvent;
use barrage_core::state::*;
use barrage_core::types::{Position, SimTime, Velocity};
use barrage_terrain::TerrainField;

use crate::engine::ScoreState;

/// Match-level scalars copied into the snapshot alongside the world state.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotHeader {
    pub time: SimTime,
    pub phase: MatchPhase,
    pub mode: GameMode,
    pub stage: TurnStage,
    pub current_player: PlayerId,
    pub turn_count: u32,
    pub wind: f64,
    pub npc_level: u32,
    pub last_fire: [FireParams; 2],
    pub winner: Option<PlayerId>,
}

/// Build a complete MatchSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    terrain: Option<&TerrainField>,
    header: SnapshotHeader,
    score: &ScoreState,
    events: Vec<GameEvent>,
) -> MatchSnapshot {
    MatchSnapshot {
        time: header.time,
        phase: header.phase,
        mode: header.mode,
        stage: header.stage,
        current_player: header.current_player,
        turn_count: header.turn_count,
        wind: header.wind,
        npc_level: header.npc_level,
        terrain: terrain.map(|t| t.heights().to_vec()).unwrap_or_default(),
        tanks: build_tanks(world),
        shell: build_shell(world),
        items: build_items(world),
        last_fire: header.last_fire,
        winner: header.winner,
        score: score.view(),
        events,
    }
}

/// Build TankView list, sorted by player number.
fn build_tanks(world: &World) -> Vec<TankView> {
    let mut tanks: Vec<TankView> = world
        .query::<(&Tank, &Position)>()
        .iter()
        .map(|(_, (tank, pos))| TankView {
            player: tank.player,
            class: tank.class,
            x: pos.x,
            y: pos.y,
            width: tank.width,
            height: tank.height,
            health: tank.health,
            max_health: tank.max_health,
            fuel: tank.fuel,
            max_fuel: tank.max_fuel,
            on_ground: tank.on_ground,
            shield: tank.shield,
            double_shot: tank.double_shot,
            cooldowns: tank.cooldowns,
        })
        .collect();

    tanks.sort_by_key(|t| t.player.number());
    tanks
}

/// Build the ShellView for the in-flight shell, if any.
fn build_shell(world: &World) -> Option<ShellView> {
    world
        .query::<(&Shell, &Position, &Velocity)>()
        .iter()
        .next()
        .map(|(_, (shell, pos, vel))| ShellView {
            owner: shell.owner,
            x: pos.x,
            y: pos.y,
            vx: vel.x,
            vy: vel.y,
            radius: shell.radius,
            is_double: shell.is_double,
        })
}

/// Build ItemView list for every falling or resting crate.
fn build_items(world: &World) -> Vec<ItemView> {
    world
        .query::<(&Item, &Position)>()
        .iter()
        .map(|(_, (item, pos))| ItemView {
            kind: item.kind,
            x: pos.x,
            y: pos.y,
            on_ground: item.on_ground,
        })
        .collect()
}
