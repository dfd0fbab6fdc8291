//! Match snapshot — the complete visible state handed to presentation each tick.

use serde::{Deserialize, Serialize};

use crate::components::Cooldowns;
use crate::enums::*;
use crate::events::GameEvent;
use crate::types::SimTime;

/// Complete match state published after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub time: SimTime,
    pub phase: MatchPhase,
    pub mode: GameMode,
    pub stage: TurnStage,
    pub current_player: PlayerId,
    pub turn_count: u32,
    /// Wind acceleration applied to shells (px/tick², positive = rightward).
    pub wind: f64,
    /// PvE difficulty tier (1 in PvP).
    pub npc_level: u32,
    /// Ground height per column, y-down. Empty while in the menu.
    pub terrain: Vec<f64>,
    pub tanks: Vec<TankView>,
    /// The in-flight shell, if any.
    pub shell: Option<ShellView>,
    pub items: Vec<ItemView>,
    /// Last fire parameters per player (index 0 = player 1), for default
    /// aiming UI.
    pub last_fire: [FireParams; 2],
    /// Set once the phase reaches GameOver.
    pub winner: Option<PlayerId>,
    pub score: ScoreView,
    /// Events that happened during this tick.
    pub events: Vec<GameEvent>,
}

/// A tank as visible to the frontend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankView {
    pub player: PlayerId,
    pub class: TankClass,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub health: f64,
    pub max_health: f64,
    pub fuel: f64,
    pub max_fuel: f64,
    pub on_ground: bool,
    pub shield: bool,
    pub double_shot: bool,
    pub cooldowns: Cooldowns,
}

/// The in-flight shell as visible to the frontend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShellView {
    pub owner: PlayerId,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub is_double: bool,
}

/// A supply crate as visible to the frontend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ItemView {
    pub kind: ItemKind,
    pub x: f64,
    pub y: f64,
    pub on_ground: bool,
}

/// Aim parameters of a player's most recent shot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FireParams {
    /// Barrel angle in screen-space radians.
    pub angle: f64,
    pub power: f64,
}

impl Default for FireParams {
    fn default() -> Self {
        Self {
            angle: 0.0,
            power: 50.0,
        }
    }
}

/// Running score for display and ranking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub shots_fired: u32,
    /// Total damage dealt by player 1 across the run.
    pub damage_dealt: f64,
    /// PvE levels cleared this run.
    pub levels_cleared: u32,
    /// Aggregate points: levels_cleared * 1000 + damage_dealt.
    pub points: u64,
}
