//! Events emitted by the simulation for presentation feedback.
//!
//! VFX triggers (explosion, dust, smoke) are fire-and-forget: the engine
//! does not track particle lifetimes, it only announces that a frontend
//! should spawn them.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Discrete events drained into each tick's snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Something detonated — spawn explosion VFX/SFX here.
    Explosion { x: f64, y: f64 },
    /// A moving tank kicked up dust.
    Dust { x: f64, y: f64 },
    /// Smoke puff (shell trail, wounded tank).
    Smoke { x: f64, y: f64 },
    /// A shell left the barrel.
    ShotFired { player: PlayerId },
    /// A tank was struck. `damage` is 0 when the hit was shielded.
    TankHit {
        player: PlayerId,
        damage: f64,
        shielded: bool,
    },
    /// The turn passed to a new player.
    TurnChange { player: PlayerId },
    /// A supply crate started falling.
    ItemSpawned { kind: ItemKind, x: f64 },
    /// A supply crate was collected.
    ItemCollected { player: PlayerId, kind: ItemKind },
    /// A skill was activated.
    SkillActivated { player: PlayerId, skill: Skill },
    /// Wind was resampled.
    WindShift { wind: f64 },
    /// PvE level cleared; a new match begins at `level` shortly.
    LevelAdvance { level: u32 },
    /// The match ended.
    GameOver {
        winner: PlayerId,
        /// PvE level reached (1 in PvP).
        level: u32,
        score: u64,
    },
}
