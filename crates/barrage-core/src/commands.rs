//! Player commands sent from the presentation layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary. Commands
//! that are illegal in the current state (firing while a shell flies,
//! moving without fuel, a skill on cooldown) are dropped silently.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Start a new match on a field of the given size.
    StartMatch {
        width: f64,
        height: f64,
        mode: GameMode,
        /// Tank class per player, index 0 = player 1.
        classes: [TankClass; 2],
    },

    /// Fire a shell at the given barrel angle (screen-space radians,
    /// y down) and power.
    Fire {
        player: PlayerId,
        angle: f64,
        power: f64,
    },

    /// Move one step. Held keys send one of these per tick.
    Move { player: PlayerId, direction: MoveDir },

    /// Hop off the ground.
    Jump { player: PlayerId },

    /// Activate a skill for the acting player.
    UseSkill { player: PlayerId, skill: Skill },

    /// Abandon the current match and return to the menu.
    ReturnToMenu,
}
