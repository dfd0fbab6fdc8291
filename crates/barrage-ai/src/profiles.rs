//! Level-scaled opponent profiles and turn-opening decisions.

use rand::Rng;

use barrage_core::enums::MoveDir;

/// The computer pays a longer shield cooldown than human players.
pub const NPC_SHIELD_COOLDOWN: u32 = 4;

/// Double-shot cooldown for the computer (turns).
pub const NPC_DOUBLE_COOLDOWN: u32 = 3;

/// Health threshold below which the computer considers shielding.
pub const NPC_SHIELD_HEALTH_THRESHOLD: f64 = 50.0;

/// Chance the computer shields when eligible.
pub const NPC_SHIELD_CHANCE: f64 = 0.5;

/// Chance the computer arms a double shot when eligible.
pub const NPC_DOUBLE_CHANCE: f64 = 0.3;

/// Chance the computer repositions before firing.
pub const NPC_MOVE_CHANCE: f64 = 0.6;

/// Chance per movement tick that the computer hops.
pub const NPC_JUMP_CHANCE: f64 = 0.02;

/// Movement micro-phase duration range (ticks; 0.5–1.5 s at 60 Hz).
pub const NPC_MOVE_TICKS_MIN: u32 = 30;
pub const NPC_MOVE_TICKS_MAX: u32 = 90;

/// Combat stats for a computer opponent at a given level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NpcProfile {
    pub level: u32,
    pub health: f64,
    /// Aim error range in degrees. Lower is better.
    pub accuracy: f64,
    /// Damage multiplier applied to the computer's shells.
    pub power_mult: f64,
}

/// Stat scaling per level: more health, tighter aim, harder hits.
pub fn profile_for_level(level: u32) -> NpcProfile {
    NpcProfile {
        level,
        health: 100.0 + (level.saturating_sub(1)) as f64 * 20.0,
        accuracy: (20.0 - level as f64 * 2.0).max(1.0),
        power_mult: 1.0 + level as f64 * 0.1,
    }
}

/// A planned repositioning burst before firing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovePlan {
    pub direction: MoveDir,
    pub duration_ticks: u32,
}

/// What the computer decides to do at the start of its turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TurnOpening {
    pub use_shield: bool,
    pub use_double: bool,
    pub movement: Option<MovePlan>,
}

/// Roll the turn-opening decisions: defensive shield when wounded, an
/// occasional double shot, and a short repositioning burst.
pub fn plan_turn_opening(
    health: f64,
    shield_ready: bool,
    double_ready: bool,
    rng: &mut impl Rng,
) -> TurnOpening {
    let use_shield = shield_ready
        && health < NPC_SHIELD_HEALTH_THRESHOLD
        && rng.gen_bool(NPC_SHIELD_CHANCE);
    let use_double = double_ready && rng.gen_bool(NPC_DOUBLE_CHANCE);

    let movement = if rng.gen_bool(NPC_MOVE_CHANCE) {
        let direction = if rng.gen_bool(0.5) {
            MoveDir::Left
        } else {
            MoveDir::Right
        };
        Some(MovePlan {
            direction,
            duration_ticks: rng.gen_range(NPC_MOVE_TICKS_MIN..=NPC_MOVE_TICKS_MAX),
        })
    } else {
        None
    };

    TurnOpening {
        use_shield,
        use_double,
        movement,
    }
}
