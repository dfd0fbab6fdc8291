//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::{ItemKind, PlayerId, TankClass};

/// Skill cooldown counters, decremented at the start of the owner's turn.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Cooldowns {
    pub shield: u32,
    pub double_shot: u32,
}

/// A tank's full combat state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tank {
    pub player: PlayerId,
    pub class: TankClass,
    /// Hull width (px); the hit circle has radius width/2.
    pub width: f64,
    /// Hull height (px).
    pub height: f64,
    pub health: f64,
    pub max_health: f64,
    pub fuel: f64,
    pub max_fuel: f64,
    /// Vertical velocity (px/tick). Tanks have no persistent horizontal
    /// velocity; horizontal motion comes from move commands and slope slide.
    pub vy: f64,
    pub on_ground: bool,
    /// An active shield negates the next incoming hit.
    pub shield: bool,
    /// The next shell fired is a double shot.
    pub double_shot: bool,
    pub cooldowns: Cooldowns,
    /// Aim error in degrees for computer-controlled tanks. 0 for humans.
    pub accuracy: f64,
    /// Damage multiplier captured onto every shell this tank fires.
    pub power_mult: f64,
}

/// A shell in flight. At most one exists at any moment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Shell {
    pub owner: PlayerId,
    /// Damage multiplier captured from the firing tank at launch.
    pub damage_mult: f64,
    pub is_double: bool,
    /// Collision radius (px).
    pub radius: f64,
}

/// A supply crate falling from the sky.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Item {
    pub kind: ItemKind,
    /// Constant fall speed while airborne (px/tick).
    pub fall_speed: f64,
    /// Resting on terrain; still collectible.
    pub on_ground: bool,
}

// Position and Velocity (types.rs) are used as ECS components too.
