//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Which side a tank fights for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    #[default]
    One,
    Two,
}

impl PlayerId {
    /// The other player.
    pub fn opponent(self) -> PlayerId {
        match self {
            PlayerId::One => PlayerId::Two,
            PlayerId::Two => PlayerId::One,
        }
    }

    /// 1-based player number for display.
    pub fn number(self) -> u8 {
        match self {
            PlayerId::One => 1,
            PlayerId::Two => 2,
        }
    }
}

/// Match mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    /// Two humans at one keyboard.
    #[default]
    Pvp,
    /// Player 1 against the computer, with level progression.
    Pve,
}

/// Terrain generation archetype.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainKind {
    #[default]
    Flat,
    /// Center of the field dips into a bowl.
    Valley,
    /// Center of the field rises into a ridge.
    Mountain,
    /// High-amplitude, high-frequency rough ground.
    Chaotic,
}

impl TerrainKind {
    pub const ALL: [TerrainKind; 4] = [
        TerrainKind::Flat,
        TerrainKind::Valley,
        TerrainKind::Mountain,
        TerrainKind::Chaotic,
    ];
}

/// Supply crate variety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Restores health.
    Health,
    /// Arms the next shot as a double shot.
    Power,
    /// Refills movement fuel.
    Fuel,
}

/// Activatable tank skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Skill {
    /// Negates the next incoming hit entirely.
    Shield,
    /// The next shell deals double damage with a larger blast.
    DoubleShot,
}

/// Movement direction for a move command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveDir {
    Left,
    Right,
}

impl MoveDir {
    /// Signed horizontal unit (-1.0 or +1.0).
    pub fn sign(self) -> f64 {
        match self {
            MoveDir::Left => -1.0,
            MoveDir::Right => 1.0,
        }
    }
}

/// Tank chassis variant, keyed into the class stat table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TankClass {
    /// Balanced hull.
    #[default]
    Standard,
    /// Big and tough, weaker gun.
    Heavy,
    /// Fragile hull, hard-hitting gun.
    Scout,
}

/// Top-level match phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    #[default]
    Menu,
    Active,
    GameOver,
}

/// Where the current turn stands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnStage {
    /// The current player may move, jump, use skills, and fire.
    #[default]
    Aiming,
    /// A shell is in flight; all inputs except aiming are ignored.
    InFlight,
}
