//! Tank class stat table.
//!
//! Per-class stats are fixed at match setup; a tank copies them by value at
//! creation and never consults the table again.

use crate::enums::TankClass;

/// Static stats for one tank class.
#[derive(Debug, Clone, Copy)]
pub struct TankSpec {
    pub name: &'static str,
    pub max_health: f64,
    pub max_fuel: f64,
    /// Hull width (px). Also the diameter of the hit circle.
    pub width: f64,
    /// Hull height (px).
    pub height: f64,
    /// Damage multiplier applied to every shell this tank fires.
    pub power_mult: f64,
}

const STANDARD: TankSpec = TankSpec {
    name: "Standard",
    max_health: 100.0,
    max_fuel: 300.0,
    width: 60.0,
    height: 25.0,
    power_mult: 1.0,
};

const HEAVY: TankSpec = TankSpec {
    name: "Heavy",
    max_health: 150.0,
    max_fuel: 300.0,
    width: 70.0,
    height: 30.0,
    power_mult: 0.75,
};

const SCOUT: TankSpec = TankSpec {
    name: "Scout",
    max_health: 75.0,
    max_fuel: 300.0,
    width: 50.0,
    height: 20.0,
    power_mult: 1.4,
};

/// Look up the stat block for a tank class.
pub fn spec(class: TankClass) -> &'static TankSpec {
    match class {
        TankClass::Standard => &STANDARD,
        TankClass::Heavy => &HEAVY,
        TankClass::Scout => &SCOUT,
    }
}
