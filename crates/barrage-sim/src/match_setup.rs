//! Entity spawn factories for setting up a match.
//!
//! Creates tanks, shells, and supply crates with appropriate component
//! bundles. Decisions about *when* to spawn live in the engine; this module
//! only knows *how*.

use hecs::World;

use barrage_ai::profiles::NpcProfile;
use barrage_core::classes;
use barrage_core::components::{Cooldowns, Item, Shell, Tank};
use barrage_core::constants::*;
use barrage_core::enums::{ItemKind, PlayerId, TankClass};
use barrage_core::types::{Position, Velocity};
use barrage_terrain::TerrainField;

/// Spawn both tanks at their fixed field fractions, resting on the terrain.
pub fn spawn_tanks(
    world: &mut World,
    terrain: &TerrainField,
    field_width: f64,
    classes: [TankClass; 2],
) -> [hecs::Entity; 2] {
    let x1 = (field_width * TANK_SPAWN_FRAC_P1).floor();
    let x2 = (field_width * TANK_SPAWN_FRAC_P2).floor();
    [
        spawn_tank(world, terrain, x1, PlayerId::One, classes[0]),
        spawn_tank(world, terrain, x2, PlayerId::Two, classes[1]),
    ]
}

/// Spawn a single tank of the given class at `x`, sitting on the ground.
pub fn spawn_tank(
    world: &mut World,
    terrain: &TerrainField,
    x: f64,
    player: PlayerId,
    class: TankClass,
) -> hecs::Entity {
    let spec = classes::spec(class);
    let y = terrain.height_at(x) - spec.height / 2.0;

    let tank = Tank {
        player,
        class,
        width: spec.width,
        height: spec.height,
        health: spec.max_health,
        max_health: spec.max_health,
        fuel: spec.max_fuel,
        max_fuel: spec.max_fuel,
        vy: 0.0,
        on_ground: true,
        shield: false,
        double_shot: false,
        cooldowns: Cooldowns::default(),
        accuracy: 0.0,
        power_mult: spec.power_mult,
    };

    world.spawn((tank, Position::new(x, y)))
}

/// Overwrite player 2's combat stats with the level-scaled computer profile.
pub fn apply_npc_profile(world: &mut World, profile: &NpcProfile) {
    for (_entity, tank) in world.query_mut::<&mut Tank>() {
        if tank.player == PlayerId::Two {
            tank.health = profile.health;
            tank.max_health = profile.health;
            tank.accuracy = profile.accuracy;
            tank.power_mult = profile.power_mult;
        }
    }
}

/// Spawn a shell leaving the muzzle at the given angle and power.
pub fn spawn_shell(
    world: &mut World,
    muzzle: Position,
    angle: f64,
    power: f64,
    owner: PlayerId,
    damage_mult: f64,
    is_double: bool,
) -> hecs::Entity {
    let speed = power / POWER_DIVISOR;
    let radius = if is_double {
        DOUBLE_SHELL_RADIUS
    } else {
        SHELL_RADIUS
    };

    world.spawn((
        Shell {
            owner,
            damage_mult,
            is_double,
            radius,
        },
        muzzle,
        Velocity::new(speed * angle.cos(), speed * angle.sin()),
    ))
}

/// Spawn a supply crate just above the top edge, about to fall.
pub fn spawn_item(world: &mut World, kind: ItemKind, x: f64) -> hecs::Entity {
    world.spawn((
        Item {
            kind,
            fall_speed: ITEM_FALL_SPEED,
            on_ground: false,
        },
        Position::new(x, -(ITEM_HALF_SIZE * 2.0)),
    ))
}
