//! Supply crate systems: falling, pickup, and off-field sweep.

use hecs::{Entity, World};

use barrage_core::components::{Item, Shell, Tank};
use barrage_core::constants::{ITEM_HALF_SIZE, ITEM_SHELL_REACH, ITEM_TANK_REACH};
use barrage_core::enums::{ItemKind, PlayerId};
use barrage_core::events::GameEvent;
use barrage_core::types::Position;
use barrage_terrain::TerrainField;

/// Drop airborne crates at their constant fall speed and rest them on the
/// terrain. Resting crates stay collectible.
pub fn fall(world: &mut World, terrain: &TerrainField) {
    for (_entity, (item, pos)) in world.query_mut::<(&mut Item, &mut Position)>() {
        if !item.on_ground {
            pos.y += item.fall_speed;
        }

        let ground_y = terrain.height_at(pos.x);
        if pos.y + ITEM_HALF_SIZE >= ground_y {
            pos.y = ground_y - ITEM_HALF_SIZE;
            item.on_ground = true;
        } else {
            item.on_ground = false;
        }
    }
}

/// A resolved pickup, buffered so crate effects apply after the queries end.
struct Pickup {
    item: Entity,
    collector: Entity,
    kind: ItemKind,
    /// Shot off the sky by a shell rather than driven over.
    by_shell: bool,
    x: f64,
    y: f64,
}

/// Collect crates: tanks within reach take them; otherwise the in-flight
/// shell can snatch one for its owner (with a blast).
pub fn pickups(world: &mut World, events: &mut Vec<GameEvent>) {
    let tanks: Vec<(Entity, PlayerId, f64, f64)> = world
        .query::<(&Tank, &Position)>()
        .iter()
        .map(|(entity, (tank, pos))| (entity, tank.player, pos.x, pos.y))
        .collect();

    let shell: Option<(PlayerId, f64, f64)> = world
        .query::<(&Shell, &Position)>()
        .iter()
        .next()
        .map(|(_, (shell, pos))| (shell.owner, pos.x, pos.y));

    let mut collected: Vec<Pickup> = Vec::new();
    for (item_entity, (item, pos)) in world.query::<(&Item, &Position)>().iter() {
        let tank_hit = tanks.iter().find(|&&(_, _, tx, ty)| {
            (pos.x - tx).abs() < ITEM_TANK_REACH && (pos.y - ty).abs() < ITEM_TANK_REACH
        });

        if let Some(&(collector, _, _, _)) = tank_hit {
            collected.push(Pickup {
                item: item_entity,
                collector,
                kind: item.kind,
                by_shell: false,
                x: pos.x,
                y: pos.y,
            });
            continue;
        }

        if let Some((owner, sx, sy)) = shell {
            if (pos.x - sx).abs() < ITEM_SHELL_REACH && (pos.y - sy).abs() < ITEM_SHELL_REACH {
                if let Some(&(collector, _, _, _)) =
                    tanks.iter().find(|&&(_, player, _, _)| player == owner)
                {
                    collected.push(Pickup {
                        item: item_entity,
                        collector,
                        kind: item.kind,
                        by_shell: true,
                        x: pos.x,
                        y: pos.y,
                    });
                }
            }
        }
    }

    for pickup in collected {
        if let Ok(mut tank) = world.get::<&mut Tank>(pickup.collector) {
            apply_item_effect(&mut tank, pickup.kind);
            events.push(GameEvent::ItemCollected {
                player: tank.player,
                kind: pickup.kind,
            });
        }
        if pickup.by_shell {
            events.push(GameEvent::Explosion {
                x: pickup.x,
                y: pickup.y,
            });
        }
        let _ = world.despawn(pickup.item);
    }
}

fn apply_item_effect(tank: &mut Tank, kind: ItemKind) {
    use barrage_core::constants::ITEM_HEAL_AMOUNT;
    match kind {
        ItemKind::Health => tank.health = (tank.health + ITEM_HEAL_AMOUNT).min(tank.max_health),
        ItemKind::Power => tank.double_shot = true,
        ItemKind::Fuel => tank.fuel = tank.max_fuel,
    }
}

/// Remove crates that fell past the bottom edge of the field.
/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn sweep(world: &mut World, field_height: f64, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, (_item, pos)) in world.query_mut::<(&Item, &Position)>() {
        if pos.y > field_height {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
