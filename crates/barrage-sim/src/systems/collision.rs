//! Shell collision detection.
//!
//! One check sequence per tick while a shell exists, in strict priority
//! order: field bounds, then terrain, then enemy tanks. The first match
//! wins and ends the tick's resolution. This system only *detects*; the
//! engine owns the consequences (craters, damage, turn passing).

use hecs::{Entity, World};

use barrage_core::components::{Shell, Tank};
use barrage_core::enums::PlayerId;
use barrage_core::types::Position;
use barrage_terrain::TerrainField;

/// What the in-flight shell struck this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Impact {
    /// Left the field sideways or below; no terrain or tank effect.
    OutOfBounds,
    /// Buried itself in the ground at the given point.
    Terrain { x: f64, y: f64 },
    /// Struck an enemy tank.
    Tank { player: PlayerId, x: f64, y: f64 },
}

/// Evaluate the collision checks for the in-flight shell, if one exists.
pub fn run(
    world: &World,
    terrain: &TerrainField,
    field_width: f64,
    field_height: f64,
) -> Option<(Entity, Impact)> {
    let (shell_entity, owner, px, py) = {
        let mut query = world.query::<(&Shell, &Position)>();
        let (entity, (shell, pos)) = query.iter().next()?;
        (entity, shell.owner, pos.x.round(), pos.y.round())
    };

    // 1. Out of bounds. There is no ceiling: shells may arc above the field.
    if px < 0.0 || px >= field_width || py > field_height {
        return Some((shell_entity, Impact::OutOfBounds));
    }

    // 2. Terrain.
    if py >= terrain.height_at(px) {
        return Some((shell_entity, Impact::Terrain { x: px, y: py }));
    }

    // 3. Enemy tanks.
    for (_entity, (tank, pos)) in world.query::<(&Tank, &Position)>().iter() {
        if tank.player == owner {
            continue;
        }
        let dx = px - pos.x;
        let dy = py - pos.y;
        if (dx * dx + dy * dy).sqrt() < tank.width / 2.0 {
            return Some((
                shell_entity,
                Impact::Tank {
                    player: tank.player,
                    x: px,
                    y: py,
                },
            ));
        }
    }

    None
}
