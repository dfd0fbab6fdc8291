//! Shell ballistics: gravity and wind integration.

use hecs::World;
use rand::Rng;

use barrage_core::components::Shell;
use barrage_core::constants::{GRAVITY, SHELL_SMOKE_CHANCE};
use barrage_core::events::GameEvent;
use barrage_core::types::{Position, Velocity};

/// Integrate the in-flight shell (if any) one tick and leave a smoke trail.
pub fn run(world: &mut World, wind: f64, rng: &mut impl Rng, events: &mut Vec<GameEvent>) {
    for (_entity, (_shell, pos, vel)) in world.query_mut::<(&Shell, &mut Position, &mut Velocity)>()
    {
        vel.y += GRAVITY;
        vel.x += wind;
        pos.0 += vel.0;

        if rng.gen_bool(SHELL_SMOKE_CHANCE) {
            events.push(GameEvent::Smoke { x: pos.x, y: pos.y });
        }
    }
}
