//! Tank settling system: gravity, ground clamp, slope follow.
//!
//! Runs every active tick for both tanks, whether or not a shell is in
//! flight — a tank standing over a fresh crater must fall into it.

use hecs::World;

use barrage_core::components::Tank;
use barrage_core::constants::{
    GRAVITY, SLOPE_SAMPLE_OFFSET, SLOPE_SLIDE_FACTOR, SLOPE_THRESHOLD, TANK_EDGE_MARGIN,
};
use barrage_core::types::Position;
use barrage_terrain::TerrainField;

/// Apply gravity, snap to ground, and slide grounded tanks down steep slopes.
pub fn run(world: &mut World, terrain: &TerrainField) {
    let field_width = terrain.width() as f64;

    for (_entity, (tank, pos)) in world.query_mut::<(&mut Tank, &mut Position)>() {
        tank.vy += GRAVITY;
        pos.y += tank.vy;

        // The tank rests with its center half a hull-height above the ground.
        let ground_y = terrain.height_at(pos.x) - tank.height / 2.0;
        if pos.y >= ground_y {
            pos.y = ground_y;
            tank.vy = 0.0;
            tank.on_ground = true;
        } else {
            tank.on_ground = false;
        }

        if tank.on_ground {
            let ix = pos.x.floor();
            if ix >= SLOPE_SAMPLE_OFFSET && ix < field_width - SLOPE_SAMPLE_OFFSET {
                let left = terrain.height_at(ix - SLOPE_SAMPLE_OFFSET);
                let right = terrain.height_at(ix + SLOPE_SAMPLE_OFFSET);
                let slope = right - left;

                // y grows down, so a positive slope slides the tank right.
                if slope.abs() > SLOPE_THRESHOLD {
                    pos.x += slope * SLOPE_SLIDE_FACTOR;
                }
                pos.x = pos.x.clamp(TANK_EDGE_MARGIN, field_width - TANK_EDGE_MARGIN);
            }
        }
    }
}
