//! Shot planning: exhaustive angle/power grid search over simulated arcs.
//!
//! Each candidate is flown with the same integration rule as a live shell
//! (gravity plus the current wind) and scored by its closest approach to
//! the target. The grid argmin wins; level-scaled jitter is applied on top
//! so low-level opponents stay beatable.

use rand::Rng;

use barrage_core::constants::{GRAVITY, POWER_DIVISOR};
use barrage_core::types::Position;

/// Candidate barrel angles (degrees, screen-space).
/// 180..250 covers up-range lobs toward the left; 110..180 covers drop
/// shots onto nearby ground.
const ANGLE_MIN_DEG: u32 = 110;
const ANGLE_MAX_DEG: u32 = 250;
const ANGLE_STEP_DEG: u32 = 5;

/// Candidate fire powers.
const POWER_MIN: u32 = 20;
const POWER_MAX: u32 = 100;
const POWER_STEP: u32 = 10;

/// Integration steps per simulated arc.
const SIM_STEPS: usize = 200;

/// Bounds the jittered power is clamped into.
pub const POWER_FLOOR: f64 = 10.0;
pub const POWER_CEIL: f64 = 100.0;

/// Everything the search needs to know about the world.
#[derive(Debug, Clone, Copy)]
pub struct AimContext {
    /// Muzzle origin (the firing tank's center).
    pub source: Position,
    /// The enemy tank's center.
    pub target: Position,
    /// Current wind acceleration (px/tick²).
    pub wind: f64,
    pub field_width: f64,
    pub field_height: f64,
}

/// The best candidate found by the grid search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotPlan {
    /// Barrel angle (screen-space radians).
    pub angle: f64,
    pub power: f64,
    /// Minimum distance to the target along the simulated arc (px).
    pub closest_approach: f64,
}

/// Fly one candidate arc and return its minimum distance to the target.
///
/// Deterministic: identical inputs always trace the identical arc.
pub fn closest_approach(ctx: &AimContext, angle: f64, power: f64) -> f64 {
    let speed = power / POWER_DIVISOR;
    let mut x = ctx.source.x;
    let mut y = ctx.source.y;
    let mut vx = speed * angle.cos();
    let mut vy = speed * angle.sin();
    let mut min_dist = f64::INFINITY;

    for _ in 0..SIM_STEPS {
        vy += GRAVITY;
        vx += ctx.wind;
        x += vx;
        y += vy;

        let dx = x - ctx.target.x;
        let dy = y - ctx.target.y;
        let d = (dx * dx + dy * dy).sqrt();
        if d < min_dist {
            min_dist = d;
        }

        if y > ctx.field_height || x < 0.0 || x > ctx.field_width {
            break;
        }
    }

    min_dist
}

/// Exhaustive argmin over the sampled angle/power grid.
pub fn plan_shot(ctx: &AimContext) -> ShotPlan {
    let mut best = ShotPlan {
        angle: std::f64::consts::PI,
        power: 50.0,
        closest_approach: f64::INFINITY,
    };

    let mut deg = ANGLE_MIN_DEG;
    while deg <= ANGLE_MAX_DEG {
        let angle = (deg as f64).to_radians();
        let mut power = POWER_MIN;
        while power <= POWER_MAX {
            let dist = closest_approach(ctx, angle, power as f64);
            if dist < best.closest_approach {
                best = ShotPlan {
                    angle,
                    power: power as f64,
                    closest_approach: dist,
                };
            }
            power += POWER_STEP;
        }
        deg += ANGLE_STEP_DEG;
    }

    best
}

/// Enumerate the full candidate grid (used by optimality tests).
pub fn candidate_grid() -> Vec<(f64, f64)> {
    let mut grid = Vec::new();
    let mut deg = ANGLE_MIN_DEG;
    while deg <= ANGLE_MAX_DEG {
        let mut power = POWER_MIN;
        while power <= POWER_MAX {
            grid.push(((deg as f64).to_radians(), power as f64));
            power += POWER_STEP;
        }
        deg += ANGLE_STEP_DEG;
    }
    grid
}

/// Apply the level-scaled aim error: uniform jitter of ±accuracy/2 degrees
/// on the angle and ±accuracy/2 power units on the power, power clamped
/// into [POWER_FLOOR, POWER_CEIL].
pub fn apply_inaccuracy(
    plan: &ShotPlan,
    accuracy_deg: f64,
    rng: &mut impl Rng,
) -> (f64, f64) {
    let error_range = accuracy_deg.to_radians();
    let angle = plan.angle + (rng.gen::<f64>() - 0.5) * error_range;
    let power =
        (plan.power + (rng.gen::<f64>() - 0.5) * accuracy_deg).clamp(POWER_FLOOR, POWER_CEIL);
    (angle, power)
}
