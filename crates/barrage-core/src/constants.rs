//! Simulation constants and tuning parameters.
//!
//! All physics constants are per-tick; the simulation advances one tick per
//! rendered frame.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

// --- Physics ---

/// Gravity in px/tick², applied to shells, airborne tanks, and debris.
pub const GRAVITY: f64 = 0.1;

/// Wind magnitude cap (px/tick²). Wind resamples uniformly in
/// [-WIND_MAX, WIND_MAX].
pub const WIND_MAX: f64 = 0.05;

/// Turns between wind resamples.
pub const WIND_TURN_INTERVAL: u32 = 3;

// --- Terrain ---

/// Highest allowed ground level, as a fraction of field height.
/// (y grows down: smaller values are higher on screen.)
pub const TERRAIN_CEILING_FRAC: f64 = 0.2;

/// Minimum ground thickness kept at the bottom of the field (px).
pub const TERRAIN_FLOOR_MARGIN: f64 = 50.0;

/// Per-column noise amplitude during generation (± px).
pub const TERRAIN_NOISE: f64 = 2.5;

/// Moving-average smoothing passes applied after generation.
pub const TERRAIN_SMOOTH_PASSES: usize = 2;

/// Crater radius carved by a shell impact (px).
pub const CRATER_RADIUS: f64 = 30.0;

// --- Tanks ---

/// Player 1 spawn position as a fraction of field width.
pub const TANK_SPAWN_FRAC_P1: f64 = 0.15;

/// Player 2 spawn position as a fraction of field width.
pub const TANK_SPAWN_FRAC_P2: f64 = 0.85;

/// Tanks may not move closer than this to either field edge (px).
pub const TANK_EDGE_MARGIN: f64 = 20.0;

/// Horizontal distance covered per move command (px).
pub const TANK_MOVE_STEP: f64 = 2.0;

/// Fuel consumed per move command.
pub const TANK_MOVE_FUEL_COST: f64 = 2.0;

/// Chance a move command kicks up a dust puff.
pub const TANK_MOVE_DUST_CHANCE: f64 = 0.3;

/// Vertical velocity applied on jump (px/tick; negative is up).
pub const TANK_JUMP_VELOCITY: f64 = -4.0;

/// Terrain sample offset used for slope following (columns).
pub const SLOPE_SAMPLE_OFFSET: f64 = 5.0;

/// Slope magnitude above which a grounded tank starts sliding.
pub const SLOPE_THRESHOLD: f64 = 3.0;

/// Fraction of the sampled slope applied as slide per tick.
pub const SLOPE_SLIDE_FACTOR: f64 = 0.1;

/// Barrel length; shells spawn at the muzzle (px).
pub const TURRET_LENGTH: f64 = 40.0;

/// Recoil distance per unit of fire power (px).
pub const RECOIL_FACTOR: f64 = 0.1;

// --- Shells ---

/// Muzzle speed per unit of fire power: speed = power / POWER_DIVISOR.
pub const POWER_DIVISOR: f64 = 5.0;

/// Upper bound accepted for a fire command's power.
pub const MAX_FIRE_POWER: f64 = 150.0;

/// Collision radius of a normal shell (px).
pub const SHELL_RADIUS: f64 = 5.0;

/// Collision radius of a double-shot shell (px).
pub const DOUBLE_SHELL_RADIUS: f64 = 8.0;

/// Chance per tick that an in-flight shell leaves a smoke puff.
pub const SHELL_SMOKE_CHANCE: f64 = 0.6;

/// Minimum damage of a hit before multipliers.
pub const DAMAGE_BASE: u32 = 25;

/// Size of the random damage spread: roll is BASE + [0, SPREAD).
pub const DAMAGE_SPREAD: u32 = 20;

/// Smoke puffs emitted around a wounded tank.
pub const HIT_SMOKE_PUFFS: usize = 15;

/// Horizontal scatter of hit smoke around the hull (px).
pub const HIT_SMOKE_SCATTER_X: f64 = 30.0;

/// Vertical scatter of hit smoke around the hull (px).
pub const HIT_SMOKE_SCATTER_Y: f64 = 20.0;

// --- Items ---

/// Chance an item drops at the start of a turn.
pub const ITEM_SPAWN_CHANCE: f64 = 0.4;

/// Constant fall speed of a dropping item (px/tick).
pub const ITEM_FALL_SPEED: f64 = 3.0;

/// Half extent of the square item crate (px).
pub const ITEM_HALF_SIZE: f64 = 15.0;

/// Horizontal scatter around the chosen tank when spawning (± px).
pub const ITEM_SCATTER: f64 = 50.0;

/// Items spawn no closer than this to either field edge (px).
pub const ITEM_EDGE_MARGIN: f64 = 30.0;

/// Per-axis pickup reach for tanks (px).
pub const ITEM_TANK_REACH: f64 = 40.0;

/// Per-axis pickup reach for shells (px).
pub const ITEM_SHELL_REACH: f64 = 30.0;

/// Health restored by a HEALTH crate.
pub const ITEM_HEAL_AMOUNT: f64 = 30.0;

// --- Skills ---

/// Shield cooldown for human players (turns).
pub const SHIELD_COOLDOWN_TURNS: u32 = 3;

/// Double-shot cooldown (turns).
pub const DOUBLE_SHOT_COOLDOWN_TURNS: u32 = 3;

// --- Deferred actions (delays in ticks) ---

/// Delay before the computer starts acting on its turn.
pub const NPC_TURN_DELAY_TICKS: u64 = 60;

/// Delay between the computer finishing movement and firing.
pub const NPC_FIRE_DELAY_TICKS: u64 = 30;

/// Delay before advancing to the next level after a PvE win.
pub const LEVEL_ADVANCE_DELAY_TICKS: u64 = 120;
