//! Terrain synthesis: archetype-shaped sine stacks.
//!
//! Each archetype is a parameter profile — base level plus two sine waves
//! with a shared random phase, an optional cosine bowl around the field
//! center, and per-column noise — clamped to the playable band and smoothed.

use rand::Rng;

use barrage_core::constants::{TERRAIN_NOISE, TERRAIN_SMOOTH_PASSES};
use barrage_core::enums::TerrainKind;

use crate::field::TerrainField;

/// Synthesis parameters for one archetype, as fractions of field height.
struct ArchetypeParams {
    base_frac: f64,
    amp1_frac: f64,
    freq1: f64,
    amp2_frac: f64,
    freq2: f64,
    /// Center bowl amplitude as a fraction of field height.
    /// Positive lowers the center (valley), negative raises it (mountain).
    bowl_frac: f64,
}

fn archetype_params(kind: TerrainKind) -> ArchetypeParams {
    match kind {
        TerrainKind::Flat => ArchetypeParams {
            base_frac: 0.7,
            amp1_frac: 0.05,
            freq1: 0.005,
            amp2_frac: 0.02,
            freq2: 0.02,
            bowl_frac: 0.0,
        },
        TerrainKind::Valley => ArchetypeParams {
            base_frac: 0.6,
            amp1_frac: 0.1,
            freq1: 0.008,
            amp2_frac: 0.05,
            freq2: 0.02,
            bowl_frac: 0.2,
        },
        TerrainKind::Mountain => ArchetypeParams {
            base_frac: 0.8,
            amp1_frac: 0.15,
            freq1: 0.006,
            amp2_frac: 0.05,
            freq2: 0.02,
            bowl_frac: -0.3,
        },
        TerrainKind::Chaotic => ArchetypeParams {
            base_frac: 0.7,
            amp1_frac: 0.15,
            freq1: 0.01,
            amp2_frac: 0.1,
            freq2: 0.03,
            bowl_frac: 0.0,
        },
    }
}

/// Archetype for a PvE level: levels cycle through the archetypes in order.
pub fn kind_for_level(level: u32) -> TerrainKind {
    TerrainKind::ALL[(level.saturating_sub(1) as usize) % TerrainKind::ALL.len()]
}

/// Uniformly random archetype (PvP matches).
pub fn random_kind(rng: &mut impl Rng) -> TerrainKind {
    TerrainKind::ALL[rng.gen_range(0..TerrainKind::ALL.len())]
}

/// Synthesize a terrain field of `width` columns for a field `height` px tall.
pub fn generate(width: usize, height: f64, kind: TerrainKind, rng: &mut impl Rng) -> TerrainField {
    let p = archetype_params(kind);
    let phase: f64 = rng.gen_range(0.0..std::f64::consts::TAU);

    let base = height * p.base_frac;
    let amp1 = height * p.amp1_frac;
    let amp2 = height * p.amp2_frac;
    let bowl = height * p.bowl_frac;
    let bowl_extent = width as f64 * 0.4;
    let (ceiling, floor) = TerrainField::clamp_band(height);

    let mut heights = Vec::with_capacity(width);
    for x in 0..width {
        let xf = x as f64;
        let mut y = base;
        y += (xf * p.freq1 + phase).sin() * amp1;
        y += (xf * p.freq2 + phase * 2.0).sin() * amp2;

        // Cosine bowl within 40% of center width.
        let dist = (xf - width as f64 / 2.0).abs();
        if bowl != 0.0 && dist < bowl_extent {
            y += ((dist / bowl_extent) * std::f64::consts::FRAC_PI_2).cos() * bowl;
        }

        y += rng.gen_range(-TERRAIN_NOISE..TERRAIN_NOISE);
        heights.push(y.clamp(ceiling, floor));
    }

    let mut field = TerrainField::new(heights, height);
    field.smooth(TERRAIN_SMOOTH_PASSES);
    field
}
