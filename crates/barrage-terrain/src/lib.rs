//! Destructible terrain for BARRAGE.
//!
//! Heightmap synthesis, crater deformation, and column queries.

pub use barrage_core as core;

pub mod field;
pub mod generate;

// Re-export key items for convenience.
pub use field::TerrainField;
pub use generate::{generate, kind_for_level, random_kind};
