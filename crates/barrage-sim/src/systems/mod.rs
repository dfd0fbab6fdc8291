//! Per-tick simulation systems.
//!
//! Systems are free functions over the hecs world, run by the engine in a
//! fixed order each tick. They detect and integrate; cross-cutting state
//! changes (turn passing, damage, terrain craters) are resolved by the
//! engine from what the systems return.

pub mod ballistics;
pub mod collision;
pub mod items;
pub mod snapshot;
pub mod tanks;
