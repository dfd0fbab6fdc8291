//! Core types and definitions for the BARRAGE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, snapshot views, events, constants, and the tank
//! class table. It has no dependency on any runtime framework.

pub mod classes;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod rankings;
pub mod state;
pub mod types;
