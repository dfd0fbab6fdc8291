//! Shared state between the driver and the game loop thread.

use std::sync::{Arc, Mutex};

use barrage_core::commands::PlayerCommand;
use barrage_core::state::MatchSnapshot;

/// Commands sent from the driver to the game loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// A player command to forward to the match engine.
    Player(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// The latest snapshot, published by the game loop thread after each tick
/// and polled by the driver.
pub type SnapshotSlot = Arc<Mutex<Option<MatchSnapshot>>>;
