//! Tick-deferred actions with match-generation guards.
//!
//! The engine never uses wall-clock timers. Anything that happens "later"
//! (the computer starting its turn, the post-win level advance) is a task
//! keyed to a due tick and the match generation it was scheduled under.
//! Starting a new match or returning to the menu bumps the generation, so
//! tasks left over from an abandoned match drain as no-ops.

/// A deferred engine action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    /// The computer opens its turn (skills + optional repositioning).
    NpcTakeTurn,
    /// The computer runs the shot search and fires.
    NpcFire,
    /// Advance to the next PvE level after a player win.
    AdvanceLevel,
}

#[derive(Debug, Clone, Copy)]
struct ScheduledTask {
    due_tick: u64,
    generation: u64,
    action: DeferredAction,
}

/// Pending deferred actions, drained each tick.
#[derive(Debug, Default)]
pub struct Scheduler {
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn schedule(&mut self, due_tick: u64, generation: u64, action: DeferredAction) {
        self.tasks.push(ScheduledTask {
            due_tick,
            generation,
            action,
        });
    }

    /// Drop every pending task.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Remove and return the actions due at `tick` under the current
    /// `generation`. Due tasks from older generations are discarded
    /// without firing.
    pub fn take_due(&mut self, tick: u64, generation: u64) -> Vec<DeferredAction> {
        let mut due = Vec::new();
        self.tasks.retain(|task| {
            if task.due_tick > tick {
                return true;
            }
            if task.generation == generation {
                due.push(task.action);
            }
            false
        });
        due
    }
}
