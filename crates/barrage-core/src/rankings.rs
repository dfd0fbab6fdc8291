//! PvE ranking board.
//!
//! The engine reports `GameOver { level, score }`; turning that into a
//! ranked entry (and persisting the board) is the presentation layer's job.
//! This module only owns the data shape and the ordering rules.

use serde::{Deserialize, Serialize};

/// Maximum number of entries kept on the board.
pub const MAX_RANKING_ENTRIES: usize = 5;

/// A single ranked run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingEntry {
    pub name: String,
    /// PvE level reached.
    pub level: u32,
    pub score: u64,
    /// Display date, formatted by the caller (the core keeps no clock).
    pub date: String,
}

/// Top-5 board, sorted descending by score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankingBoard {
    pub entries: Vec<RankingEntry>,
}

impl RankingBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a score would make the board.
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_RANKING_ENTRIES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Insert a run, keeping the board sorted and truncated.
    /// Returns the 1-indexed rank achieved, or None if it fell off the board.
    pub fn add_entry(&mut self, entry: RankingEntry) -> Option<usize> {
        if !self.qualifies(entry.score) {
            return None;
        }

        let pos = self
            .entries
            .iter()
            .position(|e| entry.score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_RANKING_ENTRIES);

        Some(pos + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The best recorded score, if any.
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}
