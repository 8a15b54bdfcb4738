//! The combat log: the player-facing narrative of a match.
//!
//! Entries are stamped with the turn and a match-wide sequence number rather
//! than wall-clock time, so two replays of the same intents produce identical
//! logs. Observers keep a cursor and read deltas with [`CombatLog::since`].

use im::Vector;
use serde::{Deserialize, Serialize};

/// One line of the combat log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Turn during which the entry was written.
    pub turn: u32,
    /// Position in the log, starting at 0.
    pub sequence: u32,
    /// Human-readable text.
    pub text: String,
}

/// Append-only combat log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatLog {
    entries: Vector<LogEntry>,
}

impl CombatLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&mut self, turn: u32, text: impl Into<String>) {
        let sequence = self.entries.len() as u32;
        self.entries.push_back(LogEntry {
            turn,
            sequence,
            text: text.into(),
        });
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries at or after `cursor`.
    #[must_use]
    pub fn since(&self, cursor: usize) -> Vec<LogEntry> {
        self.entries.iter().skip(cursor).cloned().collect()
    }

    /// The most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Iterate over all entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }
}
