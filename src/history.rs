//! In-session command history
//!
//! Keeps every non-empty line the dispatcher accepted, in order, for
//! the lifetime of the session. Entries are never removed or
//! deduplicated, so recall indices printed by `history` stay valid for
//! the whole session. Nothing is written to disk.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A single remembered command line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Zero-based insertion index, stable for the session
    pub index: usize,
    /// The line exactly as the user submitted it (after trimming)
    pub text: String,
    /// When the line was accepted
    pub timestamp: DateTime<Local>,
}

/// Append-only history of accepted command lines
#[derive(Debug, Clone, Default)]
pub struct HistoryRing {
    entries: Vec<HistoryEntry>,
}

impl HistoryRing {
    /// Create an empty ring
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a line and return its index
    ///
    /// Duplicates are kept; indices are handed out in insertion order
    /// and never reused.
    pub fn append(&mut self, text: impl Into<String>) -> usize {
        let index = self.entries.len();
        self.entries.push(HistoryEntry {
            index,
            text: text.into(),
            timestamp: Local::now(),
        });
        index
    }

    /// Look up an entry by its index
    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// The most recently recorded entry
    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }
}

/// Stepper for arrow-key recall over a [`HistoryRing`]
///
/// The cursor sits between the newest entry and the empty draft line.
/// Stepping back walks toward the oldest entry; stepping forward past
/// the newest entry yields the empty draft again. The frontend resets
/// the cursor after each accepted line.
#[derive(Debug, Clone, Default)]
pub struct HistoryCursor {
    position: usize,
}

impl HistoryCursor {
    /// Create a cursor positioned on the empty draft after the newest entry
    pub fn at_end(ring: &HistoryRing) -> Self {
        Self {
            position: ring.len(),
        }
    }

    /// Step back toward older entries
    ///
    /// Returns the entry text to show, or `None` when already at the
    /// oldest entry (the shown text should not change).
    pub fn previous<'a>(&mut self, ring: &'a HistoryRing) -> Option<&'a str> {
        if self.position == 0 {
            return None;
        }
        self.position -= 1;
        ring.get(self.position).map(|entry| entry.text.as_str())
    }

    /// Step forward toward newer entries
    ///
    /// Stepping past the newest entry returns the empty draft; further
    /// steps return `None`.
    pub fn next<'a>(&mut self, ring: &'a HistoryRing) -> Option<&'a str> {
        if self.position + 1 < ring.len() {
            self.position += 1;
            ring.get(self.position).map(|entry| entry.text.as_str())
        } else if self.position < ring.len() {
            self.position += 1;
            Some("")
        } else {
            None
        }
    }

    /// Re-seat the cursor on the empty draft
    pub fn reset(&mut self, ring: &HistoryRing) {
        self.position = ring.len();
    }
}
