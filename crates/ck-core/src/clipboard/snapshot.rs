use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

use super::{ClipboardEntry, EntryTimestamp};
use crate::error::InvalidSnapshot;

/// The complete, ordered set of clipboard entries at one instant.
///
/// Newest first, no duplicate timestamps. Always a complete replacement,
/// never a delta. Cloning is cheap: entries are shared behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ClipboardEntry>", into = "Vec<ClipboardEntry>")]
pub struct HistorySnapshot {
    entries: Arc<[ClipboardEntry]>,
}

impl HistorySnapshot {
    /// Build a snapshot, rejecting duplicate timestamps.
    ///
    /// Order is taken as given: the producer guarantees newest-first.
    pub fn new(entries: Vec<ClipboardEntry>) -> Result<Self, InvalidSnapshot> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.timestamp) {
                return Err(InvalidSnapshot::DuplicateTimestamp(entry.timestamp));
            }
        }

        Ok(Self {
            entries: entries.into(),
        })
    }

    pub fn empty() -> Self {
        Self {
            entries: Arc::from(Vec::new()),
        }
    }

    pub fn entries(&self) -> &[ClipboardEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClipboardEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The newest entry, i.e. the head of the newest-first sequence.
    pub fn newest(&self) -> Option<&ClipboardEntry> {
        self.entries.first()
    }

    pub fn newest_timestamp(&self) -> Option<EntryTimestamp> {
        self.newest().map(|entry| entry.timestamp)
    }

    pub fn find(&self, timestamp: EntryTimestamp) -> Option<&ClipboardEntry> {
        self.entries.iter().find(|entry| entry.timestamp == timestamp)
    }

    pub fn contains(&self, timestamp: EntryTimestamp) -> bool {
        self.find(timestamp).is_some()
    }
}

impl Default for HistorySnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Vec<ClipboardEntry>> for HistorySnapshot {
    type Error = InvalidSnapshot;

    fn try_from(entries: Vec<ClipboardEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<HistorySnapshot> for Vec<ClipboardEntry> {
    fn from(snapshot: HistorySnapshot) -> Self {
        snapshot.entries.to_vec()
    }
}

impl<'a> IntoIterator for &'a HistorySnapshot {
    type Item = &'a ClipboardEntry;
    type IntoIter = std::slice::Iter<'a, ClipboardEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
