use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{ClipboardEntry, EntryKind, HistorySnapshot};

/// Type filter selected on the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Text,
    Image,
}

impl TypeFilter {
    pub fn matches(&self, kind: EntryKind) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Text => kind == EntryKind::Text,
            TypeFilter::Image => kind == EntryKind::Image,
        }
    }

    /// Derive the filtered view of a snapshot, preserving its order.
    pub fn apply<'a>(&self, snapshot: &'a HistorySnapshot) -> Vec<&'a ClipboardEntry> {
        filter_entries(snapshot.entries(), *self)
    }
}

impl From<EntryKind> for TypeFilter {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Text => TypeFilter::Text,
            EntryKind::Image => TypeFilter::Image,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TypeFilter::All => "all",
            TypeFilter::Text => "text",
            TypeFilter::Image => "image",
        })
    }
}

impl FromStr for TypeFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            other => other.parse::<EntryKind>().map(TypeFilter::from),
        }
    }
}

/// Keep the entries whose kind matches `filter`, in their original order.
pub fn filter_entries(entries: &[ClipboardEntry], filter: TypeFilter) -> Vec<&ClipboardEntry> {
    entries
        .iter()
        .filter(|entry| filter.matches(entry.kind))
        .collect()
}
