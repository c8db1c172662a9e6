use std::sync::{Mutex, PoisonError};

use ck_core::{ClipboardEntry, HistorySnapshot};
use tracing::debug;

/// Tracks the single entry currently shown in the preview.
///
/// Opening a new entry replaces the active one, there is no stacking.
/// The active entry closes itself once a replaced snapshot no longer
/// contains its timestamp.
#[derive(Default)]
pub struct PreviewController {
    active: Mutex<Option<ClipboardEntry>>,
}

impl PreviewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&self, entry: ClipboardEntry) {
        debug!(timestamp = %entry.timestamp, kind = %entry.kind, "Opening preview");
        *self.lock() = Some(entry);
    }

    pub fn close(&self) -> Option<ClipboardEntry> {
        self.lock().take()
    }

    pub fn active(&self) -> Option<ClipboardEntry> {
        self.lock().clone()
    }

    pub fn is_open(&self) -> bool {
        self.lock().is_some()
    }

    /// Close the preview if `snapshot` dropped the active entry.
    ///
    /// Returns `true` when the preview was closed by this call.
    pub fn reconcile(&self, snapshot: &HistorySnapshot) -> bool {
        let mut active = self.lock();
        match active.as_ref() {
            Some(entry) if !snapshot.contains(entry.timestamp) => {
                debug!(timestamp = %entry.timestamp, "Active preview vanished from history, closing");
                *active = None;
                true
            }
            _ => false,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<ClipboardEntry>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_replaces_the_active_entry() {
        let preview = PreviewController::new();
        preview.open(ClipboardEntry::text(1, "a"));
        preview.open(ClipboardEntry::text(2, "b"));

        assert_eq!(preview.active(), Some(ClipboardEntry::text(2, "b")));
        assert_eq!(preview.close(), Some(ClipboardEntry::text(2, "b")));
        assert!(!preview.is_open());
    }

    #[test]
    fn reconcile_keeps_entry_still_present() {
        let preview = PreviewController::new();
        preview.open(ClipboardEntry::text(1, "a"));

        let snapshot = HistorySnapshot::new(vec![
            ClipboardEntry::text(2, "b"),
            ClipboardEntry::text(1, "a"),
        ])
        .unwrap();

        assert!(!preview.reconcile(&snapshot));
        assert!(preview.is_open());
    }

    #[test]
    fn reconcile_closes_after_clear() {
        let preview = PreviewController::new();
        preview.open(ClipboardEntry::image(4, "data:image/png;base64,AA=="));

        assert!(preview.reconcile(&HistorySnapshot::empty()));
        assert_eq!(preview.active(), None);
    }

    #[test]
    fn reconcile_without_active_entry_is_a_no_op() {
        let preview = PreviewController::new();
        assert!(!preview.reconcile(&HistorySnapshot::empty()));
    }
}
