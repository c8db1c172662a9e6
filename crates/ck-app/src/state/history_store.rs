use ck_core::HistorySnapshot;
use tokio::sync::watch;
use tracing::debug;

/// Holds the current history snapshot.
///
/// Replacement is whole-value and atomic: readers see either the previous
/// snapshot or the new one, never a mix. Subscribers are woken on every
/// replace and re-derive their own views; they never write back.
///
/// 当前历史快照的唯一持有者。
pub struct HistoryStore {
    tx: watch::Sender<HistorySnapshot>,
}

impl HistoryStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(HistorySnapshot::empty());
        Self { tx }
    }

    pub fn replace(&self, snapshot: HistorySnapshot) {
        debug!(
            len = snapshot.len(),
            newest = ?snapshot.newest_timestamp(),
            "Replacing history snapshot"
        );
        self.tx.send_replace(snapshot);
    }

    pub fn current(&self) -> HistorySnapshot {
        self.tx.borrow().clone()
    }

    /// The returned receiver treats the current snapshot as already seen.
    pub fn subscribe(&self) -> watch::Receiver<HistorySnapshot> {
        self.tx.subscribe()
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ck_core::{ClipboardEntry, EntryTimestamp};

    fn snapshot(entries: Vec<ClipboardEntry>) -> HistorySnapshot {
        HistorySnapshot::new(entries).unwrap()
    }

    #[test]
    fn starts_empty() {
        assert!(HistoryStore::new().current().is_empty());
    }

    #[test]
    fn replace_swaps_the_whole_snapshot() {
        let store = HistoryStore::new();
        store.replace(snapshot(vec![
            ClipboardEntry::text(2, "b"),
            ClipboardEntry::text(1, "a"),
        ]));
        store.replace(snapshot(vec![ClipboardEntry::text(3, "c")]));

        let current = store.current();
        assert_eq!(current.len(), 1);
        assert_eq!(current.newest_timestamp(), Some(EntryTimestamp::from_millis(3)));
    }

    #[test]
    fn readers_keep_the_snapshot_they_took() {
        let store = HistoryStore::new();
        store.replace(snapshot(vec![ClipboardEntry::text(1, "a")]));
        let before = store.current();

        store.replace(HistorySnapshot::empty());

        assert_eq!(before.len(), 1);
        assert!(store.current().is_empty());
    }

    #[tokio::test]
    async fn subscribers_are_notified_of_replacement() {
        let store = HistoryStore::new();
        let mut rx = store.subscribe();

        store.replace(snapshot(vec![ClipboardEntry::text(7, "g")]));

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().len(), 1);
    }
}
