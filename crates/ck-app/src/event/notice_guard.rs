use std::sync::{Arc, Mutex, PoisonError};

use ck_core::ports::NotifierPort;
use ck_core::UiNotice;
use tracing::debug;

/// Notifier that stops delivering once its owner is torn down.
///
/// The alive check and the delivery happen under one lock, so a notice
/// raised concurrently with [`close`](Self::close) is either delivered
/// before teardown completes or not at all.
pub struct GuardedNotifier {
    inner: Arc<dyn NotifierPort>,
    alive: Mutex<bool>,
}

impl GuardedNotifier {
    pub fn new(inner: Arc<dyn NotifierPort>) -> Self {
        Self {
            inner,
            alive: Mutex::new(true),
        }
    }

    /// Idempotent.
    pub fn close(&self) {
        *self.alive.lock().unwrap_or_else(PoisonError::into_inner) = false;
    }

    pub fn is_open(&self) -> bool {
        *self.alive.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` only if still open. `close` waits until `f` has returned.
    pub fn while_open<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        let alive = self.alive.lock().unwrap_or_else(PoisonError::into_inner);
        if !*alive {
            return None;
        }
        Some(f())
    }
}

impl NotifierPort for GuardedNotifier {
    fn notify(&self, notice: UiNotice) {
        let alive = self.alive.lock().unwrap_or_else(PoisonError::into_inner);
        if !*alive {
            debug!(?notice, "Dropping notice raised after teardown");
            return;
        }
        self.inner.notify(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ck_core::EntryKind;

    #[derive(Default)]
    struct RecordingNotifier {
        notices: Mutex<Vec<UiNotice>>,
    }

    impl NotifierPort for RecordingNotifier {
        fn notify(&self, notice: UiNotice) {
            self.notices.lock().unwrap().push(notice);
        }
    }

    #[test]
    fn delivers_until_closed() {
        let inner = Arc::new(RecordingNotifier::default());
        let guard = GuardedNotifier::new(inner.clone());

        guard.notify(UiNotice::Copied {
            kind: EntryKind::Text,
        });
        guard.close();
        guard.close();
        guard.notify(UiNotice::HistoryCleared);

        assert!(!guard.is_open());
        assert_eq!(
            inner.notices.lock().unwrap().as_slice(),
            &[UiNotice::Copied {
                kind: EntryKind::Text
            }]
        );
    }

    #[test]
    fn while_open_runs_only_before_close() {
        let guard = GuardedNotifier::new(Arc::new(RecordingNotifier::default()));

        assert_eq!(guard.while_open(|| 1), Some(1));
        guard.close();
        assert_eq!(guard.while_open(|| 2), None);
    }
}
