//! # Clipboard view session / 剪贴板视图会话
//!
//! One mounted history view: the store, the bridge subscription, the
//! preview, the filter and the user actions that route to the
//! write-back pipeline, the toggle or the clear call.
//!
//! After [`ClipboardView::unmount`] no notice is delivered and no view
//! state changes, even for actions that were already in flight. Those
//! still return their result to the caller.

use std::sync::{Arc, Mutex, PoisonError};

use ck_core::config::AppConfig;
use ck_core::ports::{
    AutostartPort, ClipboardHistoryPort, HistoryChannelPort, ImageCodecPort, NotifierPort,
    SystemClipboardPort,
};
use ck_core::{
    ClearFailure, ClipboardEntry, CoreError, EntryTimestamp, HistorySnapshot, ToggleFailure,
    TypeFilter, UiNotice, WriteBackFailure,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::event::{BridgeSubscription, EventBridge, GuardedNotifier};
use crate::state::{HistoryStore, PreviewController};
use crate::usecases::{ClearHistory, SettingsToggle, WriteBackPipeline};

#[derive(Debug, thiserror::Error)]
pub enum CopyError {
    #[error("no history entry with timestamp {0}")]
    NotFound(EntryTimestamp),

    #[error(transparent)]
    WriteBack(#[from] WriteBackFailure),
}

/// Ports the view is built from.
pub struct ClipboardViewDeps {
    pub history: Arc<dyn ClipboardHistoryPort>,
    pub channel: Arc<dyn HistoryChannelPort>,
    pub clipboard: Arc<dyn SystemClipboardPort>,
    pub codec: Arc<dyn ImageCodecPort>,
    pub autostart: Arc<dyn AutostartPort>,
    pub notifier: Arc<dyn NotifierPort>,
}

pub struct ClipboardView {
    store: Arc<HistoryStore>,
    preview: Arc<PreviewController>,
    filter: Mutex<TypeFilter>,
    bridge: EventBridge,
    write_back: WriteBackPipeline,
    settings: SettingsToggle,
    clear: ClearHistory,
    notices: Arc<GuardedNotifier>,
    subscription: Mutex<Option<Arc<BridgeSubscription>>>,
    reconcile_task: Mutex<Option<JoinHandle<()>>>,
}

impl ClipboardView {
    pub fn new(deps: ClipboardViewDeps, config: &AppConfig) -> Self {
        let store = Arc::new(HistoryStore::new());
        let notices = Arc::new(GuardedNotifier::new(deps.notifier));

        Self {
            bridge: EventBridge::new(
                deps.history.clone(),
                deps.channel,
                store.clone(),
                notices.clone(),
            ),
            write_back: WriteBackPipeline::new(deps.clipboard, deps.codec)
                .with_single_flight(config.write_back.single_flight),
            settings: SettingsToggle::new(deps.autostart),
            clear: ClearHistory::new(deps.history),
            store,
            preview: Arc::new(PreviewController::new()),
            filter: Mutex::new(TypeFilter::All),
            notices,
            subscription: Mutex::new(None),
            reconcile_task: Mutex::new(None),
        }
    }

    /// Query the auto-start state, seed the history and subscribe.
    ///
    /// Mounting an already mounted view is a no-op, and so is mounting
    /// a view that has been unmounted. An [`unmount`](Self::unmount) that
    /// lands while this is suspended wins: nothing is applied afterwards.
    pub async fn mount(&self) {
        if self.is_mounted() || !self.notices.is_open() {
            return;
        }

        let enabled = self.settings.query().await;

        let attached = self.notices.while_open(|| {
            let mut slot = lock(&self.subscription);
            if slot.is_some() {
                return None;
            }
            self.settings.confirm(enabled);

            let subscription = Arc::new(self.bridge.attach());
            *slot = Some(subscription.clone());
            *lock(&self.reconcile_task) = Some(self.spawn_reconcile());
            Some(subscription)
        });
        let Some(subscription) = attached.flatten() else {
            debug!("Mount abandoned, view already mounted or unmounted");
            return;
        };

        self.bridge.start(&subscription).await;
        if !subscription.is_disposed() {
            info!("Clipboard view mounted");
        }
    }

    fn spawn_reconcile(&self) -> JoinHandle<()> {
        let mut snapshots = self.store.subscribe();
        let preview = self.preview.clone();
        tokio::spawn(async move {
            while snapshots.changed().await.is_ok() {
                let snapshot = snapshots.borrow_and_update().clone();
                if preview.reconcile(&snapshot) {
                    debug!("Preview closed by history update");
                }
            }
        })
    }

    /// Tear the view down. Idempotent.
    pub fn unmount(&self) {
        self.notices.close();

        if let Some(subscription) = lock(&self.subscription).take() {
            subscription.dispose();
        }
        if let Some(task) = lock(&self.reconcile_task).take() {
            task.abort();
            info!("Clipboard view unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        lock(&self.subscription).is_some()
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        self.store.current()
    }

    /// Wakes on every history replacement.
    pub fn subscribe(&self) -> watch::Receiver<HistorySnapshot> {
        self.store.subscribe()
    }

    pub fn filter(&self) -> TypeFilter {
        *lock(&self.filter)
    }

    pub fn set_filter(&self, filter: TypeFilter) {
        *lock(&self.filter) = filter;
    }

    /// The current snapshot seen through the selected filter.
    pub fn visible_entries(&self) -> Vec<ClipboardEntry> {
        let snapshot = self.store.current();
        self.filter()
            .apply(&snapshot)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Preview the entry with `timestamp`, replacing any active preview.
    pub fn open_preview(&self, timestamp: EntryTimestamp) -> Option<ClipboardEntry> {
        let entry = self.store.current().find(timestamp).cloned()?;
        self.preview.open(entry.clone());
        Some(entry)
    }

    pub fn close_preview(&self) -> Option<ClipboardEntry> {
        self.preview.close()
    }

    pub fn active_preview(&self) -> Option<ClipboardEntry> {
        self.preview.active()
    }

    /// Copy the entry with `timestamp` back to the system clipboard.
    pub async fn copy(&self, timestamp: EntryTimestamp) -> Result<(), CopyError> {
        let entry = self
            .store
            .current()
            .find(timestamp)
            .cloned()
            .ok_or(CopyError::NotFound(timestamp))?;

        self.copy_entry(&entry).await?;
        Ok(())
    }

    pub async fn copy_entry(&self, entry: &ClipboardEntry) -> Result<(), WriteBackFailure> {
        let result = self.write_back.execute(entry).await;
        self.notices.notify(match &result {
            Ok(()) => UiNotice::Copied { kind: entry.kind },
            Err(err) => UiNotice::from(&CoreError::from(err.clone())),
        });
        result
    }

    pub async fn clear_history(&self) -> Result<(), ClearFailure> {
        let result = self.clear.execute().await;
        self.notices.notify(match &result {
            Ok(()) => UiNotice::HistoryCleared,
            Err(err) => UiNotice::from(&CoreError::from(err.clone())),
        });
        result
    }

    pub fn autostart(&self) -> bool {
        self.settings.current()
    }

    pub async fn set_autostart(&self, enabled: bool) -> Result<bool, ToggleFailure> {
        let result = self.settings.toggle(enabled).await;
        self.notices.notify(match &result {
            Ok(enabled) => UiNotice::AutostartChanged { enabled: *enabled },
            Err(err) => UiNotice::from(&CoreError::from(err.clone())),
        });
        result
    }
}

impl Drop for ClipboardView {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
