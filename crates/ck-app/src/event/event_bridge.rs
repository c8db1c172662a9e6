//! Bridges the backend `clipboard-update` channel into [`HistoryStore`].
//!
//! Each delivered payload is validated, compared against the cursor (the
//! newest timestamp of the most recently applied snapshot) and applied.
//! A "new entry" notice fires only when the incoming snapshot is non-empty
//! and its newest timestamp differs from the cursor.
//!
//! 将后端推送通道桥接到本地历史快照，并抑制重复的新条目通知。

use std::sync::{Arc, Mutex, PoisonError};

use ck_core::ports::{ClipboardHistoryPort, HistoryChannelPort, HistoryPayload, NotifierPort};
use ck_core::{CoreError, EntryKind, EntryTimestamp, HistorySnapshot, InvalidSnapshot, UiNotice};
use tokio::sync::broadcast::{
    self,
    error::{RecvError, TryRecvError},
};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::state::HistoryStore;

/// Mounts push-channel subscriptions for one view.
pub struct EventBridge {
    history: Arc<dyn ClipboardHistoryPort>,
    channel: Arc<dyn HistoryChannelPort>,
    store: Arc<HistoryStore>,
    notifier: Arc<dyn NotifierPort>,
}

struct BridgeState {
    alive: bool,
    cursor: Option<EntryTimestamp>,
}

/// State shared between the subscription handle and its delivery task.
struct BridgeShared {
    store: Arc<HistoryStore>,
    notifier: Arc<dyn NotifierPort>,
    state: Mutex<BridgeState>,
}

impl EventBridge {
    pub fn new(
        history: Arc<dyn ClipboardHistoryPort>,
        channel: Arc<dyn HistoryChannelPort>,
        store: Arc<HistoryStore>,
        notifier: Arc<dyn NotifierPort>,
    ) -> Self {
        Self {
            history,
            channel,
            store,
            notifier,
        }
    }

    /// Seed the store and start applying pushed snapshots.
    ///
    /// Shorthand for [`attach`](Self::attach) followed by
    /// [`start`](Self::start).
    ///
    /// Must be called from within a tokio runtime.
    pub async fn mount(&self) -> BridgeSubscription {
        let subscription = self.attach();
        self.start(&subscription).await;
        subscription
    }

    /// Subscribe to the push channel without fetching or applying anything.
    ///
    /// The returned handle can be disposed before [`start`](Self::start)
    /// runs, or while it is suspended.
    pub fn attach(&self) -> BridgeSubscription {
        let rx = self.channel.subscribe();
        BridgeSubscription {
            shared: Arc::new(BridgeShared {
                store: self.store.clone(),
                notifier: self.notifier.clone(),
                state: Mutex::new(BridgeState {
                    alive: true,
                    cursor: self.store.current().newest_timestamp(),
                }),
            }),
            pending_rx: Mutex::new(Some(rx)),
            task: Mutex::new(None),
        }
    }

    /// Seed the store from the backend, then apply pushed snapshots.
    ///
    /// The channel was subscribed in `attach`, before this fetch, so a
    /// change that races the fetch is still applied afterwards, in arrival
    /// order. The seed never raises a "new entry" notice. A failed fetch
    /// is logged and leaves the store untouched; pushes still flow. A
    /// subscription disposed before the fetch completes applies nothing.
    /// Starting twice is a no-op.
    pub async fn start(&self, subscription: &BridgeSubscription) {
        let span = info_span!("usecase.event_bridge.mount");

        async {
            let Some(rx) = subscription.take_pending_rx() else {
                debug!("Bridge already started or disposed");
                return;
            };

            match self.history.get_history().await {
                Ok(payload) => subscription.shared.seed(payload),
                Err(err) => warn!(error = %err, "Initial history fetch failed"),
            }

            let mut task = subscription
                .task
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if subscription.is_disposed() {
                debug!("Bridge disposed before the push channel was served");
                return;
            }
            *task = Some(tokio::spawn(
                deliver_loop(subscription.shared.clone(), rx)
                    .instrument(info_span!("event_bridge.deliver")),
            ));
            info!("History push channel subscribed");
        }
        .instrument(span)
        .await
    }
}

async fn deliver_loop(shared: Arc<BridgeShared>, mut rx: broadcast::Receiver<HistoryPayload>) {
    loop {
        let payload = match rx.recv().await {
            Ok(payload) => payload,
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "History channel lagged, skipping to newest snapshot");
                match drain_to_newest(&mut rx) {
                    Some(payload) => payload,
                    None => continue,
                }
            }
            Err(RecvError::Closed) => {
                debug!("History channel closed");
                break;
            }
        };

        if !shared.deliver(payload) {
            break;
        }
    }
}

fn drain_to_newest(rx: &mut broadcast::Receiver<HistoryPayload>) -> Option<HistoryPayload> {
    let mut newest = None;
    loop {
        match rx.try_recv() {
            Ok(payload) => newest = Some(payload),
            Err(TryRecvError::Lagged(_)) => continue,
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => return newest,
        }
    }
}

impl BridgeShared {
    fn lock(&self) -> std::sync::MutexGuard<'_, BridgeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn seed(&self, payload: HistoryPayload) {
        let mut state = self.lock();
        if !state.alive {
            return;
        }
        match HistorySnapshot::new(payload) {
            Ok(snapshot) => {
                state.cursor = snapshot.newest_timestamp();
                debug!(len = snapshot.len(), "Seeding history");
                self.store.replace(snapshot);
            }
            Err(err) => self.reject(err),
        }
    }

    /// Apply one pushed payload. Returns `false` once the bridge is disposed.
    fn deliver(&self, payload: HistoryPayload) -> bool {
        let mut state = self.lock();
        if !state.alive {
            return false;
        }

        let snapshot = match HistorySnapshot::new(payload) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                self.reject(err);
                return true;
            }
        };

        let signal = new_entry_signal(state.cursor, &snapshot);
        state.cursor = snapshot.newest_timestamp();
        self.store.replace(snapshot);

        if let Some(kind) = signal {
            self.notifier.notify(UiNotice::NewEntry { kind });
        }
        true
    }

    fn reject(&self, err: InvalidSnapshot) {
        error!(error = %err, "Rejected history snapshot");
        self.notifier.notify(UiNotice::from(&CoreError::from(err)));
    }
}

/// Kind of the genuinely new entry in `incoming`, if there is one.
fn new_entry_signal(cursor: Option<EntryTimestamp>, incoming: &HistorySnapshot) -> Option<EntryKind> {
    let newest = incoming.newest()?;
    if cursor == Some(newest.timestamp) {
        return None;
    }
    Some(newest.kind)
}

/// Handle for one mounted bridge.
///
/// Disposal is immediate and idempotent: after [`dispose`](Self::dispose)
/// returns, no snapshot is applied and no notice is raised by this bridge.
/// Dropping the handle disposes it.
pub struct BridgeSubscription {
    shared: Arc<BridgeShared>,
    pending_rx: Mutex<Option<broadcast::Receiver<HistoryPayload>>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl BridgeSubscription {
    fn take_pending_rx(&self) -> Option<broadcast::Receiver<HistoryPayload>> {
        self.pending_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    pub fn dispose(&self) {
        self.shared.lock().alive = false;
        self.take_pending_rx();

        let task = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(task) = task {
            task.abort();
            info!("History push channel unsubscribed");
        }
    }

    pub fn is_disposed(&self) -> bool {
        !self.shared.lock().alive
    }
}

impl Drop for BridgeSubscription {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ck_core::ClipboardEntry;
    use std::time::Duration;
    use tokio::sync::mpsc;

    struct MockHistory {
        seed: HistoryPayload,
        should_fail: bool,
    }

    #[async_trait]
    impl ClipboardHistoryPort for MockHistory {
        async fn get_history(&self) -> anyhow::Result<HistoryPayload> {
            if self.should_fail {
                return Err(anyhow::anyhow!("mock fetch failure"));
            }
            Ok(self.seed.clone())
        }

        async fn clear_history(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    struct MockChannel {
        tx: broadcast::Sender<HistoryPayload>,
    }

    impl HistoryChannelPort for MockChannel {
        fn subscribe(&self) -> broadcast::Receiver<HistoryPayload> {
            self.tx.subscribe()
        }
    }

    struct ChannelNotifier {
        tx: mpsc::UnboundedSender<UiNotice>,
    }

    impl NotifierPort for ChannelNotifier {
        fn notify(&self, notice: UiNotice) {
            let _ = self.tx.send(notice);
        }
    }

    struct Harness {
        bridge: EventBridge,
        store: Arc<HistoryStore>,
        push: broadcast::Sender<HistoryPayload>,
        notices: mpsc::UnboundedReceiver<UiNotice>,
    }

    fn harness(seed: HistoryPayload) -> Harness {
        let (push, _) = broadcast::channel(16);
        let (tx, notices) = mpsc::unbounded_channel();
        let store = Arc::new(HistoryStore::new());
        let bridge = EventBridge::new(
            Arc::new(MockHistory {
                seed,
                should_fail: false,
            }),
            Arc::new(MockChannel { tx: push.clone() }),
            store.clone(),
            Arc::new(ChannelNotifier { tx }),
        );
        Harness {
            bridge,
            store,
            push,
            notices,
        }
    }

    async fn push_and_wait(h: &Harness, payload: HistoryPayload) {
        let mut rx = h.store.subscribe();
        h.push.send(payload).unwrap();
        tokio::time::timeout(Duration::from_secs(1), rx.changed())
            .await
            .expect("store was not replaced")
            .unwrap();
    }

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[test]
    fn signal_requires_a_changed_newest_timestamp() {
        let one = HistorySnapshot::new(vec![ClipboardEntry::text(300, "hi")]).unwrap();

        assert_eq!(new_entry_signal(None, &one), Some(EntryKind::Text));
        assert_eq!(new_entry_signal(Some(EntryTimestamp::from_millis(300)), &one), None);
        assert_eq!(new_entry_signal(None, &HistorySnapshot::empty()), None);
    }

    #[tokio::test]
    async fn seed_does_not_signal() {
        let mut h = harness(vec![ClipboardEntry::text(1, "a")]);
        let _sub = h.bridge.mount().await;

        assert_eq!(h.store.current().len(), 1);
        assert!(h.notices.try_recv().is_err());
    }

    #[tokio::test]
    async fn disposed_before_start_applies_nothing() {
        let mut h = harness(vec![ClipboardEntry::text(1, "a")]);
        let sub = h.bridge.attach();
        sub.dispose();

        h.bridge.start(&sub).await;
        let _ = h.push.send(vec![ClipboardEntry::text(2, "b")]);
        settle().await;

        assert!(h.store.current().is_empty());
        assert!(h.notices.try_recv().is_err());
    }

    #[tokio::test]
    async fn starting_twice_is_a_no_op() {
        let h = harness(vec![ClipboardEntry::text(1, "a")]);
        let sub = h.bridge.attach();

        h.bridge.start(&sub).await;
        h.bridge.start(&sub).await;
        push_and_wait(&h, vec![ClipboardEntry::text(2, "b"), ClipboardEntry::text(1, "a")]).await;

        assert_eq!(h.store.current().len(), 2);
    }

    #[tokio::test]
    async fn first_entry_after_empty_store_signals_once() {
        let mut h = harness(vec![]);
        let _sub = h.bridge.mount().await;

        let payload = vec![ClipboardEntry::text(300, "hi")];
        push_and_wait(&h, payload.clone()).await;

        assert_eq!(Vec::from(h.store.current()), payload);
        assert_eq!(
            h.notices.try_recv().unwrap(),
            UiNotice::NewEntry {
                kind: EntryKind::Text
            }
        );
        assert!(h.notices.try_recv().is_err());
    }

    #[tokio::test]
    async fn same_newest_timestamp_does_not_signal_twice() {
        let mut h = harness(vec![]);
        let _sub = h.bridge.mount().await;

        let first = vec![ClipboardEntry::image(5, "data:image/png;base64,AA==")];
        push_and_wait(&h, first.clone()).await;
        push_and_wait(&h, first).await;

        assert_eq!(
            h.notices.try_recv().unwrap(),
            UiNotice::NewEntry {
                kind: EntryKind::Image
            }
        );
        assert!(h.notices.try_recv().is_err());

        push_and_wait(
            &h,
            vec![
                ClipboardEntry::text(6, "b"),
                ClipboardEntry::image(5, "data:image/png;base64,AA=="),
            ],
        )
        .await;
        assert_eq!(
            h.notices.try_recv().unwrap(),
            UiNotice::NewEntry {
                kind: EntryKind::Text
            }
        );
    }

    #[tokio::test]
    async fn cursor_tracks_the_last_applied_snapshot() {
        // S1 -> S2 -> S1 again must signal on every change, not compare to the seed.
        let mut h = harness(vec![ClipboardEntry::text(1, "a")]);
        let _sub = h.bridge.mount().await;

        push_and_wait(&h, vec![ClipboardEntry::text(2, "b"), ClipboardEntry::text(1, "a")]).await;
        push_and_wait(&h, vec![ClipboardEntry::text(1, "a")]).await;

        assert!(h.notices.try_recv().is_ok());
        assert!(h.notices.try_recv().is_ok());
        assert!(h.notices.try_recv().is_err());
    }

    #[tokio::test]
    async fn empty_push_after_clear_does_not_signal() {
        let mut h = harness(vec![ClipboardEntry::text(1, "a")]);
        let _sub = h.bridge.mount().await;

        push_and_wait(&h, vec![]).await;

        assert!(h.store.current().is_empty());
        assert!(h.notices.try_recv().is_err());
    }

    #[tokio::test]
    async fn invalid_payload_is_reported_and_not_applied() {
        let mut h = harness(vec![ClipboardEntry::text(1, "a")]);
        let _sub = h.bridge.mount().await;

        h.push
            .send(vec![ClipboardEntry::text(9, "x"), ClipboardEntry::text(9, "y")])
            .unwrap();
        let notice = tokio::time::timeout(Duration::from_secs(1), h.notices.recv())
            .await
            .unwrap()
            .unwrap();

        assert!(matches!(notice, UiNotice::InvalidSnapshot { .. }));
        assert_eq!(
            h.store.current().newest_timestamp(),
            Some(EntryTimestamp::from_millis(1))
        );

        // Cursor still points at the seed, so re-pushing it stays silent.
        push_and_wait(&h, vec![ClipboardEntry::text(1, "a")]).await;
        assert!(h.notices.try_recv().is_err());
    }

    #[tokio::test]
    async fn failed_fetch_still_subscribes() {
        let (push, _) = broadcast::channel(4);
        let (tx, mut notices) = mpsc::unbounded_channel();
        let store = Arc::new(HistoryStore::new());
        let bridge = EventBridge::new(
            Arc::new(MockHistory {
                seed: vec![],
                should_fail: true,
            }),
            Arc::new(MockChannel { tx: push.clone() }),
            store.clone(),
            Arc::new(ChannelNotifier { tx }),
        );

        let _sub = bridge.mount().await;
        let mut rx = store.subscribe();
        push.send(vec![ClipboardEntry::text(3, "c")]).unwrap();
        rx.changed().await.unwrap();

        assert_eq!(store.current().len(), 1);
        assert!(notices.try_recv().is_ok());
    }

    #[tokio::test]
    async fn disposed_bridge_applies_nothing() {
        let mut h = harness(vec![]);
        let sub = h.bridge.mount().await;

        sub.dispose();
        sub.dispose();
        assert!(sub.is_disposed());

        let _ = h.push.send(vec![ClipboardEntry::text(4, "d")]);
        settle().await;

        assert!(h.store.current().is_empty());
        assert!(h.notices.try_recv().is_err());
    }

    #[tokio::test]
    async fn dropping_the_handle_disposes() {
        let mut h = harness(vec![]);
        drop(h.bridge.mount().await);

        let _ = h.push.send(vec![ClipboardEntry::text(4, "d")]);
        settle().await;

        assert!(h.store.current().is_empty());
        assert!(h.notices.try_recv().is_err());
    }

    #[tokio::test]
    async fn lagged_receiver_converges_on_newest() {
        let (push, _) = broadcast::channel(2);
        let (tx, _notices) = mpsc::unbounded_channel();
        let store = Arc::new(HistoryStore::new());
        let bridge = EventBridge::new(
            Arc::new(MockHistory {
                seed: vec![],
                should_fail: false,
            }),
            Arc::new(MockChannel { tx: push.clone() }),
            store.clone(),
            Arc::new(ChannelNotifier { tx }),
        );
        let _sub = bridge.mount().await;

        // No await between sends: the delivery task cannot run, so it lags.
        for ts in 1..=5_i64 {
            push.send(vec![ClipboardEntry::text(ts, ts.to_string())]).unwrap();
        }
        settle().await;

        assert_eq!(
            store.current().newest_timestamp(),
            Some(EntryTimestamp::from_millis(5))
        );
    }
}
