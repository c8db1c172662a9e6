//! In-process history backend.
//!
//! Owns the captured history, answers `GetClipboardHistory` /
//! `ClearHistory`, and pushes the full history on `clipboard-update`
//! after every change.
//!
//! 进程内历史后端：持有捕获的历史并在每次变化后推送完整快照。

use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Result;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use ck_core::clipboard::PNG_MIME;
use ck_core::ports::{ClipboardHistoryPort, ClockPort, HistoryChannelPort, HistoryPayload};
use ck_core::{ClipboardEntry, EntryKind, EntryTimestamp};
use sha2::{Digest, Sha256};
use tokio::sync::broadcast;
use tracing::{debug, info};

const UPDATE_CHANNEL_CAPACITY: usize = 16;

pub struct LocalBackend {
    clock: Arc<dyn ClockPort>,
    max_history: usize,
    state: Mutex<BackendState>,
    updates: broadcast::Sender<HistoryPayload>,
}

#[derive(Default)]
struct BackendState {
    entries: Vec<ClipboardEntry>,
    last_timestamp: Option<i64>,
    last_text: Option<String>,
    last_image_hash: Option<[u8; 32]>,
}

impl LocalBackend {
    pub fn new(clock: Arc<dyn ClockPort>, max_history: usize) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self {
            clock,
            max_history,
            state: Mutex::new(BackendState::default()),
            updates,
        }
    }

    /// Record captured text. Returns `false` if it repeats the last capture.
    pub fn record_text(&self, text: &str) -> bool {
        let mut state = self.lock();
        if state.last_text.as_deref() == Some(text) {
            return false;
        }
        state.last_text = Some(text.to_string());
        self.prepend(&mut state, EntryKind::Text, text.to_string());
        true
    }

    /// Record a captured PNG. Returns `false` if it repeats the last capture.
    pub fn record_image(&self, png: &[u8]) -> bool {
        let hash: [u8; 32] = Sha256::digest(png).into();
        let mut state = self.lock();
        if state.last_image_hash == Some(hash) {
            return false;
        }
        state.last_image_hash = Some(hash);
        let content = format!("data:{};base64,{}", PNG_MIME, STANDARD.encode(png));
        self.prepend(&mut state, EntryKind::Image, content);
        true
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn prepend(&self, state: &mut BackendState, kind: EntryKind, content: String) {
        let now = self.clock.now_ms();
        let timestamp = match state.last_timestamp {
            Some(last) if now <= last => last + 1,
            _ => now,
        };
        state.last_timestamp = Some(timestamp);

        state.entries.insert(
            0,
            ClipboardEntry::new(EntryTimestamp::from_millis(timestamp), kind, content),
        );
        state.entries.truncate(self.max_history);

        debug!(%kind, timestamp, len = state.entries.len(), "Captured clipboard entry");
        self.publish(state);
    }

    fn publish(&self, state: &BackendState) {
        // No receivers is fine: nobody is looking at the history yet.
        if self.updates.send(state.entries.clone()).is_err() {
            debug!("No history subscribers");
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BackendState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ClipboardHistoryPort for LocalBackend {
    async fn get_history(&self) -> Result<HistoryPayload> {
        Ok(self.lock().entries.clone())
    }

    async fn clear_history(&self) -> Result<()> {
        let mut state = self.lock();
        state.entries.clear();
        info!("Backend history cleared");
        self.publish(&state);
        Ok(())
    }
}

impl HistoryChannelPort for LocalBackend {
    fn subscribe(&self) -> broadcast::Receiver<HistoryPayload> {
        self.updates.subscribe()
    }
}
