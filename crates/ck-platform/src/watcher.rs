//! Polling clipboard capture runtime.
//!
//! Drives [`LocalBackend`] from the system clipboard on a fixed tick.
//! Text wins over images: a tick that records new text does not look at
//! the image slot.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ck_core::ports::SystemClipboardPort;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::backend::LocalBackend;

/// Shortest accepted tick. `tokio::time::interval` panics on zero.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

pub struct PollingCaptureRuntime {
    clipboard: Arc<dyn SystemClipboardPort>,
    backend: Arc<LocalBackend>,
    poll_interval: Duration,
    running: AtomicBool,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl PollingCaptureRuntime {
    pub fn new(
        clipboard: Arc<dyn SystemClipboardPort>,
        backend: Arc<LocalBackend>,
        poll_interval: Duration,
    ) -> Self {
        if poll_interval < MIN_POLL_INTERVAL {
            warn!(
                requested_ms = poll_interval.as_millis() as u64,
                "Poll interval too short, using the minimum"
            );
        }
        Self {
            clipboard,
            backend,
            poll_interval: poll_interval.max(MIN_POLL_INTERVAL),
            running: AtomicBool::new(false),
            handle: Mutex::new(None),
        }
    }

    pub async fn start(&self) {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return; // 幂等
        }

        let clipboard = self.clipboard.clone();
        let backend = self.backend.clone();
        let period = self.poll_interval;

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                capture_once(clipboard.as_ref(), &backend).await;
            }
        });

        *self.handle.lock().await = Some(handle);
        info!(interval_ms = period.as_millis() as u64, "Clipboard capture started");
    }

    pub async fn stop(&self) {
        if !self.running.swap(false, Ordering::AcqRel) {
            return;
        }

        if let Some(handle) = self.handle.lock().await.take() {
            handle.abort();
        }
        info!("Clipboard capture stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

/// One capture tick. Read failures are logged and never stop the loop.
pub async fn capture_once(clipboard: &dyn SystemClipboardPort, backend: &LocalBackend) {
    match clipboard.get_text().await {
        Ok(Some(text)) if !text.is_empty() => {
            if backend.record_text(&text) {
                return;
            }
        }
        Ok(_) => {}
        Err(err) => debug!(error = %err, "Clipboard text read failed"),
    }

    match clipboard.get_image().await {
        Ok(Some(png)) => {
            backend.record_image(&png);
        }
        Ok(None) => {}
        Err(err) => warn!(error = %err, "Clipboard image read failed"),
    }
}
