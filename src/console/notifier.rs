//! Transient notifications for the terminal surface.
//!
//! 终端通知中心：打印新通知，并在配置的时长后使其过期。

use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use ck_core::ports::NotifierPort;
use ck_core::UiNotice;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::debug;

/// Keeps raised notices visible for `duration` and forwards each one to
/// the printer as it is raised.
pub struct NotificationCenter {
    duration: Duration,
    active: Mutex<VecDeque<(UiNotice, Instant)>>,
    printer: mpsc::UnboundedSender<UiNotice>,
}

impl NotificationCenter {
    pub fn new(duration: Duration) -> (Self, mpsc::UnboundedReceiver<UiNotice>) {
        let (printer, rx) = mpsc::unbounded_channel();
        let center = Self {
            duration,
            active: Mutex::new(VecDeque::new()),
            printer,
        };
        (center, rx)
    }

    /// Notices still within their visible duration, oldest first.
    pub fn active(&self) -> Vec<UiNotice> {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        prune_expired(&mut active, Instant::now());
        active.iter().map(|(notice, _)| notice.clone()).collect()
    }
}

/// Expiry times only grow, so expired notices sit at the front.
fn prune_expired(active: &mut VecDeque<(UiNotice, Instant)>, now: Instant) {
    while active.front().is_some_and(|(_, expires)| *expires <= now) {
        active.pop_front();
    }
}

impl NotifierPort for NotificationCenter {
    fn notify(&self, notice: UiNotice) {
        debug!(?notice, "Notice raised");
        {
            let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
            let now = Instant::now();
            prune_expired(&mut active, now);
            active.push_back((notice.clone(), now + self.duration));
        }

        if self.printer.send(notice).is_err() {
            debug!("Notice printer closed");
        }
    }
}
