use anyhow::Result;
use tokio::sync::broadcast;

use crate::clipboard::ClipboardEntry;

/// Raw payload as the backend delivers it.
///
/// Unvalidated on purpose: the receiving side turns it into a
/// [`HistorySnapshot`](crate::clipboard::HistorySnapshot) and reports
/// `InvalidSnapshot` itself.
pub type HistoryPayload = Vec<ClipboardEntry>;

/// Pull side of the backend history contract.
///
/// 后端历史记录的拉取接口。
#[async_trait::async_trait]
pub trait ClipboardHistoryPort: Send + Sync {
    /// Current history, newest first (`GetClipboardHistory`).
    async fn get_history(&self) -> Result<HistoryPayload>;

    /// Clear backend-held history (`ClearHistory`).
    ///
    /// On success the backend pushes an empty payload on the update channel.
    async fn clear_history(&self) -> Result<()>;
}

/// Push side of the backend history contract (`clipboard-update`).
///
/// Every change is delivered as a complete payload, never as a delta.
pub trait HistoryChannelPort: Send + Sync {
    fn subscribe(&self) -> broadcast::Receiver<HistoryPayload>;
}
