//! Render-facing state containers.

mod history_store;
mod optimistic;
mod preview;

pub use history_store::HistoryStore;
pub use optimistic::{OptimisticCell, PendingChange};
pub use preview::PreviewController;
