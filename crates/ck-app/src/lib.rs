//! clipkeep application layer
//!
//! The synchronization protocol between the backend push channel and the
//! render-facing history, the write-back pipeline and the optimistic
//! auto-start toggle. Everything here talks to the outside world only
//! through `ck_core::ports`.

pub mod event;
pub mod state;
pub mod usecases;
pub mod view;

pub use event::{BridgeSubscription, EventBridge, GuardedNotifier};
pub use state::{HistoryStore, OptimisticCell, PendingChange, PreviewController};
pub use usecases::{ClearHistory, SettingsToggle, WriteBackPipeline};
pub use view::{ClipboardView, ClipboardViewDeps, CopyError};
