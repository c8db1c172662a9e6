//! Push-channel bridging and teardown-aware notification delivery.

mod event_bridge;
mod notice_guard;

pub use event_bridge::{BridgeSubscription, EventBridge};
pub use notice_guard::GuardedNotifier;
