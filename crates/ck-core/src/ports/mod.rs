//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases in `ck-app` and the
//! adapters in `ck-infra` / `ck-platform`. Everything the core consumes from
//! the backend service goes through one of these traits.

mod autostart;
mod clock;
mod history;
mod image_codec;
mod notifier;
mod system_clipboard;
mod window;

pub use autostart::AutostartPort;
pub use clock::ClockPort;
pub use history::{ClipboardHistoryPort, HistoryChannelPort, HistoryPayload};
pub use image_codec::ImageCodecPort;
pub use notifier::NotifierPort;
pub use system_clipboard::SystemClipboardPort;
pub use window::WindowPort;
