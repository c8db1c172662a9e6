//! # ck-platform
//!
//! OS-facing adapters: the system clipboard, launch-at-login registration,
//! the in-process history backend with its polling capture runtime, and a
//! headless window.

pub mod autostart;
pub mod backend;
pub mod clipboard;
pub mod watcher;
pub mod window;

pub use autostart::system_autostart;
pub use backend::LocalBackend;
pub use clipboard::LocalClipboard;
pub use watcher::PollingCaptureRuntime;
pub use window::HeadlessWindow;
