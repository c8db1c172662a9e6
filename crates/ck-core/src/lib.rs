//! # ck-core
//!
//! Core domain models and port contracts for clipkeep.
//!
//! This crate contains pure domain logic without any infrastructure dependencies.

pub mod clipboard;
pub mod config;
pub mod error;
pub mod notice;
pub mod ports;

// Re-export commonly used types at the crate root
pub use clipboard::{
    Bitmap, ClipboardEntry, EncodedImage, EntryKind, EntryTimestamp, HistorySnapshot, ImageBlob,
    RasterSurface, TypeFilter,
};
pub use config::AppConfig;
pub use error::{
    ClearFailure, CoreError, InvalidSnapshot, ToggleFailure, WriteBackFailure, WriteBackStage,
};
pub use notice::{NoticeLevel, UiNotice};
