//! Error taxonomy surfaced to the user.
//!
//! Every variant is reported as a single transient notification, none are
//! retried automatically and none are fatal.

use thiserror::Error;

use crate::clipboard::{EntryKind, EntryTimestamp};

/// A fetched or pushed snapshot violated the snapshot invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSnapshot {
    #[error("snapshot contains duplicate timestamp {0}")]
    DuplicateTimestamp(EntryTimestamp),
}

/// Stage of the write-back pipeline that failed.
///
/// Stage detail is for logs only; the user sees a generic message per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteBackStage {
    /// Text payload rejected by the clipboard.
    TextWrite,
    /// Stored image could not be decoded into a bitmap.
    Decode,
    /// Bitmap could not be rendered onto the raster surface.
    Render,
    /// Raster surface could not be serialized into an image blob.
    Serialize,
    /// Image blob rejected by the clipboard.
    ImageWrite,
}

impl WriteBackStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteBackStage::TextWrite => "text_write",
            WriteBackStage::Decode => "decode",
            WriteBackStage::Render => "render",
            WriteBackStage::Serialize => "serialize",
            WriteBackStage::ImageWrite => "image_write",
        }
    }
}

impl std::fmt::Display for WriteBackStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to copy {kind} to the clipboard")]
pub struct WriteBackFailure {
    pub kind: EntryKind,
    pub stage: WriteBackStage,
    pub reason: String,
}

impl WriteBackFailure {
    pub fn new(kind: EntryKind, stage: WriteBackStage, reason: impl std::fmt::Display) -> Self {
        Self {
            kind,
            stage,
            reason: reason.to_string(),
        }
    }
}

/// The backend rejected an auto-start change; local state was rolled back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to set auto-start: {reason}")]
pub struct ToggleFailure {
    pub requested: bool,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to clear history: {reason}")]
pub struct ClearFailure {
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error(transparent)]
    InvalidSnapshot(#[from] InvalidSnapshot),

    #[error(transparent)]
    WriteBack(#[from] WriteBackFailure),

    #[error(transparent)]
    Toggle(#[from] ToggleFailure),

    #[error(transparent)]
    Clear(#[from] ClearFailure),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_back_message_names_the_path_generically() {
        let err = WriteBackFailure::new(EntryKind::Image, WriteBackStage::Decode, "bad header");
        assert_eq!(err.to_string(), "failed to copy image to the clipboard");
        assert_eq!(err.stage.as_str(), "decode");
    }

    #[test]
    fn core_error_is_transparent() {
        let err: CoreError = ToggleFailure {
            requested: true,
            reason: "access denied".into(),
        }
        .into();
        assert_eq!(err.to_string(), "failed to set auto-start: access denied");
    }
}
