//! Transient user-facing notifications.
//!
//! 发送到界面的临时通知。

use serde::{Deserialize, Serialize};

use crate::clipboard::EntryKind;
use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A notification raised by the core for the rendering surface.
///
/// The surface decides how long a notice stays visible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiNotice {
    /// A genuinely new entry arrived on the push channel.
    NewEntry { kind: EntryKind },
    Copied { kind: EntryKind },
    CopyFailed { kind: EntryKind },
    HistoryCleared,
    ClearFailed { reason: String },
    AutostartChanged { enabled: bool },
    AutostartFailed { reason: String },
    InvalidSnapshot { reason: String },
}

impl UiNotice {
    pub fn level(&self) -> NoticeLevel {
        match self {
            UiNotice::NewEntry { .. }
            | UiNotice::Copied { .. }
            | UiNotice::HistoryCleared
            | UiNotice::AutostartChanged { .. } => NoticeLevel::Success,
            UiNotice::CopyFailed { .. }
            | UiNotice::ClearFailed { .. }
            | UiNotice::AutostartFailed { .. }
            | UiNotice::InvalidSnapshot { .. } => NoticeLevel::Error,
        }
    }

    pub fn message(&self) -> String {
        match self {
            UiNotice::NewEntry { kind } => format!("New {kind} added to history"),
            UiNotice::Copied { kind } => format!("{} copied to clipboard", capitalize(kind.as_str())),
            UiNotice::CopyFailed { kind } => format!("Failed to copy {kind}"),
            UiNotice::HistoryCleared => "History cleared".to_string(),
            UiNotice::ClearFailed { .. } => "Failed to clear history".to_string(),
            UiNotice::AutostartChanged { enabled: true } => "Launch at login enabled".to_string(),
            UiNotice::AutostartChanged { enabled: false } => "Launch at login disabled".to_string(),
            UiNotice::AutostartFailed { reason } => format!("Failed to change launch at login: {reason}"),
            UiNotice::InvalidSnapshot { reason } => format!("Ignored invalid history update: {reason}"),
        }
    }
}

impl From<&CoreError> for UiNotice {
    fn from(err: &CoreError) -> Self {
        match err {
            CoreError::InvalidSnapshot(e) => UiNotice::InvalidSnapshot {
                reason: e.to_string(),
            },
            CoreError::WriteBack(e) => UiNotice::CopyFailed { kind: e.kind },
            CoreError::Toggle(e) => UiNotice::AutostartFailed {
                reason: e.reason.clone(),
            },
            CoreError::Clear(e) => UiNotice::ClearFailed {
                reason: e.reason.clone(),
            },
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ClearFailure, WriteBackFailure, WriteBackStage};

    #[test]
    fn notice_serializes_with_type_tag() {
        let value = serde_json::to_value(UiNotice::NewEntry {
            kind: EntryKind::Text,
        })
        .unwrap();
        assert_eq!(value, serde_json::json!({ "type": "NewEntry", "kind": "text" }));
    }

    #[test]
    fn errors_map_to_error_level_notices() {
        let write_back: CoreError =
            WriteBackFailure::new(EntryKind::Image, WriteBackStage::ImageWrite, "denied").into();
        let notice = UiNotice::from(&write_back);
        assert_eq!(notice, UiNotice::CopyFailed { kind: EntryKind::Image });
        assert_eq!(notice.level(), NoticeLevel::Error);

        let clear: CoreError = ClearFailure {
            reason: "busy".into(),
        }
        .into();
        assert_eq!(UiNotice::from(&clear).level(), NoticeLevel::Error);
    }

    #[test]
    fn copied_message_is_capitalized() {
        assert_eq!(
            UiNotice::Copied { kind: EntryKind::Text }.message(),
            "Text copied to clipboard"
        );
    }
}
