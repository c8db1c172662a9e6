use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::EntryTimestamp;

/// Kind of payload a clipboard entry carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Text,
    Image,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Text => "text",
            EntryKind::Image => "image",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(EntryKind::Text),
            "image" => Ok(EntryKind::Image),
            other => Err(anyhow::anyhow!("unknown entry kind: {other}")),
        }
    }
}

/// One clipboard capture, immutable once observed.
///
/// For [`EntryKind::Text`] the content is the raw string payload. For
/// [`EntryKind::Image`] it is a self-describing encoded image (a
/// `data:image/...;base64,` URL) that a rendering surface can display
/// directly, but which must be decoded before it can be written back.
///
/// 剪贴板条目：一旦被观察到即不可变。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardEntry {
    pub timestamp: EntryTimestamp,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub content: String,
}

impl ClipboardEntry {
    pub fn new(timestamp: EntryTimestamp, kind: EntryKind, content: impl Into<String>) -> Self {
        Self {
            timestamp,
            kind,
            content: content.into(),
        }
    }

    /// Text entry stamped with `millis` since the Unix epoch.
    pub fn text(millis: i64, content: impl Into<String>) -> Self {
        Self::new(EntryTimestamp::from_millis(millis), EntryKind::Text, content)
    }

    pub fn image(millis: i64, data_url: impl Into<String>) -> Self {
        Self::new(EntryTimestamp::from_millis(millis), EntryKind::Image, data_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_uses_type_field_on_the_wire() {
        let entry = ClipboardEntry::text(300, "hi");
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "timestamp": 300, "type": "text", "content": "hi" })
        );
    }

    #[test]
    fn entry_kind_parses_case_insensitively() {
        assert_eq!("Image".parse::<EntryKind>().unwrap(), EntryKind::Image);
        assert!("html".parse::<EntryKind>().is_err());
    }
}
