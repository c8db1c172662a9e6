//! Text rendering of history entries and notices.

use chrono::{DateTime, Utc};
use ck_core::{ClipboardEntry, EncodedImage, EntryKind, EntryTimestamp, NoticeLevel, TypeFilter, UiNotice};

const SUMMARY_CHARS: usize = 60;

/// `2024-01-01 12:00:00` for a valid timestamp, the raw millis otherwise.
pub fn format_timestamp(timestamp: EntryTimestamp) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp.as_millis())
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

/// One list row: `<ts>  <time>  <kind>  <summary>`.
pub fn list_line(entry: &ClipboardEntry) -> String {
    format!(
        "{:>14}  {}  {:<5}  {}",
        entry.timestamp,
        format_timestamp(entry.timestamp),
        entry.kind,
        summary(entry)
    )
}

pub fn list_header(filter: TypeFilter, shown: usize, total: usize) -> String {
    format!("history ({filter}): {shown} of {total} entries")
}

/// Full preview: text verbatim, images described by mime and size.
pub fn preview(entry: &ClipboardEntry) -> String {
    let body = match entry.kind {
        EntryKind::Text => entry.content.clone(),
        EntryKind::Image => describe_image(&entry.content),
    };
    format!(
        "preview {} ({}, {})\n{}",
        entry.timestamp,
        entry.kind,
        format_timestamp(entry.timestamp),
        body
    )
}

pub fn notice_line(notice: &UiNotice) -> String {
    let marker = match notice.level() {
        NoticeLevel::Success => "ok",
        NoticeLevel::Error => "!!",
    };
    format!("[{marker}] {}", notice.message())
}

fn summary(entry: &ClipboardEntry) -> String {
    match entry.kind {
        EntryKind::Text => {
            let first = entry.content.lines().next().unwrap_or_default();
            let mut line: String = first.chars().take(SUMMARY_CHARS).collect();
            if first.chars().count() > SUMMARY_CHARS || entry.content.lines().nth(1).is_some() {
                line.push('…');
            }
            line
        }
        EntryKind::Image => describe_image(&entry.content),
    }
}

fn describe_image(content: &str) -> String {
    match EncodedImage::parse_data_url(content) {
        Ok(image) => format!("[{} image, {} bytes]", image.mime, image.bytes.len()),
        Err(err) => format!("[unreadable image: {err}]"),
    }
}
