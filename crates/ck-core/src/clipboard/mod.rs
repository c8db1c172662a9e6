//! Clipboard history domain types.

mod entry;
mod filter;
mod image;
mod snapshot;
mod timestamp;

pub use entry::{ClipboardEntry, EntryKind};
pub use filter::{filter_entries, TypeFilter};
pub use image::{Bitmap, EncodedImage, ImageBlob, ImageDataError, RasterSurface, PNG_MIME};
pub use snapshot::HistorySnapshot;
pub use timestamp::EntryTimestamp;
