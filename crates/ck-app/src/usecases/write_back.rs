//! 将历史条目写回系统剪贴板的用例

use std::sync::Arc;

use ck_core::ports::{ImageCodecPort, SystemClipboardPort};
use ck_core::{ClipboardEntry, EncodedImage, EntryKind, WriteBackFailure, WriteBackStage};
use tokio::sync::Mutex;
use tracing::{info, info_span, warn, Instrument};

/// Writes a historical entry back onto the live system clipboard.
///
/// Text is a single clipboard write. Images go through decode, render at
/// native size, serialize, then the clipboard write; each stage fails
/// independently and none is retried. The failing stage is logged, the
/// caller only learns that the image path failed.
///
/// Concurrent invocations are not serialized unless single-flight is
/// enabled: each runs its own sequence and the last completed OS write
/// wins. With single-flight, later invocations queue in FIFO order
/// behind the one in flight.
pub struct WriteBackPipeline {
    clipboard: Arc<dyn SystemClipboardPort>,
    codec: Arc<dyn ImageCodecPort>,
    single_flight: Option<Mutex<()>>,
}

impl WriteBackPipeline {
    pub fn new(clipboard: Arc<dyn SystemClipboardPort>, codec: Arc<dyn ImageCodecPort>) -> Self {
        Self {
            clipboard,
            codec,
            single_flight: None,
        }
    }

    pub fn with_single_flight(mut self, enabled: bool) -> Self {
        self.single_flight = enabled.then(|| Mutex::new(()));
        self
    }

    pub async fn execute(&self, entry: &ClipboardEntry) -> Result<(), WriteBackFailure> {
        let span = info_span!(
            "usecase.write_back.execute",
            timestamp = %entry.timestamp,
            kind = %entry.kind,
        );

        async {
            let _in_flight = match &self.single_flight {
                Some(lock) => Some(lock.lock().await),
                None => None,
            };

            match entry.kind {
                EntryKind::Text => self.write_text(&entry.content).await?,
                EntryKind::Image => self.write_image(&entry.content).await?,
            }

            info!("Entry written to system clipboard");
            Ok(())
        }
        .instrument(span)
        .await
    }

    async fn write_text(&self, text: &str) -> Result<(), WriteBackFailure> {
        self.clipboard
            .set_text(text)
            .await
            .map_err(|e| stage_failed(EntryKind::Text, WriteBackStage::TextWrite, e))
    }

    async fn write_image(&self, content: &str) -> Result<(), WriteBackFailure> {
        let image = EncodedImage::parse_data_url(content)
            .map_err(|e| stage_failed(EntryKind::Image, WriteBackStage::Decode, e))?;

        let bitmap = self
            .codec
            .decode(&image)
            .await
            .map_err(|e| stage_failed(EntryKind::Image, WriteBackStage::Decode, e))?;

        let surface = self
            .codec
            .render(&bitmap)
            .await
            .map_err(|e| stage_failed(EntryKind::Image, WriteBackStage::Render, e))?;

        let blob = self
            .codec
            .serialize(&surface)
            .await
            .map_err(|e| stage_failed(EntryKind::Image, WriteBackStage::Serialize, e))?;

        self.clipboard
            .set_image(&blob.bytes)
            .await
            .map_err(|e| stage_failed(EntryKind::Image, WriteBackStage::ImageWrite, e))
    }
}

fn stage_failed(
    kind: EntryKind,
    stage: WriteBackStage,
    err: impl std::fmt::Display,
) -> WriteBackFailure {
    let reason = err.to_string();
    warn!(%stage, error = %reason, "Write-back stage failed");
    WriteBackFailure::new(kind, stage, reason)
}
