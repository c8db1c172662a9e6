use anyhow::{anyhow, Result};
use async_trait::async_trait;
use ck_core::ports::SystemClipboardPort;
use clipboard_rs::common::RustImage;
use clipboard_rs::{Clipboard, ClipboardContext, ContentFormat, RustImageData};
use std::sync::{Arc, Mutex};
use tokio::task::spawn_blocking;
use tracing::debug;

/// System clipboard backed by clipboard-rs.
///
/// Every call runs on the blocking pool; the context is shared behind a
/// mutex.
pub struct LocalClipboard {
    inner: Arc<Mutex<ClipboardContext>>,
}

impl LocalClipboard {
    pub fn new() -> Result<Self> {
        let context = ClipboardContext::new()
            .map_err(|e| anyhow!("Failed to create clipboard context: {}", e))?;
        Ok(Self {
            inner: Arc::new(Mutex::new(context)),
        })
    }

    async fn with_context<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&ClipboardContext) -> Result<T> + Send + 'static,
    {
        let inner = self.inner.clone();
        spawn_blocking(move || {
            let guard = inner
                .lock()
                .map_err(|e| anyhow!("Failed to lock clipboard: {}", e))?;
            op(&guard)
        })
        .await
        .map_err(|e| anyhow!("Task join error: {}", e))?
    }
}

#[async_trait]
impl SystemClipboardPort for LocalClipboard {
    async fn set_text(&self, text: &str) -> Result<()> {
        let text = text.to_string();
        self.with_context(move |ctx| {
            ctx.set_text(text)
                .map_err(|e| anyhow!("Failed to write text: {}", e))
        })
        .await
    }

    async fn set_image(&self, png: &[u8]) -> Result<()> {
        let png = png.to_vec();
        self.with_context(move |ctx| {
            let image = RustImageData::from_bytes(&png)
                .map_err(|e| anyhow!("Failed to load image: {}", e))?;
            ctx.set_image(image)
                .map_err(|e| anyhow!("Failed to write image: {}", e))?;
            debug!(bytes = png.len(), "Wrote image to clipboard");
            Ok(())
        })
        .await
    }

    async fn get_text(&self) -> Result<Option<String>> {
        self.with_context(|ctx| {
            if !ctx.has(ContentFormat::Text) {
                return Ok(None);
            }
            ctx.get_text()
                .map(Some)
                .map_err(|e| anyhow!("Failed to read text: {}", e))
        })
        .await
    }

    async fn get_image(&self) -> Result<Option<Vec<u8>>> {
        self.with_context(|ctx| {
            if !ctx.has(ContentFormat::Image) {
                return Ok(None);
            }
            let image = ctx
                .get_image()
                .map_err(|e| anyhow!("Failed to read image: {}", e))?;
            let png = image
                .to_png()
                .map_err(|e| anyhow!("Failed to convert to PNG: {}", e))?;
            Ok(Some(png.get_bytes().to_vec()))
        })
        .await
    }
}
