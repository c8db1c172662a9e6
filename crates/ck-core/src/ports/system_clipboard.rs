//! System clipboard port - abstracts the live OS clipboard.

use anyhow::Result;

/// Live system clipboard.
///
/// Image payloads are PNG bytes in both directions.
#[async_trait::async_trait]
pub trait SystemClipboardPort: Send + Sync {
    /// `SetClipboardContent`
    async fn set_text(&self, text: &str) -> Result<()>;

    /// `SetClipboardImage`
    async fn set_image(&self, png: &[u8]) -> Result<()>;

    /// `GetClipboardText`; `None` when the clipboard holds no text.
    async fn get_text(&self) -> Result<Option<String>>;

    /// `GetClipboardImage`; `None` when the clipboard holds no image.
    async fn get_image(&self) -> Result<Option<Vec<u8>>>;
}
