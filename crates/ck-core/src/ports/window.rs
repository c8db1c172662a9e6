use anyhow::Result;

/// Main window visibility (`WindowHide` / `WindowShow`).
#[async_trait::async_trait]
pub trait WindowPort: Send + Sync {
    async fn hide(&self) -> Result<()>;
    async fn show(&self) -> Result<()>;
    fn is_visible(&self) -> bool;
}
