use anyhow::Result;

/// Launch-at-login registration (`CheckAutoStart` / `SetAutoStart`).
#[async_trait::async_trait]
pub trait AutostartPort: Send + Sync {
    async fn is_enabled(&self) -> Result<bool>;
    async fn set_enabled(&self, enabled: bool) -> Result<()>;
}
