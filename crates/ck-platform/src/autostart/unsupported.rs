use anyhow::{bail, Result};
use async_trait::async_trait;
use ck_core::ports::AutostartPort;

/// Targets without a launch-at-login mechanism. Always reports disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedAutostart;

#[async_trait]
impl AutostartPort for UnsupportedAutostart {
    async fn is_enabled(&self) -> Result<bool> {
        Ok(false)
    }

    async fn set_enabled(&self, _enabled: bool) -> Result<()> {
        bail!("launch at login is not supported on this platform")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_disabled_and_refuses_changes() {
        assert!(!UnsupportedAutostart.is_enabled().await.unwrap());
        assert!(UnsupportedAutostart.set_enabled(true).await.is_err());
    }
}
