use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Result;
use async_trait::async_trait;
use ck_core::ports::WindowPort;
use tracing::info;

/// Window adapter for surfaces without a real window.
///
/// Records the requested visibility so the rest of the app behaves the
/// same as with a desktop shell.
pub struct HeadlessWindow {
    visible: AtomicBool,
}

impl HeadlessWindow {
    pub fn new() -> Self {
        Self {
            visible: AtomicBool::new(true),
        }
    }
}

impl Default for HeadlessWindow {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WindowPort for HeadlessWindow {
    async fn hide(&self) -> Result<()> {
        if self.visible.swap(false, Ordering::AcqRel) {
            info!("Window hidden");
        }
        Ok(())
    }

    async fn show(&self) -> Result<()> {
        if !self.visible.swap(true, Ordering::AcqRel) {
            info!("Window shown");
        }
        Ok(())
    }

    fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Acquire)
    }
}
