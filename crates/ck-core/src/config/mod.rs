//! # Configuration DTO / 配置数据结构
//!
//! Pure data. Loading lives in the binary's bootstrap, validation nowhere:
//! whatever the file says is taken as a fact, missing keys fall back to
//! the defaults below.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application configuration DTO
/// 应用配置 DTO
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub notifications: NotificationConfig,
    pub capture: CaptureConfig,
    pub write_back: WriteBackConfig,
    pub autostart: AutostartConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// How long a transient notification stays visible.
    pub duration_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { duration_ms: 2000 }
    }
}

impl NotificationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub poll_interval_ms: u64,
    /// Cap applied by the backend, never by the core.
    pub max_history: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 300,
            max_history: 100,
        }
    }
}

impl CaptureConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WriteBackConfig {
    /// Serialize write-backs: at most one in flight, later ones queue.
    pub single_flight: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutostartConfig {
    /// Name under which the launcher registers the executable.
    pub app_name: String,
}

impl Default for AutostartConfig {
    fn default() -> Self {
        Self {
            app_name: "clipkeep".to_string(),
        }
    }
}
