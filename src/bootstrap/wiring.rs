//! # Dependency Injection / 依赖注入模块
//!
//! Creates the infra and platform adapters and assembles the
//! [`ClipboardView`] from them. Assembly only: nothing here decides what
//! the application does with its dependencies.
//!
//! 这是唯一同时依赖 ck-infra、ck-platform 和 ck-app 的地方。

use std::sync::Arc;

use ck_app::{ClipboardView, ClipboardViewDeps};
use ck_core::ports::{AutostartPort, SystemClipboardPort, WindowPort};
use ck_core::{AppConfig, UiNotice};
use ck_infra::{ImageCrateCodec, SystemClock};
use ck_platform::autostart::UnsupportedAutostart;
use ck_platform::{
    system_autostart, HeadlessWindow, LocalBackend, LocalClipboard, PollingCaptureRuntime,
};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::console::NotificationCenter;

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Clipboard initialization failed: {0}")]
    ClipboardInit(String),
}

/// Everything the run loop drives.
pub struct AppRuntime {
    pub view: Arc<ClipboardView>,
    /// `None` when started with `--no-capture`.
    pub capture: Option<PollingCaptureRuntime>,
    pub backend: Arc<LocalBackend>,
    pub window: Arc<dyn WindowPort>,
    pub notices: Arc<NotificationCenter>,
    pub notice_rx: mpsc::UnboundedReceiver<UiNotice>,
}

/// Wire the application against the system clipboard.
///
/// # Errors / 错误
///
/// Returns `WiringError::ClipboardInit` if the system clipboard cannot be
/// opened.
pub fn wire_dependencies(config: &AppConfig, capture_enabled: bool) -> WiringResult<AppRuntime> {
    let clipboard = LocalClipboard::new()
        .map_err(|e| WiringError::ClipboardInit(format!("{e:#}")))?;
    let autostart = create_autostart(&config.autostart.app_name);

    Ok(wire_with(config, Arc::new(clipboard), autostart, capture_enabled))
}

/// Registration failure leaves launch at login unsupported for this run.
fn create_autostart(app_name: &str) -> Arc<dyn AutostartPort> {
    match system_autostart(app_name) {
        Ok(autostart) => autostart,
        Err(err) => {
            warn!(error = %err, "Autostart unavailable, launch at login disabled");
            Arc::new(UnsupportedAutostart)
        }
    }
}

pub(crate) fn wire_with(
    config: &AppConfig,
    clipboard: Arc<dyn SystemClipboardPort>,
    autostart: Arc<dyn AutostartPort>,
    capture_enabled: bool,
) -> AppRuntime {
    let backend = Arc::new(LocalBackend::new(
        Arc::new(SystemClock),
        config.capture.max_history,
    ));

    let capture = capture_enabled.then(|| {
        PollingCaptureRuntime::new(
            clipboard.clone(),
            backend.clone(),
            config.capture.poll_interval(),
        )
    });

    let (center, notice_rx) = NotificationCenter::new(config.notifications.duration());
    let notices = Arc::new(center);

    let view = Arc::new(ClipboardView::new(
        ClipboardViewDeps {
            history: backend.clone(),
            channel: backend.clone(),
            clipboard,
            codec: Arc::new(ImageCrateCodec::new()),
            autostart,
            notifier: notices.clone(),
        },
        config,
    ));

    info!(
        capture = capture_enabled,
        max_history = config.capture.max_history,
        single_flight = config.write_back.single_flight,
        "Dependencies wired"
    );

    AppRuntime {
        view,
        capture,
        backend,
        window: Arc::new(HeadlessWindow::new()),
        notices,
        notice_rx,
    }
}
