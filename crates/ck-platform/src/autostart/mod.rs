//! Launch-at-login registration.
//!
//! 开机自启注册：Linux/BSD 使用 XDG autostart 条目，Windows 使用注册表 Run 键。

mod desktop_entry;
#[cfg(windows)]
mod registry;
mod unsupported;

use std::sync::Arc;

use anyhow::Result;
use ck_core::ports::AutostartPort;

pub use desktop_entry::DesktopEntryAutostart;
#[cfg(windows)]
pub use registry::RegistryAutostart;
pub use unsupported::UnsupportedAutostart;

/// Autostart adapter for the running platform, registering the current executable.
#[cfg(windows)]
pub fn system_autostart(app_name: &str) -> Result<Arc<dyn AutostartPort>> {
    Ok(Arc::new(RegistryAutostart::for_current_exe(app_name)?))
}

/// Autostart adapter for the running platform, registering the current executable.
#[cfg(all(unix, not(target_os = "macos")))]
pub fn system_autostart(app_name: &str) -> Result<Arc<dyn AutostartPort>> {
    Ok(Arc::new(DesktopEntryAutostart::for_current_exe(app_name)?))
}

/// Autostart adapter for the running platform, registering the current executable.
#[cfg(not(any(windows, all(unix, not(target_os = "macos")))))]
pub fn system_autostart(_app_name: &str) -> Result<Arc<dyn AutostartPort>> {
    Ok(Arc::new(UnsupportedAutostart))
}
