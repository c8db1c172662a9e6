use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use ck_core::ports::AutostartPort;
use tracing::info;
use winreg::enums::{HKEY_CURRENT_USER, KEY_READ, KEY_WRITE};
use winreg::RegKey;

const RUN_KEY: &str = r"SOFTWARE\Microsoft\Windows\CurrentVersion\Run";

/// `HKCU\...\Run` value named after the app, holding the executable path.
pub struct RegistryAutostart {
    app_name: String,
    exec: PathBuf,
}

impl RegistryAutostart {
    pub fn new(app_name: &str, exec: PathBuf) -> Self {
        Self {
            app_name: app_name.to_string(),
            exec,
        }
    }

    pub fn for_current_exe(app_name: &str) -> Result<Self> {
        let exec = std::env::current_exe().context("resolve current executable")?;
        Ok(Self::new(app_name, exec))
    }
}

#[async_trait]
impl AutostartPort for RegistryAutostart {
    async fn is_enabled(&self) -> Result<bool> {
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let key = match hkcu.open_subkey_with_flags(RUN_KEY, KEY_READ) {
            Ok(key) => key,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(false),
            Err(err) => return Err(err).context("open Run key"),
        };

        match key.get_value::<String, _>(&self.app_name) {
            Ok(registered) => {
                let exec = self.exec.to_string_lossy();
                Ok(registered.trim_matches('"').eq_ignore_ascii_case(&exec))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err).context("read Run value"),
        }
    }

    async fn set_enabled(&self, enabled: bool) -> Result<()> {
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);

        if enabled {
            let (key, _) = hkcu.create_subkey(RUN_KEY).context("open Run key")?;
            let exec = self.exec.to_string_lossy().to_string();
            key.set_value(&self.app_name, &exec)
                .context("write Run value")?;
            info!(app = %self.app_name, "Registered for launch at login");
            return Ok(());
        }

        let key = match hkcu.open_subkey_with_flags(RUN_KEY, KEY_WRITE) {
            Ok(key) => key,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(err).context("open Run key"),
        };
        match key.delete_value(&self.app_name) {
            Ok(()) => {
                info!(app = %self.app_name, "Unregistered from launch at login");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).context("delete Run value"),
        }
    }
}
