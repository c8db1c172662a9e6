use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use ck_core::ports::AutostartPort;
use tracing::{debug, info};

/// XDG autostart entry: `<config_dir>/autostart/<app_name>.desktop`.
///
/// Enabled iff the entry exists and its `Exec` line points at the
/// registered executable.
pub struct DesktopEntryAutostart {
    app_name: String,
    entry_path: PathBuf,
    exec: PathBuf,
}

impl DesktopEntryAutostart {
    pub fn new(autostart_dir: impl AsRef<Path>, app_name: &str, exec: PathBuf) -> Self {
        Self {
            app_name: app_name.to_string(),
            entry_path: autostart_dir
                .as_ref()
                .join(format!("{app_name}.desktop")),
            exec,
        }
    }

    pub fn for_current_exe(app_name: &str) -> Result<Self> {
        let config_dir = dirs::config_dir().context("no user config directory")?;
        let exec = std::env::current_exe().context("resolve current executable")?;
        Ok(Self::new(config_dir.join("autostart"), app_name, exec))
    }

    pub fn entry_path(&self) -> &Path {
        &self.entry_path
    }

    fn render(&self) -> String {
        format!(
            "[Desktop Entry]\n\
             Type=Application\n\
             Name={}\n\
             Exec={}\n\
             X-GNOME-Autostart-enabled=true\n\
             Hidden=false\n\
             NoDisplay=false\n",
            self.app_name,
            quote_exec(&self.exec.to_string_lossy()),
        )
    }
}

fn quote_exec(path: &str) -> String {
    if path.contains(char::is_whitespace) {
        format!("\"{path}\"")
    } else {
        path.to_string()
    }
}

fn exec_line(contents: &str) -> Option<&str> {
    contents
        .lines()
        .find_map(|line| line.trim().strip_prefix("Exec="))
        .map(|exec| exec.trim().trim_matches('"'))
}

#[async_trait]
impl AutostartPort for DesktopEntryAutostart {
    async fn is_enabled(&self) -> Result<bool> {
        match tokio::fs::read_to_string(&self.entry_path).await {
            Ok(contents) => {
                let registered = exec_line(&contents);
                let exec = self.exec.to_string_lossy();
                debug!(?registered, "Found autostart entry");
                Ok(registered == Some(&*exec))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err).with_context(|| {
                format!("read autostart entry {}", self.entry_path.display())
            }),
        }
    }

    async fn set_enabled(&self, enabled: bool) -> Result<()> {
        if enabled {
            if let Some(dir) = self.entry_path.parent() {
                tokio::fs::create_dir_all(dir)
                    .await
                    .with_context(|| format!("create {}", dir.display()))?;
            }
            tokio::fs::write(&self.entry_path, self.render())
                .await
                .with_context(|| format!("write {}", self.entry_path.display()))?;
            info!(path = %self.entry_path.display(), "Autostart entry written");
            return Ok(());
        }

        match tokio::fs::remove_file(&self.entry_path).await {
            Ok(()) => {
                info!(path = %self.entry_path.display(), "Autostart entry removed");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err)
                .with_context(|| format!("remove {}", self.entry_path.display())),
        }
    }
}
