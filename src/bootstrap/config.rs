//! # Configuration Loader / 配置加载器
//!
//! Reads the TOML configuration file into [`AppConfig`] and applies CLI
//! overrides. Missing keys take the DTO defaults; a missing file at the
//! default location means "all defaults".
//!
//! 读取 TOML 配置文件并应用命令行覆盖。

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context};
use ck_core::AppConfig;
use tracing::debug;

use super::cli::Cli;

const CONFIG_DIR_NAME: &str = "clipkeep";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML for
/// [`AppConfig`].
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", config_path.display()))
}

/// `<config_dir>/clipkeep/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Resolve the effective configuration for this run.
///
/// An explicit `--config` must exist. The default path is optional.
pub fn resolve_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => load_config(&path)?,
            _ => {
                debug!("No config file found, using defaults");
                AppConfig::default()
            }
        },
    };

    apply_overrides(&mut config, cli);
    ensure!(
        config.capture.poll_interval_ms > 0,
        "Invalid capture poll interval: poll_interval_ms must be at least 1"
    );
    Ok(config)
}

fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(interval) = cli.poll_interval_ms {
        config.capture.poll_interval_ms = interval;
    }
}
