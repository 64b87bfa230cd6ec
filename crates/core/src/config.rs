//! Application settings, kept apart from the game configuration file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use tracing::info;

/// Directory under the user's config dir holding the settings file.
pub const SETTINGS_DIR: &str = "drawnumber";
/// Settings file name inside [`SETTINGS_DIR`].
pub const SETTINGS_FILE: &str = "drawnumber.toml";

/// Where the game reads its configuration and writes its logs.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Three-line game configuration file.
    pub game_config: PathBuf,
    /// Directory receiving the application log and the results transcript.
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Load settings from the default location, falling back to built-in defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::default_path())
    }

    /// Load settings from `path`. A missing file is not an error.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading settings from {}", path.display());
        Config::builder()
            .set_default("game_config", "config.yml")
            .context("failed to set default game config path")?
            .set_default("log_dir", "logs")
            .context("failed to set default log directory")?
            .add_source(File::from(path).required(false))
            .build()
            .with_context(|| format!("failed to read settings {}", path.display()))?
            .try_deserialize()
            .with_context(|| format!("failed to parse settings {}", path.display()))
    }

    /// Default settings path under the user's config directory.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(SETTINGS_DIR)
            .join(SETTINGS_FILE)
    }
}
