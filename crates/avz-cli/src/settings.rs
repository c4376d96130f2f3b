//! Persistent user settings.

use std::path::{Path, PathBuf};

use avz_build::Toolchain;
use avz_extensions::RemoteSource;
use avz_fs::ConfigStore;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};

/// Contents of `settings.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Where to search for the installation when `--avz-dir` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avz_dir: Option<PathBuf>,

    pub download_source: RemoteSource,

    /// Compile worker override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,

    pub toolchain: Toolchain,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        Ok(ConfigStore::new().load_or_default(path)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        ConfigStore::new().save(path, self)?;
        tracing::debug!(path = %path.display(), "Settings saved");
        Ok(())
    }
}

/// Settings file location: the explicit override, or
/// `<config dir>/avz/settings.toml`.
pub fn settings_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    dirs::config_dir()
        .map(|dir| dir.join("avz").join("settings.toml"))
        .ok_or_else(|| CliError::user("Cannot determine the user configuration directory; pass --settings"))
}
