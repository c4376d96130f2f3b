//! Installation context for a command invocation.
//!
//! Resolves which installation a command works on. The search starts at, in
//! order: the `--avz-dir` flag (or `AVZ_DIR`), the directory saved by
//! `avz set-dir`, and finally the current directory.

use std::path::{Path, PathBuf};

use avz_extensions::Session;
use avz_fs::InstallationRoot;

use crate::error::{CliError, Result};
use crate::settings::{Settings, settings_path};

/// Settings plus the search start chosen for this invocation.
#[derive(Debug)]
pub struct Context {
    pub settings: Settings,
    pub settings_path: PathBuf,
    avz_dir: Option<PathBuf>,
    cwd: PathBuf,
}

impl Context {
    pub fn load(avz_dir: Option<PathBuf>, settings_override: Option<&Path>) -> Result<Self> {
        let settings_path = settings_path(settings_override)?;
        let settings = Settings::load(&settings_path)?;
        Ok(Self {
            settings,
            settings_path,
            avz_dir,
            cwd: std::env::current_dir()?,
        })
    }

    /// Where installation discovery starts.
    pub fn search_start(&self) -> &Path {
        self.avz_dir
            .as_deref()
            .or(self.settings.avz_dir.as_deref())
            .unwrap_or(&self.cwd)
    }

    /// Discover the installation root.
    pub fn root(&self) -> Result<InstallationRoot> {
        let start = self.search_start();
        InstallationRoot::discover(start).map_err(|e| {
            if e.is_not_found() {
                CliError::user(format!(
                    "No AvZ installation found at {} (expected a MinGW directory). Run {} to choose one.",
                    start.display(),
                    "avz set-dir"
                ))
            } else {
                e.into()
            }
        })
    }

    /// A fresh session over the discovered installation.
    pub fn session(&self) -> Result<Session> {
        Ok(Session::new(self.root()?, self.settings.download_source))
    }

    pub fn save_settings(&self) -> Result<()> {
        self.settings.save(&self.settings_path)
    }
}
