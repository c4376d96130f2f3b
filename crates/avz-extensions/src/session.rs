//! Per-session state shared by the install, select and update flows.

use std::path::{Path, PathBuf};

use avz_fs::InstallationRoot;

use crate::catalog::Catalog;
use crate::core_version::read_core_version;
use crate::error::Result;
use crate::installed::InstalledSet;
use crate::remote::{RemoteLayout, RemoteSource};

/// Name of the scratch directory created under the system temp directory.
pub const SCRATCH_DIR_NAME: &str = "AsmVsZombies";

/// Everything one manager session knows about its installation.
///
/// The installed set and core version are resolved on first use and then
/// cached; the installed set is updated in place as extensions land.
#[derive(Debug)]
pub struct Session {
    root: InstallationRoot,
    remote: RemoteLayout,
    scratch_dir: PathBuf,
    installed: Option<InstalledSet>,
    core_version: Option<Option<String>>,
    catalog: Option<Catalog>,
}

impl Session {
    pub fn new(root: InstallationRoot, source: RemoteSource) -> Self {
        Self {
            root,
            remote: RemoteLayout::for_source(source),
            scratch_dir: std::env::temp_dir().join(SCRATCH_DIR_NAME),
            installed: None,
            core_version: None,
            catalog: None,
        }
    }

    /// Replace the remote layout (used to point at a private mirror).
    pub fn with_remote(mut self, remote: RemoteLayout) -> Self {
        self.remote = remote;
        self
    }

    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    pub fn root(&self) -> &InstallationRoot {
        &self.root
    }

    pub fn remote(&self) -> &RemoteLayout {
        &self.remote
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Path of a scratch file.
    pub fn scratch_path(&self, file_name: &str) -> PathBuf {
        self.scratch_dir.join(file_name)
    }

    /// The installed set, scanned from `inc/` on first access.
    pub fn installed(&mut self) -> Result<&mut InstalledSet> {
        if self.installed.is_none() {
            self.installed = Some(InstalledSet::scan(&self.root.inc_dir())?);
        }
        Ok(self.installed.get_or_insert_with(InstalledSet::new))
    }

    /// The installed core version, or `None` if it cannot be determined.
    ///
    /// The lookup runs once per session; call
    /// [`invalidate_core_version`](Self::invalidate_core_version) after the
    /// core is replaced.
    pub fn core_version(&mut self) -> Option<&str> {
        if self.core_version.is_none() {
            let resolved = match read_core_version(&self.root.core_header()) {
                Ok(version) => Some(version),
                Err(e) => {
                    tracing::warn!(error = %e, "Unable to determine installed core version");
                    None
                }
            };
            self.core_version = Some(resolved);
        }
        self.core_version.as_ref().and_then(|v| v.as_deref())
    }

    pub fn invalidate_core_version(&mut self) {
        self.core_version = None;
    }

    /// Catalog downloaded earlier in this session, if any.
    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = Some(catalog);
    }
}
