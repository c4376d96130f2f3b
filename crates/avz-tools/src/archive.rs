//! Archive extraction
//!
//! Archives are opaque to the manager: extraction is delegated to the 7-Zip
//! executable bundled with the installation, and only its exit status is
//! interpreted.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;
use crate::runner::{Invocation, ToolRunner, run_checked};

/// Unpacks an archive into a directory.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract `archive` into `dest`. When `overwrite` is set, files already
    /// present in `dest` are replaced; otherwise they are kept.
    async fn extract(&self, archive: &Path, dest: &Path, overwrite: bool) -> Result<()>;
}

/// [`Extractor`] that shells out to `7z x`.
#[derive(Debug, Clone)]
pub struct SevenZip<R> {
    exe: PathBuf,
    runner: R,
}

impl<R: ToolRunner> SevenZip<R> {
    pub fn new(exe: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            exe: exe.into(),
            runner,
        }
    }

    /// Build the `7z` invocation without running it.
    pub fn invocation(&self, archive: &Path, dest: &Path, overwrite: bool) -> Invocation {
        let mode = if overwrite { "-aoa" } else { "-aos" };
        Invocation::new(&self.exe)
            .arg("x")
            .arg(archive.to_string_lossy())
            .arg(mode)
            .arg("-y")
            .arg(format!("-o{}", dest.to_string_lossy()))
    }
}

#[async_trait]
impl<R: ToolRunner> Extractor for SevenZip<R> {
    async fn extract(&self, archive: &Path, dest: &Path, overwrite: bool) -> Result<()> {
        let invocation = self.invocation(archive, dest, overwrite);
        run_checked(&self.runner, &invocation).await?;
        tracing::debug!(
            archive = %archive.display(),
            dest = %dest.display(),
            "Archive extracted"
        );
        Ok(())
    }
}
