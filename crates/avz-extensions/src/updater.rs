//! Core library updates.

use avz_tools::{Extractor, Fetcher, ProgressObserver};

use crate::catalog;
use crate::error::{Error, Result};
use crate::select::{Prompter, Selection, choose};
use crate::session::Session;

/// Replace the core library with a release chosen by the user.
///
/// Only releases built for the installation's environment type are offered.
/// The release archive is unpacked over the installation root, replacing
/// existing files, and the session's cached core version is dropped.
pub async fn update_core<F, X, P>(
    fetcher: &F,
    extractor: &X,
    session: &mut Session,
    prompter: &P,
    progress: Option<&dyn ProgressObserver>,
) -> Result<Selection<String>>
where
    F: Fetcher + ?Sized,
    X: Extractor + ?Sized,
    P: Prompter + ?Sized,
{
    let prefix = session.root().env_type().release_prefix();
    let url = session.remote().core_versions_url();
    let versions = catalog::download(fetcher, &url, &session.scratch_path("version.txt"))
        .await?
        .filtered(|v| v.starts_with(&prefix));
    if versions.is_empty() {
        return Err(Error::EmptyCatalog { url });
    }

    let Some(version) = choose(prompter, "Select a core version", &versions)? else {
        tracing::debug!("Core version selection cancelled");
        return Ok(Selection::Aborted);
    };

    let archive = session.scratch_path(&version);
    let url = session.remote().core_archive_url(&version);
    tracing::debug!(url = %url, "Downloading core release");
    fetcher.fetch(&url, &archive, progress).await?;

    let root = session.root().path().to_native();
    let extracted = extractor.extract(&archive, &root, true).await;
    if let Err(e) = avz_fs::io::remove_if_exists(&archive) {
        tracing::debug!(error = %e, "Could not remove downloaded core archive");
    }
    extracted?;

    session.invalidate_core_version();
    tracing::info!(version = %version, "Core library updated");
    Ok(Selection::Chosen(version))
}
