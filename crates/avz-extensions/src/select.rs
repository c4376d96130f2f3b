//! Interactive selection from remote lists.

use avz_tools::{Extractor, Fetcher};

use crate::catalog::{self, Catalog};
use crate::error::Result;
use crate::identity::ExtensionId;
use crate::resolver::{CATALOG_SCRATCH_FILE, InstallReport, Resolver};
use crate::session::Session;

/// Result of an operation the user may cancel.
#[derive(Debug)]
pub enum Selection<T> {
    Chosen(T),
    /// The user dismissed a prompt. Not an error.
    Aborted,
}

impl<T> Selection<T> {
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }

    pub fn chosen(self) -> Option<T> {
        match self {
            Self::Chosen(value) => Some(value),
            Self::Aborted => None,
        }
    }
}

/// Asks the user to pick one item from a list.
pub trait Prompter {
    /// Returns the chosen index, or `None` if the user cancelled.
    fn select(&self, prompt: &str, items: &[String]) -> Result<Option<usize>>;
}

/// Prompt over a catalog and return the chosen entry.
pub(crate) fn choose<P>(prompter: &P, prompt: &str, catalog: &Catalog) -> Result<Option<String>>
where
    P: Prompter + ?Sized,
{
    let choice = prompter.select(prompt, catalog.entries())?;
    Ok(choice.and_then(|index| catalog.entries().get(index).cloned()))
}

impl<F: Fetcher, X: Extractor> Resolver<F, X> {
    /// Pick an extension, then one of its versions, then force-install it.
    ///
    /// The downloaded catalog is kept in the session and reused to resolve
    /// dependency names during the install.
    pub async fn select_and_install<P>(
        &self,
        session: &mut Session,
        prompter: &P,
    ) -> Result<Selection<InstallReport>>
    where
        P: Prompter + ?Sized,
    {
        let url = session.remote().extension_catalog_url();
        let extensions =
            catalog::download(&self.fetcher, &url, &session.scratch_path(CATALOG_SCRATCH_FILE))
                .await?;
        session.set_catalog(extensions.clone());

        let Some(full_name) = choose(prompter, "Select an extension", &extensions)? else {
            tracing::debug!("Extension selection cancelled");
            return Ok(Selection::Aborted);
        };
        let id = ExtensionId::parse(&full_name)?;

        let url = session.remote().extension_versions_url(&id);
        let versions =
            catalog::download(&self.fetcher, &url, &session.scratch_path("version.txt")).await?;

        let Some(version) = choose(prompter, "Select a version", &versions)? else {
            tracing::debug!(extension = %id, "Version selection cancelled");
            return Ok(Selection::Aborted);
        };

        let report = self.install(session, &full_name, &version, true).await?;
        Ok(Selection::Chosen(report))
    }
}
