//! Recursive extension installation.
//!
//! Installing an extension downloads its archive for the requested version,
//! unpacks it into `inc/`, records it in the session's installed set and then
//! walks the dependencies named by its manifest. Each dependency is installed
//! without force, so anything already present is left alone.
//!
//! A top-level [`Resolver::install`] call tracks the short names it has
//! entered. Reaching one of them again (a manifest cycle, or two branches
//! sharing a dependency) stops that branch without touching the network.
//!
//! Failures are scoped to the branch that produced them: a dependency that
//! cannot be fetched or extracted is reported in the [`InstallReport`] and its
//! siblings continue. Nothing already unpacked is rolled back.

use std::collections::HashSet;
use std::sync::Arc;

use avz_tools::{Extractor, Fetcher, ProgressObserver};
use futures::FutureExt;
use futures::future::BoxFuture;

use crate::catalog::{self, Catalog};
use crate::core_version::is_compatible;
use crate::error::{Error, Result};
use crate::identity::ExtensionId;
use crate::manifest::ExtensionManifest;
use crate::session::Session;

/// Scratch file name for the downloaded extension catalog.
pub(crate) const CATALOG_SCRATCH_FILE: &str = "extension_list.txt";

/// Something that happened during an install.
#[derive(Debug)]
pub enum InstallEvent {
    /// Archive fetched and extracted.
    Installed { id: ExtensionId, version: String },
    /// Skipped because the short name is already installed and force was off.
    /// Upgrading in place needs a forced install.
    AlreadyInstalled { id: ExtensionId, version: String },
    /// Reached again within the same top-level install.
    Revisited { id: ExtensionId },
    /// The manifest's required core does not match the installed core, or the
    /// installed core version could not be determined.
    CompatibilityWarning {
        id: ExtensionId,
        required: String,
        core: Option<String>,
    },
    /// A dependency branch failed; the rest of the walk continued.
    DependencyFailed {
        name: String,
        version: String,
        error: Error,
    },
}

/// Ordered record of one top-level install.
#[derive(Debug, Default)]
pub struct InstallReport {
    events: Vec<InstallEvent>,
}

impl InstallReport {
    pub fn events(&self) -> &[InstallEvent] {
        &self.events
    }

    /// Identities that were actually fetched and extracted, in install order.
    pub fn installed(&self) -> Vec<&ExtensionId> {
        self.events
            .iter()
            .filter_map(|event| match event {
                InstallEvent::Installed { id, .. } => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &InstallEvent> {
        self.events.iter().filter(|event| {
            matches!(
                event,
                InstallEvent::AlreadyInstalled { .. }
                    | InstallEvent::CompatibilityWarning { .. }
                    | InstallEvent::DependencyFailed { .. }
            )
        })
    }

    pub fn has_failures(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, InstallEvent::DependencyFailed { .. }))
    }

    fn push(&mut self, event: InstallEvent) {
        self.events.push(event);
    }
}

/// Installs extensions and their dependency trees.
pub struct Resolver<F, X> {
    pub(crate) fetcher: F,
    pub(crate) extractor: X,
    pub(crate) progress: Option<Arc<dyn ProgressObserver>>,
}

impl<F: Fetcher, X: Extractor> Resolver<F, X> {
    pub fn new(fetcher: F, extractor: X) -> Self {
        Self {
            fetcher,
            extractor,
            progress: None,
        }
    }

    /// Report archive download progress to `observer`.
    pub fn with_progress(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.progress = Some(observer);
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn extractor(&self) -> &X {
        &self.extractor
    }

    /// Install `full_name` at `version` and, recursively, its dependencies.
    ///
    /// Returns an error only when the requested extension itself could not be
    /// installed. Dependency failures are reported as
    /// [`InstallEvent::DependencyFailed`].
    pub async fn install(
        &self,
        session: &mut Session,
        full_name: &str,
        version: &str,
        force: bool,
    ) -> Result<InstallReport> {
        let id = ExtensionId::parse(full_name)?;
        let mut entered = HashSet::new();
        let mut report = InstallReport::default();

        self.visit(
            session,
            id,
            version.to_string(),
            force,
            &mut entered,
            &mut report,
        )
        .await?;

        Ok(report)
    }

    fn visit<'a>(
        &'a self,
        session: &'a mut Session,
        id: ExtensionId,
        version: String,
        force: bool,
        entered: &'a mut HashSet<String>,
        report: &'a mut InstallReport,
    ) -> BoxFuture<'a, Result<()>> {
        async move {
            let short = id.short_name().to_string();

            if entered.contains(&short) {
                tracing::debug!(extension = %id, "Already visited in this install");
                report.push(InstallEvent::Revisited { id });
                return Ok(());
            }

            if !force && session.installed()?.contains(&short) {
                tracing::warn!(
                    extension = %id,
                    "Extension already installed; force a reinstall to upgrade it"
                );
                report.push(InstallEvent::AlreadyInstalled { id, version });
                return Ok(());
            }

            entered.insert(short.clone());

            self.fetch_and_extract(session, &id, &version).await?;
            session.installed()?.insert(short.as_str());
            tracing::info!(extension = %id, version = %version, "Extension installed");
            report.push(InstallEvent::Installed {
                id: id.clone(),
                version,
            });

            let manifest = ExtensionManifest::from_path(&session.root().manifest_path(&short))?;

            if let Some(required) = &manifest.required_core {
                let core = session.core_version().map(str::to_string);
                let compatible = core
                    .as_deref()
                    .is_some_and(|core| is_compatible(required, core));
                if !compatible {
                    tracing::warn!(
                        extension = %id,
                        required = %required,
                        core = ?core,
                        "Extension may not be compatible with the installed core"
                    );
                    report.push(InstallEvent::CompatibilityWarning {
                        id: id.clone(),
                        required: required.clone(),
                        core,
                    });
                }
            }

            for dependency in manifest.dependencies {
                let full_name = self.resolve_dependency(session, &dependency.name).await;
                let outcome = match ExtensionId::parse(&full_name) {
                    Ok(dep_id) => {
                        self.visit(
                            session,
                            dep_id,
                            dependency.version.clone(),
                            false,
                            entered,
                            report,
                        )
                        .await
                    }
                    Err(e) => Err(e),
                };

                if let Err(error) = outcome {
                    tracing::warn!(
                        extension = %id,
                        dependency = %full_name,
                        error = %error,
                        "Dependency install failed"
                    );
                    report.push(InstallEvent::DependencyFailed {
                        name: full_name,
                        version: dependency.version,
                        error,
                    });
                }
            }

            Ok(())
        }
        .boxed()
    }

    async fn fetch_and_extract(
        &self,
        session: &Session,
        id: &ExtensionId,
        version: &str,
    ) -> Result<()> {
        let url = session.remote().extension_archive_url(id, version);
        let archive = session.scratch_path(&format!("{}-{}.zip", id.short_name(), version));

        tracing::debug!(url = %url, "Downloading extension archive");
        self.fetcher
            .fetch(&url, &archive, self.progress.as_deref())
            .await?;

        let extracted = self
            .extractor
            .extract(&archive, &session.root().inc_dir(), true)
            .await;

        if let Err(e) = avz_fs::io::remove_if_exists(&archive) {
            tracing::debug!(error = %e, "Could not remove downloaded archive");
        }

        extracted.map_err(Error::from)
    }

    /// Map a manifest dependency name to a catalog entry.
    ///
    /// Falls back to the name as written when the catalog has no match or
    /// cannot be downloaded.
    async fn resolve_dependency(&self, session: &mut Session, name: &str) -> String {
        if session.catalog().is_none() {
            let url = session.remote().extension_catalog_url();
            let dest = session.scratch_path(CATALOG_SCRATCH_FILE);
            let catalog = match catalog::download(&self.fetcher, &url, &dest).await {
                Ok(catalog) => catalog,
                Err(e) => {
                    tracing::warn!(error = %e, "Extension catalog unavailable, using dependency names as written");
                    Catalog::default()
                }
            };
            session.set_catalog(catalog);
        }

        match session.catalog().and_then(|c| c.resolve_full_name(name)) {
            Some(full_name) => full_name.to_string(),
            None => {
                tracing::debug!(name, "No catalog entry for dependency");
                name.to_string()
            }
        }
    }
}
