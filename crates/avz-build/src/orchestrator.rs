//! Compile-then-pack pipeline.
//!
//! Source units are dealt round-robin to `W` workers. Each worker compiles
//! its units one after another; the workers themselves run concurrently and
//! the orchestrator waits for all of them before packing. Units that fail to
//! compile are collected and reported; they never stop a worker.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use avz_fs::InstallationRoot;
use avz_tools::{ToolRunner, run_checked};
use futures::future::join_all;

use crate::error::{Error, Result};
use crate::partition::round_robin;
use crate::progress::{BuildObserver, ProgressCounter};
use crate::sources::{CompileUnit, enumerate_sources};
use crate::toolchain::{Placeholders, Toolchain};

/// Result of compiling one unit.
#[derive(Debug)]
pub enum UnitOutcome {
    Compiled(CompileUnit),
    Failed {
        unit: CompileUnit,
        error: avz_tools::Error,
    },
}

impl UnitOutcome {
    pub fn unit(&self) -> &CompileUnit {
        match self {
            Self::Compiled(unit) | Self::Failed { unit, .. } => unit,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Compiled(_))
    }
}

/// Summary of a finished build.
#[derive(Debug)]
pub struct BuildReport {
    pub library: PathBuf,
    pub workers: usize,
    /// Units that compiled, in source order.
    pub compiled: Vec<CompileUnit>,
    /// Units that failed, in source order.
    pub failed: Vec<(CompileUnit, avz_tools::Error)>,
}

impl BuildReport {
    pub fn total(&self) -> usize {
        self.compiled.len() + self.failed.len()
    }

    /// Whether some units were skipped because they failed to compile.
    pub fn has_warnings(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Runs builds against an installation tree.
pub struct BuildOrchestrator<R> {
    runner: R,
    toolchain: Toolchain,
    workers: NonZeroUsize,
}

impl<R: ToolRunner> BuildOrchestrator<R> {
    /// One worker per available CPU and the default toolchain.
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            toolchain: Toolchain::default(),
            workers: default_workers(),
        }
    }

    pub fn with_toolchain(mut self, toolchain: Toolchain) -> Self {
        self.toolchain = toolchain;
        self
    }

    /// Override the worker count. `None` keeps the CPU count; zero means one.
    pub fn with_workers(mut self, workers: Option<usize>) -> Self {
        if let Some(workers) = workers {
            self.workers = NonZeroUsize::new(workers).unwrap_or(NonZeroUsize::MIN);
        }
        self
    }

    pub fn workers(&self) -> usize {
        self.workers.get()
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Compile every source unit and pack the objects into `bin/libavz.a`.
    ///
    /// Fails without compiling anything when there are no sources. Fails
    /// after compiling when no unit succeeded or the archiver fails.
    pub async fn build(
        &self,
        root: &InstallationRoot,
        observer: Option<&dyn BuildObserver>,
    ) -> Result<BuildReport> {
        let obj_dir = root.obj_dir();
        let units = enumerate_sources(&root.src_dir(), &obj_dir)?;
        for dir in units.iter().filter_map(|u| u.object.parent()) {
            std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        }

        let workers = self.workers();
        let counter = ProgressCounter::new(units.len());
        tracing::info!(units = units.len(), workers, "Compiling");

        let buckets = round_robin(&units, workers);
        let outcomes = join_all(
            buckets
                .into_iter()
                .enumerate()
                .map(|(index, bucket)| self.run_worker(index, bucket, root, &counter, observer)),
        )
        .await;

        let mut outcomes: Vec<UnitOutcome> = outcomes.into_iter().flatten().collect();
        outcomes.sort_by(|a, b| a.unit().source.cmp(&b.unit().source));

        let mut compiled = Vec::new();
        let mut failed = Vec::new();
        for outcome in outcomes {
            match outcome {
                UnitOutcome::Compiled(unit) => compiled.push(unit),
                UnitOutcome::Failed { unit, error } => failed.push((unit, error)),
            }
        }

        if compiled.is_empty() {
            return Err(Error::NothingCompiled {
                failed: failed.len(),
            });
        }

        let library = root.packed_library();
        self.pack(root, &library, &compiled).await?;

        for unit in &compiled {
            if let Err(e) = avz_fs::io::remove_if_exists(&unit.object) {
                tracing::warn!(error = %e, "Could not remove object file");
            }
        }

        tracing::info!(
            library = %library.display(),
            compiled = compiled.len(),
            failed = failed.len(),
            "Build finished"
        );
        Ok(BuildReport {
            library,
            workers,
            compiled,
            failed,
        })
    }

    async fn run_worker(
        &self,
        index: usize,
        units: Vec<CompileUnit>,
        root: &InstallationRoot,
        counter: &ProgressCounter,
        observer: Option<&dyn BuildObserver>,
    ) -> Vec<UnitOutcome> {
        let mut outcomes = Vec::with_capacity(units.len());
        for unit in units {
            let values = Placeholders::new(root.path().as_str()).compile(&unit.source, &unit.object);
            let invocation = self.toolchain.compile.expand(&values).current_dir(root.path());
            tracing::debug!(worker = index, source = %unit.source.display(), "Compiling unit");

            let outcome = match run_checked(&self.runner, &invocation).await {
                Ok(_) => UnitOutcome::Compiled(unit),
                Err(error) => {
                    tracing::warn!(
                        source = %unit.source.display(),
                        error = %error,
                        "Unit failed to compile, continuing"
                    );
                    UnitOutcome::Failed { unit, error }
                }
            };

            let progress = counter.advance();
            if let Some(observer) = observer {
                observer.on_unit_finished(progress, &outcome);
            }
            outcomes.push(outcome);
        }
        outcomes
    }

    async fn pack(
        &self,
        root: &InstallationRoot,
        library: &std::path::Path,
        compiled: &[CompileUnit],
    ) -> Result<()> {
        if avz_fs::io::remove_if_exists(library)? {
            tracing::debug!(library = %library.display(), "Removed previous library");
        }

        let values = Placeholders::new(root.path().as_str())
            .pack(library, compiled.iter().map(|u| u.object.as_path()));
        let invocation = self.toolchain.pack.expand(&values).current_dir(root.path());
        run_checked(&self.runner, &invocation)
            .await
            .map_err(Error::Packaging)?;
        Ok(())
    }
}

/// Number of CPUs, at least one.
pub fn default_workers() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}
