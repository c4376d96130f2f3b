//! `avz build`

use avz_build::{BuildObserver, BuildOrchestrator, Progress, UnitOutcome};
use avz_tools::ProcessRunner;
use colored::Colorize;

use crate::context::Context;
use crate::error::Result;
use crate::progress::{build_bar, cleared, on_unit};
use crate::runtime::block_on;

/// Handle `avz build [--jobs N]`
///
/// Compile failures of individual files are printed as warnings once the
/// build finishes; a missing source tree or a failed pack is an error.
pub fn run_build(ctx: &Context, jobs: Option<usize>) -> Result<()> {
    let root = ctx.root()?;
    let orchestrator = BuildOrchestrator::new(ProcessRunner::new())
        .with_toolchain(ctx.settings.toolchain.clone())
        .with_workers(jobs.or(ctx.settings.jobs));

    let bar = build_bar();
    let observer = |progress: Progress, outcome: &UnitOutcome| on_unit(&bar, progress, outcome);
    let result = block_on(orchestrator.build(&root, Some(&observer as &dyn BuildObserver)))?;
    let report = cleared(&bar, result)?;

    for (unit, error) in &report.failed {
        println!(
            "{} {} did not compile:\n{}",
            "warning:".yellow().bold(),
            unit.source.display().to_string().cyan(),
            error
        );
    }

    let status = if report.has_warnings() {
        format!("{} of {} units compiled", report.compiled.len(), report.total()).yellow()
    } else {
        format!("{} units compiled", report.total()).green()
    };
    println!(
        "{} Built {} ({}, {} workers)",
        "=>".blue().bold(),
        report.library.display().to_string().cyan(),
        status,
        report.workers
    );
    Ok(())
}
