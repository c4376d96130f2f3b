//! Extension command implementations.
//!
//! Handlers for `avz extension install` and `avz extension list`. Installs
//! run the recursive resolver and print every event it reports: installs,
//! skipped re-installs, core compatibility warnings and failed dependencies.

use avz_extensions::{InstallEvent, InstallReport, InstalledSet, Resolver, Selection};
use avz_tools::{HttpFetcher, ProcessRunner, SevenZip};
use colored::Colorize;

use crate::context::Context;
use crate::error::Result;
use crate::interactive::TerminalPrompter;
use crate::progress::{cleared, download_bar};
use crate::runtime::block_on;

/// Handle `avz extension install [<name> <version>] [--force]`
///
/// With a name and version, installs directly. Without, shows the catalog and
/// the chosen extension's versions, then installs with force.
pub fn run_extension_install(
    ctx: &Context,
    name: Option<&str>,
    version: Option<&str>,
    force: bool,
) -> Result<()> {
    let mut session = ctx.session()?;
    let seven_zip = session.root().seven_zip();
    let (bar, observer) = download_bar("Downloading");
    let resolver = Resolver::new(HttpFetcher::new(), SevenZip::new(seven_zip, ProcessRunner::new()))
        .with_progress(observer);

    let outcome = match (name, version) {
        (Some(name), Some(version)) => {
            block_on(resolver.install(&mut session, name, version, force))
                .map(|installed| installed.map(Selection::Chosen))
        }
        _ => block_on(resolver.select_and_install(&mut session, &TerminalPrompter)),
    };
    let outcome = cleared(&bar, outcome)??;

    match outcome {
        Selection::Chosen(report) => print_report(&report),
        Selection::Aborted => println!("{} Installation cancelled", "=>".blue().bold()),
    }
    Ok(())
}

/// Handle `avz extension list`
pub fn run_extension_list(ctx: &Context) -> Result<()> {
    let inc_dir = ctx.root()?.inc_dir();
    let installed = InstalledSet::scan(&inc_dir)?;

    if installed.is_empty() {
        println!("{} No extensions installed", "=>".blue().bold());
        return Ok(());
    }

    println!(
        "{} {} installed extension(s) in {}",
        "=>".blue().bold(),
        installed.len(),
        inc_dir.display().to_string().dimmed()
    );
    for name in installed.iter() {
        println!("   {}", name.cyan());
    }
    Ok(())
}

fn print_report(report: &InstallReport) {
    for event in report.events() {
        match event {
            InstallEvent::Installed { id, version } => println!(
                "{} Installed '{}' {}",
                "=>".blue().bold(),
                id.to_string().cyan(),
                version
            ),
            InstallEvent::AlreadyInstalled { id, .. } => println!(
                "{} '{}' is already installed; use {} to upgrade it (the installed version may not match)",
                "warning:".yellow().bold(),
                id.to_string().cyan(),
                "--force".bold()
            ),
            InstallEvent::Revisited { id } => {
                tracing::debug!(extension = %id, "Dependency already handled");
            }
            InstallEvent::CompatibilityWarning { id, required, core } => println!(
                "{} '{}' was built for core {} but the installed core is {}",
                "warning:".yellow().bold(),
                id.to_string().cyan(),
                required,
                core.as_deref().unwrap_or("unknown")
            ),
            InstallEvent::DependencyFailed { name, version, error } => println!(
                "{} dependency '{}' {} failed: {}",
                "warning:".yellow().bold(),
                name.cyan(),
                version,
                error
            ),
        }
    }
}
