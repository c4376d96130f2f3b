//! `avz update`

use avz_extensions::{Selection, update_core};
use avz_tools::{HttpFetcher, ProcessRunner, SevenZip};
use colored::Colorize;

use crate::context::Context;
use crate::error::Result;
use crate::interactive::TerminalPrompter;
use crate::progress::{cleared, download_bar};
use crate::runtime::block_on;

/// Handle `avz update`
pub fn run_update(ctx: &Context) -> Result<()> {
    let mut session = ctx.session()?;
    let extractor = SevenZip::new(session.root().seven_zip(), ProcessRunner::new());
    let (bar, observer) = download_bar("Downloading");

    let selection = block_on(update_core(
        &HttpFetcher::new(),
        &extractor,
        &mut session,
        &TerminalPrompter,
        Some(observer.as_ref()),
    ));
    let selection = cleared(&bar, selection)??;

    match selection {
        Selection::Chosen(version) => {
            let core = session.core_version().unwrap_or("unknown").to_string();
            println!(
                "{} Core library updated to {} (version {})",
                "=>".blue().bold(),
                version.cyan(),
                core
            );
        }
        Selection::Aborted => println!("{} Update cancelled", "=>".blue().bold()),
    }
    Ok(())
}
