//! `avz set-dir`

use std::path::PathBuf;

use avz_fs::InstallationRoot;
use colored::Colorize;

use crate::context::Context;
use crate::error::{CliError, Result};
use crate::interactive::prompt_avz_dir;

/// Handle `avz set-dir [path]`
///
/// Discovers the installation under `path` (or a prompted path) and saves
/// its root so later commands find it from any directory.
pub fn run_set_dir(ctx: &mut Context, path: Option<PathBuf>) -> Result<()> {
    let start = match path {
        Some(path) => path,
        None => prompt_avz_dir()?,
    };

    let root = InstallationRoot::discover(&start).map_err(|e| {
        if e.is_not_found() {
            CliError::user(format!(
                "No AvZ installation found at {}: neither it nor its subdirectories contain MinGW/",
                start.display()
            ))
        } else {
            e.into()
        }
    })?;

    ctx.settings.avz_dir = Some(root.path().to_native());
    ctx.save_settings()?;

    println!(
        "{} AvZ installation set to {} (env{})",
        "=>".blue().bold(),
        root.path().to_string().cyan(),
        root.env_type().number()
    );
    Ok(())
}
