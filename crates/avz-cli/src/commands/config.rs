//! `avz config`

use avz_extensions::RemoteSource;
use colored::Colorize;

use crate::context::Context;
use crate::error::{CliError, Result};

/// Handle `avz config show`
pub fn run_config_show(ctx: &Context) -> Result<()> {
    let text = toml::to_string_pretty(&ctx.settings)
        .map_err(|e| CliError::user(format!("Cannot render settings: {e}")))?;
    println!(
        "{} {}",
        "=>".blue().bold(),
        ctx.settings_path.display().to_string().dimmed()
    );
    println!("{text}");
    Ok(())
}

/// Handle `avz config set-source <source>`
pub fn run_config_set_source(ctx: &mut Context, source: RemoteSource) -> Result<()> {
    ctx.settings.download_source = source;
    ctx.save_settings()?;
    println!(
        "{} Downloads will use {}",
        "=>".blue().bold(),
        source.to_string().cyan()
    );
    Ok(())
}
