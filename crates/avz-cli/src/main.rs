//! AvZ manager CLI
//!
//! Installs AsmVsZombies extensions with their dependencies, builds script
//! sources into the core library archive and keeps the core up to date.

mod cli;
mod commands;
mod context;
mod error;
mod interactive;
mod progress;
mod runtime;
mod settings;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ConfigAction, ExtensionAction};
use context::Context;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        println!("{} AvZ manager", "avz".green().bold());
        println!();
        println!("Run {} for available commands.", "avz --help".cyan());
        return Ok(());
    };

    let mut ctx = Context::load(cli.avz_dir, cli.settings.as_deref())?;
    execute_command(&mut ctx, command)
}

/// Logs go to stderr. `warn` by default, `debug` with `--verbose`;
/// `RUST_LOG` overrides both.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("Verbose mode enabled");
}

fn execute_command(ctx: &mut Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::SetDir { path } => commands::run_set_dir(ctx, path),
        Commands::Extension { action } => match action {
            ExtensionAction::Install {
                name,
                version,
                force,
            } => commands::run_extension_install(ctx, name.as_deref(), version.as_deref(), force),
            ExtensionAction::List => commands::run_extension_list(ctx),
        },
        Commands::Build { jobs } => commands::run_build(ctx, jobs),
        Commands::Update => commands::run_update(ctx),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::run_config_show(ctx),
            ConfigAction::SetSource { source } => commands::run_config_set_source(ctx, source),
        },
    }
}
