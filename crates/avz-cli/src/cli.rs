//! CLI argument parsing using clap derive

use std::path::PathBuf;

use avz_extensions::RemoteSource;
use clap::{Parser, Subcommand};

/// AvZ manager - install extensions and build scripts for AsmVsZombies
#[derive(Parser, Debug)]
#[command(name = "avz")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory to search for the AvZ installation
    #[arg(long, global = true, env = "AVZ_DIR")]
    pub avz_dir: Option<PathBuf>,

    /// Settings file to use instead of the per-user one
    #[arg(long, global = true, env = "AVZ_SETTINGS", hide = true)]
    pub settings: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Locate the AvZ installation and remember it
    ///
    /// The directory itself or one of its immediate subdirectories must
    /// contain MinGW/. Prompts for a path when none is given.
    SetDir {
        /// Directory to search
        path: Option<PathBuf>,
    },

    /// Manage extensions
    Extension {
        #[command(subcommand)]
        action: ExtensionAction,
    },

    /// Compile every source under src/ and pack bin/libavz.a
    Build {
        /// Number of parallel compile workers (defaults to the CPU count)
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Update the core library to a release chosen from the remote list
    Update,

    /// Show or change settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Extension subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ExtensionAction {
    /// Install an extension and its dependencies
    ///
    /// Without arguments, pick the extension and version interactively.
    ///
    /// Examples:
    ///   avz extension install                      # Choose from the catalog
    ///   avz extension install qrmd/flower 240113   # Install a known version
    Install {
        /// Qualified extension name, e.g. qrmd/flower
        #[arg(requires = "version")]
        name: Option<String>,

        /// Version to install
        version: Option<String>,

        /// Reinstall even if already present
        #[arg(short, long)]
        force: bool,
    },

    /// List installed extensions
    List,
}

/// Config subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    /// Print the current settings
    Show,

    /// Choose the mirror to download from
    SetSource {
        /// github, gitlab or gitee
        source: RemoteSource,
    },
}
