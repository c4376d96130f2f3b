//! Command implementations for avz-cli

pub mod build;
pub mod config;
pub mod extension;
pub mod set_dir;
pub mod update;

pub use build::run_build;
pub use config::{run_config_set_source, run_config_show};
pub use extension::{run_extension_install, run_extension_list};
pub use set_dir::run_set_dir;
pub use update::run_update;
