//! Filesystem layer for the AvZ manager
//!
//! Provides installation-root discovery, layout-aware path resolution,
//! line-oriented reads and atomic writes.

pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod layout;
pub mod path;

pub use config::ConfigStore;
pub use constants::InstallPath;
pub use error::{Error, Result};
pub use layout::{EnvType, InstallationRoot};
pub use path::NormalizedPath;
