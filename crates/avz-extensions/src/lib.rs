//! Extension resolution for the AvZ manager.
//!
//! Extensions are published as versioned zip archives in a mirrored remote
//! repository. Installing one unpacks it under `inc/<name>/` and then walks
//! the dependencies its `information.txt` manifest declares, recursively.
//!
//! State that lives for a whole session (installation root, installed set,
//! resolved core version, downloaded catalog) is carried by an explicit
//! [`Session`] so independent sessions never share anything.

pub mod catalog;
pub mod core_version;
pub mod error;
pub mod identity;
pub mod installed;
pub mod manifest;
pub mod remote;
pub mod resolver;
pub mod select;
pub mod session;
pub mod updater;

pub use catalog::Catalog;
pub use error::{Error, ErrorKind, Result};
pub use identity::ExtensionId;
pub use installed::InstalledSet;
pub use manifest::{DependencyDecl, ExtensionManifest};
pub use remote::{RemoteLayout, RemoteSource};
pub use resolver::{InstallEvent, InstallReport, Resolver};
pub use select::{Prompter, Selection};
pub use session::Session;
pub use updater::update_core;
