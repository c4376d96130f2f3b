//! Shared test utilities for the AvZ manager workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`install`] - [`TestInstall`](install::TestInstall) builder for fake installation trees
//! - [`archive`] - plain-text stand-in for release archives, for fake extractors

pub mod archive;
pub mod install;
