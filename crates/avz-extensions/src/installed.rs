//! The set of extensions present in the installation tree.

use std::collections::BTreeSet;
use std::path::Path;

use crate::error::{Error, Result};

/// Short names of installed extensions.
///
/// Keyed by short name because that is all the on-disk layout records: an
/// extension lives in `inc/<short name>/`, so two namespaces publishing the
/// same short name occupy the same directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstalledSet {
    names: BTreeSet<String>,
}

impl InstalledSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan the directories under `inc_dir`.
    pub fn scan(inc_dir: &Path) -> Result<Self> {
        if !inc_dir.is_dir() {
            return Err(Error::not_found("extension directory", inc_dir));
        }

        let entries =
            std::fs::read_dir(inc_dir).map_err(|e| avz_fs::Error::io(inc_dir, e))?;
        let names: BTreeSet<String> = entries
            .flatten()
            .filter(|entry| entry.file_type().map(|t| t.is_dir()).unwrap_or(false))
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .collect();

        tracing::debug!(count = names.len(), dir = %inc_dir.display(), "Scanned installed extensions");
        Ok(Self { names })
    }

    pub fn contains(&self, short_name: &str) -> bool {
        self.names.contains(short_name)
    }

    /// Record an install. Returns `false` if the name was already present.
    pub fn insert(&mut self, short_name: impl Into<String>) -> bool {
        self.names.insert(short_name.into())
    }

    /// Installed names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
