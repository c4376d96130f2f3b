//! Remote catalogs: flat newline-delimited lists of extension names or
//! version tokens.

use std::path::Path;

use avz_tools::Fetcher;

use crate::error::{Error, Result};

/// A downloaded list of entries, in server order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<String>,
}

impl Catalog {
    /// Parse list text; entries are trimmed and blank lines dropped.
    pub fn parse(content: &str) -> Self {
        Self::from_entries(content.lines())
    }

    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|e| e.as_ref().trim().to_string())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    /// Keep only entries accepted by `keep`.
    pub fn filtered(self, keep: impl Fn(&str) -> bool) -> Self {
        Self {
            entries: self.entries.into_iter().filter(|e| keep(e)).collect(),
        }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a dependency name to a fully qualified catalog entry.
    ///
    /// An exact match wins. Otherwise the name is matched as the final path
    /// segment (`flower` matches `qrmd/flower` but not `qrmd/sunflower`).
    /// When several namespaces publish the same short name the first one in
    /// catalog order is chosen.
    pub fn resolve_full_name(&self, name: &str) -> Option<&str> {
        if let Some(exact) = self.entries.iter().find(|e| e.as_str() == name) {
            return Some(exact);
        }

        let suffix = format!("/{}", name);
        let mut matches = self.entries.iter().filter(|e| e.ends_with(&suffix));
        let first = matches.next()?;
        let others: Vec<&String> = matches.collect();
        if !others.is_empty() {
            tracing::warn!(
                name,
                chosen = %first,
                alternatives = ?others,
                "Ambiguous extension name, using first catalog match"
            );
        }
        Some(first)
    }
}

/// Download a list to `dest` and parse it.
///
/// An empty list is an error: there is nothing to choose from.
pub async fn download<F>(fetcher: &F, url: &str, dest: &Path) -> Result<Catalog>
where
    F: Fetcher + ?Sized,
{
    fetcher.fetch(url, dest, None).await?;
    let lines = avz_fs::io::read_lines(dest)?;
    let catalog = Catalog::from_entries(&lines);
    if catalog.is_empty() {
        return Err(Error::EmptyCatalog {
            url: url.to_string(),
        });
    }
    Ok(catalog)
}
