//! Extension manifest parsing for `information.txt` files.
//!
//! The manifest is plain text with a positional schema:
//!
//! ```text
//! flower: planting helpers by qrmd        <- line 0, free text
//! AvZ 2024_01_13                          <- line 1, "<label> <required core version>"
//! qrmd/shovel 240101                      <- lines >= 2, "<dependency> <version>"
//! seed 1.2
//! ```
//!
//! Blank lines from index 2 on are ignored. Line numbers count physical
//! lines after carriage returns and trailing blank lines are stripped.

use std::path::Path;

use crate::error::{Error, Result};

/// Index of the line declaring the required core version.
pub const CORE_VERSION_LINE: usize = 1;
/// Index of the first dependency line.
pub const FIRST_DEPENDENCY_LINE: usize = 2;

/// One `<name> <version>` dependency line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyDecl {
    /// Name as written; may be bare or namespace-qualified.
    pub name: String,
    pub version: String,
}

/// Parsed `information.txt`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionManifest {
    pub description: String,
    /// Core version string this extension was built against.
    pub required_core: Option<String>,
    pub dependencies: Vec<DependencyDecl>,
}

impl ExtensionManifest {
    /// Parse manifest text.
    pub fn parse(content: &str) -> Self {
        Self::from_lines(&avz_fs::io::split_lines(content))
    }

    /// Build a manifest from already split lines.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let description = lines
            .first()
            .map(|l| l.as_ref().trim().to_string())
            .unwrap_or_default();

        let required_core = lines
            .get(CORE_VERSION_LINE)
            .and_then(|l| l.as_ref().split_whitespace().nth(1))
            .map(str::to_string);

        let mut dependencies = Vec::new();
        for (index, line) in lines.iter().enumerate().skip(FIRST_DEPENDENCY_LINE) {
            let line = line.as_ref().trim();
            if line.is_empty() {
                continue;
            }
            let mut tokens = line.split_whitespace();
            match (tokens.next(), tokens.next()) {
                (Some(name), Some(version)) => dependencies.push(DependencyDecl {
                    name: name.to_string(),
                    version: version.to_string(),
                }),
                _ => {
                    tracing::warn!(line = index, content = line, "Ignoring dependency line without a version");
                }
            }
        }

        Self {
            description,
            required_core,
            dependencies,
        }
    }

    /// Load a manifest from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::not_found("extension manifest", path));
        }
        let lines = avz_fs::io::read_lines(path)?;
        Ok(Self::from_lines(&lines))
    }
}
