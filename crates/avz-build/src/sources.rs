//! Source enumeration.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// File extensions compiled by the build.
pub const SOURCE_EXTENSIONS: &[&str] = &["cpp"];

/// One source file and the object it compiles to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileUnit {
    pub source: PathBuf,
    pub object: PathBuf,
}

/// Find every source file below `src_dir`, in path order, and pair it with
/// an object path in `obj_dir`.
///
/// Objects mirror the source tree below `obj_dir`, keeping the source file
/// name: `ai/plant.cpp` compiles to `ai/plant.cpp.o`. Distinct sources always
/// get distinct objects.
pub fn enumerate_sources(src_dir: &Path, obj_dir: &Path) -> Result<Vec<CompileUnit>> {
    if !src_dir.is_dir() {
        return Err(Error::NoSources {
            dir: src_dir.to_path_buf(),
        });
    }

    let mut units = Vec::new();
    for entry in WalkDir::new(src_dir).sort_by_file_name() {
        let entry = entry.map_err(|source| Error::Enumerate {
            dir: src_dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() || !is_source(entry.path()) {
            continue;
        }
        let relative = entry.path().strip_prefix(src_dir).unwrap_or(entry.path());
        units.push(CompileUnit {
            source: entry.path().to_path_buf(),
            object: obj_dir.join(object_path(relative)),
        });
    }

    if units.is_empty() {
        return Err(Error::NoSources {
            dir: src_dir.to_path_buf(),
        });
    }
    tracing::debug!(count = units.len(), dir = %src_dir.display(), "Found source units");
    Ok(units)
}

fn is_source(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.iter().any(|s| s.eq_ignore_ascii_case(ext)))
}

/// Object path, relative to the object directory, for a source path relative
/// to the source directory.
pub fn object_path(relative: &Path) -> PathBuf {
    let mut name = relative.as_os_str().to_os_string();
    name.push(".o");
    PathBuf::from(name)
}
