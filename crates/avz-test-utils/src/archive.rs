//! Plain-text archives for tests.
//!
//! Real releases are zip files unpacked by 7-Zip. Tests replace the extractor
//! with a fake that understands this format instead:
//!
//! ```text
//! == flower/information.txt
//! flower helpers
//! AvZ 2024_01_13
//! == flower/flower.h
//! #pragma once
//! ```
//!
//! Each `== <relative path>` line starts a file; the lines that follow are
//! its content.

use std::fs;
use std::path::Path;

const FILE_MARKER: &str = "== ";

/// Render `files` (relative path, content) as archive text.
pub fn pack(files: &[(&str, &str)]) -> String {
    let mut out = String::new();
    for (path, content) in files {
        out.push_str(FILE_MARKER);
        out.push_str(path);
        out.push('\n');
        out.push_str(content);
        if !content.is_empty() && !content.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}

/// Archive text for an extension directory containing only its manifest.
pub fn extension(short_name: &str, manifest: &str) -> String {
    pack(&[(&format!("{short_name}/information.txt"), manifest)])
}

/// Unpack archive text read from `archive` into `dest`.
///
/// Existing files are replaced only when `overwrite` is set. Returns an
/// error message if the archive cannot be read or a file cannot be written.
pub fn unpack(archive: &Path, dest: &Path, overwrite: bool) -> Result<(), String> {
    let text = fs::read_to_string(archive)
        .map_err(|e| format!("cannot read archive {}: {e}", archive.display()))?;

    let mut files: Vec<(String, String)> = Vec::new();
    for line in text.lines() {
        if let Some(path) = line.strip_prefix(FILE_MARKER) {
            files.push((path.to_string(), String::new()));
        } else if let Some((_, content)) = files.last_mut() {
            content.push_str(line);
            content.push('\n');
        } else if !line.trim().is_empty() {
            return Err(format!("not an archive: {}", archive.display()));
        }
    }

    for (path, content) in files {
        let target = dest.join(&path);
        if target.exists() && !overwrite {
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("cannot create {}: {e}", parent.display()))?;
        }
        fs::write(&target, content).map_err(|e| format!("cannot write {}: {e}", target.display()))?;
    }
    Ok(())
}
