//! Core library version resolution.
//!
//! The core header carries a line such as `#define __AVZ_VERSION__ 240113`.
//! The six-digit `YYMMDD` fragment is rendered as `2024_01_13`, the form
//! extension manifests use when declaring the core they were built against.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Marker identifying the version line in the core header.
pub const VERSION_MARKER: &str = "__AVZ_VERSION__";

static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__AVZ_VERSION__\s+(\d{2})(\d{2})(\d{2})").unwrap());

/// Find and normalize the core version in header lines.
pub fn parse_core_version<S: AsRef<str>>(lines: &[S]) -> Option<String> {
    lines
        .iter()
        .map(AsRef::as_ref)
        .filter(|line| line.contains(VERSION_MARKER))
        .find_map(|line| {
            let caps = VERSION_PATTERN.captures(line)?;
            Some(format!("20{}_{}_{}", &caps[1], &caps[2], &caps[3]))
        })
}

/// Read the core version from the header at `header`.
pub fn read_core_version(header: &Path) -> Result<String> {
    if !header.is_file() {
        return Err(Error::not_found("core header", header));
    }
    let lines = avz_fs::io::read_lines(header)?;
    parse_core_version(&lines).ok_or_else(|| Error::not_found("core version marker", header))
}

/// Whether an extension requiring `required` is compatible with `core`.
///
/// Containment rather than equality: a manifest may list several accepted
/// versions on its core line token (`2024_01_13|2024_02_01`).
pub fn is_compatible(required: &str, core: &str) -> bool {
    !core.is_empty() && required.contains(core)
}
