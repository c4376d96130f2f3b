//! Installation-root discovery and layout
//!
//! An installation root is the directory that holds the bundled `MinGW`
//! toolchain next to `inc/`, `src/` and `bin/`. Users usually point at either
//! the root itself or its parent, so discovery checks the given directory and
//! then its immediate subdirectories.

use std::path::{Path, PathBuf};

use crate::constants::{InstallPath, MANIFEST_FILENAME};
use crate::{Error, NormalizedPath, Result};

/// Toolchain flavour bundled with the installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvType {
    /// Legacy GCC-based MinGW
    Gcc,
    /// Clang/LLVM-based MinGW (ships `libLLVM-15.dll`)
    Llvm,
}

impl EnvType {
    /// Numeric tag used by the release catalog (`env1`, `env2`).
    pub fn number(&self) -> u8 {
        match self {
            Self::Gcc => 1,
            Self::Llvm => 2,
        }
    }

    /// Prefix every core release token for this environment starts with.
    pub fn release_prefix(&self) -> String {
        format!("env{}", self.number())
    }
}

impl std::fmt::Display for EnvType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "env{}", self.number())
    }
}

/// A discovered installation root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallationRoot {
    root: NormalizedPath,
    env: EnvType,
}

impl InstallationRoot {
    /// Discover the installation root starting from `start`.
    ///
    /// Checks `start` first, then each immediate subdirectory in name order.
    /// The first directory containing `MinGW/` wins.
    pub fn discover(start: impl AsRef<Path>) -> Result<Self> {
        let start = NormalizedPath::new(start);
        let native = start.to_native();

        if is_root(&native) {
            tracing::debug!(root = %start, "Installation root found at search start");
            return Ok(Self::at(start));
        }

        let entries = std::fs::read_dir(&native).map_err(|e| Error::io(&native, e))?;
        let mut subdirs: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        subdirs.sort();

        for dir in subdirs {
            if is_root(&dir) {
                let root = NormalizedPath::new(&dir);
                tracing::debug!(root = %root, "Installation root found in subdirectory");
                return Ok(Self::at(root));
            }
        }

        Err(Error::InstallationNotFound { searched: native })
    }

    /// Wrap a directory already known to be an installation root.
    pub fn at(root: impl Into<NormalizedPath>) -> Self {
        let root = root.into();
        let env = if root.join(InstallPath::LlvmMarker.as_str()).is_file() {
            EnvType::Llvm
        } else {
            EnvType::Gcc
        };
        Self { root, env }
    }

    /// The root directory with forward-slash separators.
    pub fn path(&self) -> &NormalizedPath {
        &self.root
    }

    pub fn env_type(&self) -> EnvType {
        self.env
    }

    /// Resolve a well-known entry to a native path.
    pub fn resolve(&self, entry: InstallPath) -> PathBuf {
        self.root.join(entry.as_str()).to_native()
    }

    pub fn inc_dir(&self) -> PathBuf {
        self.resolve(InstallPath::IncDir)
    }

    pub fn src_dir(&self) -> PathBuf {
        self.resolve(InstallPath::SrcDir)
    }

    pub fn obj_dir(&self) -> PathBuf {
        self.resolve(InstallPath::ObjDir)
    }

    /// Bundled 7-Zip executable used to unpack downloads.
    pub fn seven_zip(&self) -> PathBuf {
        self.resolve(InstallPath::SevenZip)
    }

    pub fn core_header(&self) -> PathBuf {
        self.resolve(InstallPath::CoreHeader)
    }

    pub fn packed_library(&self) -> PathBuf {
        self.resolve(InstallPath::PackedLibrary)
    }

    /// Directory an extension with the given short name installs into.
    pub fn extension_dir(&self, short_name: &str) -> PathBuf {
        self.root
            .join(InstallPath::IncDir.as_str())
            .join(short_name)
            .to_native()
    }

    /// Manifest path of an installed extension.
    pub fn manifest_path(&self, short_name: &str) -> PathBuf {
        self.extension_dir(short_name).join(MANIFEST_FILENAME)
    }
}

fn is_root(dir: &Path) -> bool {
    dir.join(InstallPath::MinGwDir.as_str()).is_dir()
}
