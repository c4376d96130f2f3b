//! Well-known locations inside an AvZ installation tree.

use std::path::Path;

/// Standard installation-tree entries, relative to the installation root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallPath {
    /// `inc` - core headers and one directory per installed extension
    IncDir,
    /// `src` - buildable core sources
    SrcDir,
    /// `bin` - prebuilt and freshly packed binaries
    BinDir,
    /// `bin/obj` - intermediate objects produced by a build
    ObjDir,
    /// `MinGW` - bundled compiler toolchain; its presence marks a root
    MinGwDir,
    /// `MinGW/bin/libLLVM-15.dll` - marker of the clang-based environment
    LlvmMarker,
    /// `7z/7z.exe` - bundled archiver
    SevenZip,
    /// `inc/libavz.h` - header carrying the core version marker
    CoreHeader,
    /// `bin/libavz.a` - packed library produced by a build
    PackedLibrary,
}

impl InstallPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IncDir => "inc",
            Self::SrcDir => "src",
            Self::BinDir => "bin",
            Self::ObjDir => "bin/obj",
            Self::MinGwDir => "MinGW",
            Self::LlvmMarker => "MinGW/bin/libLLVM-15.dll",
            Self::SevenZip => "7z/7z.exe",
            Self::CoreHeader => "inc/libavz.h",
            Self::PackedLibrary => "bin/libavz.a",
        }
    }
}

impl AsRef<Path> for InstallPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for InstallPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for InstallPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// File name of the per-extension manifest inside `inc/<extension>/`.
pub const MANIFEST_FILENAME: &str = "information.txt";
