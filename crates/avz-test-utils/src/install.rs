//! [`TestInstall`] builder for fake AvZ installation trees.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary installation tree.
///
/// `new` lays down the directories discovery and the build expect:
/// `MinGW/bin`, `inc`, `src` and `bin`.
///
/// # Example
///
/// ```rust,no_run
/// use avz_test_utils::install::TestInstall;
///
/// let install = TestInstall::new()
///     .with_core_version("240113")
///     .with_extension("flower", "flower helpers\nAvZ 2024_01_13\n")
///     .with_source("main.cpp", "int main() {}");
/// install.assert_file_exists("inc/flower/information.txt");
/// ```
pub struct TestInstall {
    temp_dir: TempDir,
    root: PathBuf,
}

impl Default for TestInstall {
    fn default() -> Self {
        Self::new()
    }
}

impl TestInstall {
    /// Create an installation tree at the temp directory root.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().to_path_buf();
        Self::populate(&root);
        Self { temp_dir, root }
    }

    /// Create an installation tree one level below the temp directory, as
    /// when the user points discovery at a parent folder.
    pub fn nested(dir_name: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join(dir_name);
        Self::populate(&root);
        Self { temp_dir, root }
    }

    fn populate(root: &Path) {
        for dir in ["MinGW/bin", "inc", "src", "bin"] {
            fs::create_dir_all(root.join(dir))
                .unwrap_or_else(|e| panic!("TestInstall: failed to create {dir}: {e}"));
        }
    }

    /// The installation root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The temp directory holding the installation (the root's parent for
    /// [`nested`](Self::nested) trees).
    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Mark the toolchain as the LLVM-based environment (type 2).
    pub fn llvm(self) -> Self {
        self.write("MinGW/bin/libLLVM-15.dll", "")
    }

    /// Write `inc/libavz.h` declaring `yymmdd` as the core version.
    pub fn with_core_version(self, yymmdd: &str) -> Self {
        let header = format!(
            "#ifndef __LIBAVZ_H__\n#define __LIBAVZ_H__\n#define __AVZ_VERSION__ {yymmdd}\n#endif\n"
        );
        self.write("inc/libavz.h", &header)
    }

    /// Install an extension directory with the given manifest text.
    pub fn with_extension(self, short_name: &str, manifest: &str) -> Self {
        self.write(&format!("inc/{short_name}/information.txt"), manifest)
    }

    /// Add a file under `src/`.
    pub fn with_source(self, relative: &str, content: &str) -> Self {
        self.write(&format!("src/{relative}"), content)
    }

    /// Write a file relative to the root, creating parent directories.
    pub fn write(self, relative: &str, content: &str) -> Self {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content)
            .unwrap_or_else(|e| panic!("TestInstall: failed to write {relative}: {e}"));
        self
    }

    /// Read a file relative to the root.
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.root.join(relative))
            .unwrap_or_else(|e| panic!("TestInstall: failed to read {relative}: {e}"))
    }

    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, relative: &str) {
        assert!(
            self.root.join(relative).exists(),
            "Expected {relative} to exist under {}",
            self.root.display()
        );
    }

    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_missing(&self, relative: &str) {
        assert!(
            !self.root.join(relative).exists(),
            "Expected {relative} not to exist under {}",
            self.root.display()
        );
    }
}
