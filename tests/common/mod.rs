//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_sample_tree();
//!     fixture.command().assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    pub use super::TestFixture;
}

/// A test fixture holding an input tree and an (initially absent) output directory.
///
/// Both live in one temporary directory, as `in/` and `out/`.
///
/// # Example
///
/// ```rust,ignore
/// let fixture = TestFixture::new()
///     .with_sample_tree()
///     .with_file("extra/e", "e");
///
/// fixture.command().arg("--exclude=a").assert().failure();
/// ```
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new fixture with an empty input directory.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child("in")
            .create_dir_all()
            .expect("Failed to create input directory");
        Self { temp_dir }
    }

    /// Populate the input with `a`, `b`, `subdir/c` and `subdir/d`, each holding its own name.
    pub fn with_sample_tree(self) -> Self {
        self.with_file("a", "a")
            .with_file("b", "b")
            .with_file("subdir/c", "c")
            .with_file("subdir/d", "d")
    }

    /// Add an input file with the given relative path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child("in")
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Add a file next to (not inside) the input tree, e.g. a rules file.
    #[allow(dead_code)]
    pub fn with_side_file(self, name: &str, content: &str) -> Self {
        self.temp_dir
            .child(name)
            .write_str(content)
            .expect("Failed to write side file");
        self
    }

    /// Path of a file written with [`TestFixture::with_side_file`].
    #[allow(dead_code)]
    pub fn side_path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    pub fn input(&self) -> PathBuf {
        self.temp_dir.path().join("in")
    }

    pub fn output(&self) -> PathBuf {
        self.temp_dir.path().join("out")
    }

    /// Every file under the output directory, as sorted `/`-separated relative paths.
    #[allow(dead_code)]
    pub fn output_files(&self) -> Vec<String> {
        list_files(&self.output())
    }

    /// Every file under the input directory, as sorted `/`-separated relative paths.
    #[allow(dead_code)]
    pub fn input_files(&self) -> Vec<String> {
        list_files(&self.input())
    }

    /// Read an output file to a string.
    #[allow(dead_code)]
    pub fn read_output(&self, path: &str) -> String {
        std::fs::read_to_string(self.output().join(path)).expect("Failed to read output file")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl TestFixture {
    /// A command for the binary with the fixture's input and output directories
    /// already passed; options can be chained after them.
    #[allow(dead_code)]
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("filter-directory");
        cmd.env_remove("FILTER_DIRECTORY_RULES")
            .env_remove("RUST_LOG")
            .arg("--color=never")
            .arg(self.input())
            .arg(self.output());
        cmd
    }
}

fn list_files(root: &Path) -> Vec<String> {
    if !root.exists() {
        return Vec::new();
    }
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .expect("walked path under root")
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect();
    files.sort();
    files
}
