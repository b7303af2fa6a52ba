//! Test utilities for building prebuilt library trees on disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use prebuilt::test_support::LibraryTree;
//!
//! let tree = LibraryTree::new()
//!     .with_headers("zlib-1.2")
//!     .with_install_file("zlib-1.2", "Win64", "Release", "lib/zlib.lib")
//!     .with_metadata("<BuildMetadata/>");
//! ```

pub mod fixtures;

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::core::layout::{HEADERS_DIR, INSTALLS_DIR, METADATA_FILE};

pub use fixtures::*;

/// A temporary prebuilt library root, removed on drop.
#[derive(Debug)]
pub struct LibraryTree {
    dir: TempDir,
}

impl LibraryTree {
    /// Create an empty root.
    pub fn new() -> Self {
        LibraryTree {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Create `Headers/<spec>/` with a placeholder header.
    pub fn with_headers(self, spec: &str) -> Self {
        let dir = self.root().join(HEADERS_DIR).join(spec);
        fs::create_dir_all(&dir).expect("failed to create header dir");
        fs::write(dir.join("placeholder.h"), "#pragma once\n").expect("failed to write header");
        self
    }

    /// Create an empty file under `Installs/<spec>/<platform>/<config>/`.
    pub fn with_install_file(self, spec: &str, platform: &str, config: &str, rel: &str) -> Self {
        let path = self.install_dir(spec, platform, config).join(rel);
        self.write(&path, "")
    }

    /// Write `BuildMetadata.xml`.
    pub fn with_metadata(self, xml: &str) -> Self {
        let path = self.root().join(METADATA_FILE);
        self.write(&path, xml)
    }

    /// Write an arbitrary file relative to the root.
    pub fn with_file(self, rel: &str, contents: &str) -> Self {
        let path = self.root().join(rel);
        self.write(&path, contents)
    }

    pub fn install_dir(&self, spec: &str, platform: &str, config: &str) -> PathBuf {
        self.root()
            .join(INSTALLS_DIR)
            .join(spec)
            .join(platform)
            .join(config)
    }

    fn write(self, path: &Path, contents: &str) -> Self {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create parent dir");
        }
        fs::write(path, contents).expect("failed to write file");
        self
    }
}

impl Default for LibraryTree {
    fn default() -> Self {
        Self::new()
    }
}
