//! Build sinks - where resolved artifacts end up.
//!
//! The host build tool owns the object that include paths, link inputs,
//! staged files and definitions are appended to. The resolver only ever
//! talks to it through [`BuildSink`].

use std::path::{Path, PathBuf};

/// Receiver for the four kinds of resolution output.
pub trait BuildSink {
    /// Add a public include directory.
    fn add_include_path(&mut self, path: &Path);

    /// Add a static library to the link line.
    fn add_static_library(&mut self, path: &Path);

    /// Register a file to be staged next to the final binary.
    ///
    /// Staged files are not under source control and are not compiled in.
    fn add_runtime_dependency(&mut self, path: &Path);

    /// Add a public preprocessor definition (`NAME` or `NAME=VALUE`).
    fn add_definition(&mut self, definition: &str);
}

/// A sink that renders compiler and linker command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSink {
    /// `-I` and `-D` flags, in the order received
    pub compile: Vec<String>,
    /// Library paths to pass to the linker
    pub link: Vec<String>,
    /// Files to copy next to the binary
    pub runtime: Vec<PathBuf>,
}

impl FlagSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BuildSink for FlagSink {
    fn add_include_path(&mut self, path: &Path) {
        self.compile.push(format!("-I{}", path.display()));
    }

    fn add_static_library(&mut self, path: &Path) {
        self.link.push(path.display().to_string());
    }

    fn add_runtime_dependency(&mut self, path: &Path) {
        self.runtime.push(path.to_path_buf());
    }

    fn add_definition(&mut self, definition: &str) {
        self.compile.push(format!("-D{}", definition));
    }
}
