//! The outcome of one resolution pass.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::resolver::sink::BuildSink;

/// Everything a resolution pass contributes to a build.
///
/// All four sequences keep request order: libraries in the order they were
/// asked for, and files within a library in file-name order. Nothing is
/// deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResolutionResult {
    pub include_paths: Vec<PathBuf>,
    pub static_libraries: Vec<PathBuf>,
    /// Non-source-controlled files staged next to the final binary
    pub runtime_dependencies: Vec<PathBuf>,
    pub definitions: Vec<String>,
}

impl ResolutionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the pass contributed nothing at all.
    pub fn is_empty(&self) -> bool {
        self.include_paths.is_empty()
            && self.static_libraries.is_empty()
            && self.runtime_dependencies.is_empty()
            && self.definitions.is_empty()
    }

    /// Replay the result into a host sink, category by category.
    pub fn apply(&self, sink: &mut dyn BuildSink) {
        for path in &self.include_paths {
            sink.add_include_path(path);
        }
        for path in &self.static_libraries {
            sink.add_static_library(path);
        }
        for path in &self.runtime_dependencies {
            sink.add_runtime_dependency(path);
        }
        for definition in &self.definitions {
            sink.add_definition(definition);
        }
    }
}

impl BuildSink for ResolutionResult {
    fn add_include_path(&mut self, path: &Path) {
        self.include_paths.push(path.to_path_buf());
    }

    fn add_static_library(&mut self, path: &Path) {
        self.static_libraries.push(path.to_path_buf());
    }

    fn add_runtime_dependency(&mut self, path: &Path) {
        self.runtime_dependencies.push(path.to_path_buf());
    }

    fn add_definition(&mut self, definition: &str) {
        self.definitions.push(definition.to_string());
    }
}
