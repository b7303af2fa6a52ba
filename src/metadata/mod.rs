//! The build metadata document.
//!
//! `BuildMetadata.xml` maps library name/version pairs to the preprocessor
//! definitions consumers need when compiling against that library:
//!
//! ```xml
//! <BuildMetadata>
//!   <Library name="zlib">
//!     <Version number="1.2">
//!       <PublicDefinitions>
//!         <Definition>ZLIB_STATIC</Definition>
//!       </PublicDefinitions>
//!     </Version>
//!   </Library>
//! </BuildMetadata>
//! ```
//!
//! The root element may have any name. Everything below it is optional.
//! Lookups by `name` and `number` ignore case and return the first match in
//! document order.

mod parse;
mod write;

use std::path::Path;

use serde::Serialize;
use thiserror::Error;

/// Errors reading or writing a metadata document.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to read metadata document")]
    Io(#[from] std::io::Error),

    #[error("malformed metadata document: {message}")]
    Parse { message: String },

    #[error("metadata document has no root element")]
    MissingRoot,

    #[error("failed to write metadata document: {message}")]
    Write { message: String },
}

/// One `<Version>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VersionEntry {
    /// The `number` attribute; a version without one never matches.
    pub number: Option<String>,
    /// Trimmed, non-empty definitions from the first `<PublicDefinitions>`.
    pub definitions: Vec<String>,
}

impl VersionEntry {
    pub fn new(number: impl Into<String>) -> Self {
        VersionEntry {
            number: Some(number.into()),
            definitions: Vec::new(),
        }
    }

    pub fn with_definitions(mut self, defs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.definitions = defs.into_iter().map(Into::into).collect();
        self
    }
}

/// One `<Library>` element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LibraryEntry {
    /// The `name` attribute; a library without one never matches.
    pub name: Option<String>,
    pub versions: Vec<VersionEntry>,
}

impl LibraryEntry {
    pub fn new(name: impl Into<String>) -> Self {
        LibraryEntry {
            name: Some(name.into()),
            versions: Vec::new(),
        }
    }

    pub fn with_version(mut self, version: VersionEntry) -> Self {
        self.versions.push(version);
        self
    }

    /// First version whose number matches, ignoring case.
    pub fn version(&self, number: &str) -> Option<&VersionEntry> {
        self.versions
            .iter()
            .find(|v| v.number.as_deref().is_some_and(|n| eq_ignore_case(n, number)))
    }
}

/// An in-memory metadata document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildMetadata {
    pub libraries: Vec<LibraryEntry>,
}

impl BuildMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and parse a metadata document from disk.
    pub fn load(path: &Path) -> Result<Self, MetadataError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse a metadata document.
    pub fn parse(xml: &str) -> Result<Self, MetadataError> {
        parse::parse_document(xml)
    }

    /// Serialize to an indented UTF-8 document with an XML declaration.
    pub fn to_xml(&self) -> Result<String, MetadataError> {
        write::write_document(self)
    }

    /// Serialize and write to disk, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), MetadataError> {
        let xml = self.to_xml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, xml)?;
        Ok(())
    }

    /// First library whose name matches, ignoring case.
    pub fn library(&self, name: &str) -> Option<&LibraryEntry> {
        self.libraries
            .iter()
            .find(|l| l.name.as_deref().is_some_and(|n| eq_ignore_case(n, name)))
    }

    /// Definitions declared for `name`/`version`, if both are present.
    pub fn definitions(&self, name: &str, version: &str) -> Option<&[String]> {
        self.library(name)
            .and_then(|lib| lib.version(version))
            .map(|v| v.definitions.as_slice())
    }
}

/// Case-insensitive comparison that also folds non-ASCII letters.
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}
