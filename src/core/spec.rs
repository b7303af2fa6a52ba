//! Library specs - `<name>-<version>` identifiers.
//!
//! A spec names both a directory (`Headers/<spec>`, `Installs/<spec>`) and a
//! metadata entry (`Library name` + `Version number`). The directory form is
//! the original string, untouched; only metadata lookups compare the parts
//! case-insensitively.

use std::fmt;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

/// Separator between the library name and its version.
pub const SEPARATOR: char = '-';

/// Error produced when a spec string does not have the `name-version` shape.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum SpecError {
    #[error("library spec `{spec}` is missing '-'")]
    #[diagnostic(
        code(prebuilt::spec::missing_separator),
        help("Write library specs as `<name>-<version>`, e.g. `zlib-1.2`")
    )]
    MissingSeparator { spec: String },

    #[error("library spec `{spec}` has more than one '-'")]
    #[diagnostic(
        code(prebuilt::spec::extra_separator),
        help("Library names and versions may not contain '-'")
    )]
    ExtraSeparator { spec: String },

    #[error("library spec `{spec}` has an empty name or version")]
    #[diagnostic(code(prebuilt::spec::empty_part))]
    EmptyPart { spec: String },
}

impl SpecError {
    /// The offending spec string.
    pub fn spec(&self) -> &str {
        match self {
            SpecError::MissingSeparator { spec }
            | SpecError::ExtraSeparator { spec }
            | SpecError::EmptyPart { spec } => spec,
        }
    }
}

/// A parsed `name-version` library spec.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LibrarySpec {
    raw: String,
    split: usize,
}

impl LibrarySpec {
    /// Parse a spec, requiring exactly one separator with text on both sides.
    pub fn parse(spec: &str) -> Result<Self, SpecError> {
        let mut separators = spec.match_indices(SEPARATOR).map(|(i, _)| i);

        let split = separators.next().ok_or_else(|| SpecError::MissingSeparator {
            spec: spec.to_string(),
        })?;
        if separators.next().is_some() {
            return Err(SpecError::ExtraSeparator {
                spec: spec.to_string(),
            });
        }
        if split == 0 || split + SEPARATOR.len_utf8() == spec.len() {
            return Err(SpecError::EmptyPart {
                spec: spec.to_string(),
            });
        }

        Ok(LibrarySpec {
            raw: spec.to_string(),
            split,
        })
    }

    /// Library name, as written.
    pub fn name(&self) -> &str {
        &self.raw[..self.split]
    }

    /// Library version, as written.
    pub fn version(&self) -> &str {
        &self.raw[self.split + SEPARATOR.len_utf8()..]
    }

    /// The full spec string, used verbatim as a directory name.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for LibrarySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for LibrarySpec {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LibrarySpec::parse(s)
    }
}
