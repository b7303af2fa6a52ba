//! Resolution error types and diagnostics.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::layout::{LayoutError, LibraryKind};
use crate::core::spec::SpecError;
use crate::metadata::MetadataError;
use crate::util::diagnostic::Diagnostic;

/// A fatal error that aborts a whole resolution pass.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ResolveError {
    /// A library spec is not of the form `name-version`.
    #[error(transparent)]
    #[diagnostic(transparent)]
    MalformedSpec(#[from] SpecError),

    /// The platform or configuration has no entry in its lookup table.
    #[error(transparent)]
    #[diagnostic(transparent)]
    UnmappedEnum(#[from] LayoutError),

    #[error("failed to load metadata document `{}`", path.display())]
    #[diagnostic(code(prebuilt::resolve::metadata))]
    MetadataLoad {
        path: PathBuf,
        #[source]
        source: MetadataError,
    },

    #[error("failed to list directory `{}`", path.display())]
    #[diagnostic(code(prebuilt::resolve::list_dir))]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

impl ResolveError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::MalformedSpec(err) => {
                Diagnostic::error(format!("malformed library spec `{}`", err.spec()))
                    .with_context(err.to_string())
                    .with_suggestion("Write library specs as `<name>-<version>`, e.g. `zlib-1.2`")
                    .with_suggestion("Neither the name nor the version may contain '-'")
            }

            ResolveError::UnmappedEnum(LayoutError::UnmappedConfiguration { configuration }) => {
                Diagnostic::error(format!(
                    "configuration `{}` has no install directory name",
                    configuration
                ))
                .with_suggestion(format!(
                    "Map it under [configurations] in .prebuilt/config.toml, e.g. `{} = \"Release\"`",
                    configuration
                ))
                .with_suggestion("Run `prebuilt mappings` to see the effective table")
            }

            ResolveError::UnmappedEnum(LayoutError::UnmappedPlatform { platform, kind }) => {
                let example = match kind {
                    LibraryKind::Static => "static = \"*.a\"",
                    LibraryKind::Dynamic => "dynamic = \"*.so\"",
                };
                Diagnostic::error(format!(
                    "platform `{}` has no {} library pattern",
                    platform, kind
                ))
                .with_suggestion(format!(
                    "Map it under [platforms.{}] in .prebuilt/config.toml, e.g. `{}`",
                    platform, example
                ))
                .with_suggestion("Run `prebuilt mappings` to see the effective table")
            }

            ResolveError::UnmappedEnum(err) => Diagnostic::error(err.to_string())
                .with_suggestion("Check the [configurations] and [platforms] tables"),

            ResolveError::MetadataLoad { path, source } => {
                Diagnostic::error("failed to load the build metadata document")
                    .with_location(path.clone())
                    .with_context(source.to_string())
                    .with_suggestion("Check that the root directory is correct (--root)")
                    .with_suggestion("Regenerate it with `prebuilt metadata <BUILD_CONFIG>`")
            }

            ResolveError::ListDirectory { path, source } => {
                Diagnostic::error(format!("could not list `{}`", path.display()))
                    .with_context(source.to_string())
                    .with_suggestion("Check the directory's permissions")
            }
        }
    }
}
