//! Implementation of `prebuilt metadata` and `prebuilt list`.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::build_config::BuildConfig;
use crate::core::layout::RootLayout;
use crate::metadata::{BuildMetadata, LibraryEntry, VersionEntry};
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Options for metadata generation.
#[derive(Debug, Clone, Default)]
pub struct MetadataOptions {
    /// Build configuration to read
    pub build_config: PathBuf,

    /// Library root; enables the `External/` source check and is the
    /// default output location
    pub root: Option<PathBuf>,

    /// Explicit output file
    pub output: Option<PathBuf>,
}

/// Why a version was left out of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    EmptyVersion,
    InvalidType(String),
    MissingSource(PathBuf),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptyVersion => write!(f, "version needs to be specified"),
            SkipReason::InvalidType(message) => write!(f, "{}", message),
            SkipReason::MissingSource(path) => {
                write!(f, "could not find sources at {}", path.display())
            }
        }
    }
}

/// A skipped library version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedVersion {
    pub library: String,
    pub version: String,
    pub reason: SkipReason,
}

/// The outcome of metadata generation.
#[derive(Debug, Clone, Default)]
pub struct GenerateReport {
    pub metadata: BuildMetadata,
    pub skipped: Vec<SkippedVersion>,
    /// Where the document was written, if it was
    pub output: Option<PathBuf>,
}

/// Build the metadata document for a build configuration.
///
/// When `root` is given, versions without `External/<library>/<version>`
/// sources are skipped. Libraries are kept even if every version was.
pub fn generate_metadata(config: &BuildConfig, root: Option<&RootLayout>) -> GenerateReport {
    let mut report = GenerateReport::default();

    for (library, versions) in &config.libraries {
        let mut entry = LibraryEntry::new(library.as_str());

        for (version, settings) in versions {
            let skip = if version.is_empty() {
                Some(SkipReason::EmptyVersion)
            } else if let Err(message) = settings.library_type() {
                Some(SkipReason::InvalidType(message))
            } else {
                root.map(|layout| layout.external_source_dir(library, version))
                    .filter(|path| !path.exists())
                    .map(SkipReason::MissingSource)
            };

            if let Some(reason) = skip {
                tracing::warn!("Skipping `{}` {:?}: {}", library, version, reason);
                report.skipped.push(SkippedVersion {
                    library: library.clone(),
                    version: version.clone(),
                    reason,
                });
                continue;
            }

            entry = entry.with_version(
                VersionEntry::new(version.as_str())
                    .with_definitions(settings.public_definitions.iter().cloned()),
            );
        }

        report.metadata.libraries.push(entry);
    }

    report
}

/// Generate `BuildMetadata.xml` from a build configuration file.
pub fn write_metadata(opts: &MetadataOptions) -> Result<GenerateReport> {
    let config = BuildConfig::load(&opts.build_config)?;
    let layout = opts.root.as_ref().map(RootLayout::new);

    let output = match (&opts.output, &layout) {
        (Some(path), _) => path.clone(),
        (None, Some(layout)) => layout.metadata_path(),
        (None, None) => anyhow::bail!(
            "no output location for the metadata document\n\
             help: Pass --output <FILE> or --root <DIR>"
        ),
    };

    let mut report = generate_metadata(&config, layout.as_ref());
    report
        .metadata
        .save(&output)
        .with_context(|| format!("failed to write metadata: {}", output.display()))?;

    tracing::info!(
        "Wrote {} libraries to {}",
        report.metadata.libraries.len(),
        output.display()
    );
    report.output = Some(output);

    Ok(report)
}

/// Summarise skipped versions as a warning, if there were any.
pub fn skipped_warning(report: &GenerateReport) -> Option<Diagnostic> {
    if report.skipped.is_empty() {
        return None;
    }

    let mut diag = Diagnostic::warning(format!(
        "skipped {} library version(s); they are not in the metadata document",
        report.skipped.len()
    ));
    for skip in &report.skipped {
        diag = diag.with_context(format!("{} {:?}: {}", skip.library, skip.version, skip.reason));
    }
    Some(diag.with_suggestion("Fix the entries in the build configuration and run `prebuilt metadata` again"))
}

/// Load the metadata document under a library root.
pub fn load_metadata(root: &Path) -> Result<BuildMetadata> {
    let path = RootLayout::new(root).metadata_path();
    BuildMetadata::load(&path).with_context(|| {
        format!(
            "failed to load metadata: {}\n{}",
            path.display(),
            suggestions::REGENERATE_METADATA
        )
    })
}

/// Render the libraries, versions and definitions of a document.
pub fn format_listing(metadata: &BuildMetadata) -> String {
    if metadata.libraries.is_empty() {
        return "No libraries declared\n".to_string();
    }

    let mut out = String::new();
    for library in &metadata.libraries {
        let name = library.name.as_deref().unwrap_or("<unnamed>");
        if library.versions.is_empty() {
            out.push_str(&format!("{} (no versions)\n", name));
        }
        for version in &library.versions {
            let number = version.number.as_deref().unwrap_or("<unnumbered>");
            out.push_str(&format!("{}-{}\n", name, number));
            for definition in &version.definitions {
                out.push_str(&format!("    {}\n", definition));
            }
        }
    }
    out
}
