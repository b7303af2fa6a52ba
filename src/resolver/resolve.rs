//! The library resolution pass.

use std::path::{Path, PathBuf};

use crate::core::layout::{
    ConfigurationNameMap, LibraryGlob, PlatformExtensionMap, RootLayout, BIN_DIR, LIB_DIR,
};
use crate::core::platform::{Configuration, Platform};
use crate::core::spec::LibrarySpec;
use crate::metadata::BuildMetadata;
use crate::resolver::errors::ResolveError;
use crate::resolver::result::ResolutionResult;
use crate::resolver::sink::BuildSink;
use crate::util::fs::matching_files;

/// Inputs fixed for the duration of one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    /// Root of the prebuilt library tree
    pub root: PathBuf,
    pub platform: Platform,
    pub configuration: Configuration,
}

impl BuildContext {
    pub fn new(root: impl Into<PathBuf>, platform: Platform, configuration: Configuration) -> Self {
        BuildContext {
            root: root.into(),
            platform,
            configuration,
        }
    }
}

/// State shared by every library of one pass.
struct Pass<'a> {
    layout: RootLayout,
    platform: Platform,
    configuration: Configuration,
    metadata: BuildMetadata,
    resolver: &'a LibraryResolver,
    /// Looked up when the first library is visited, then reused.
    tables: Option<Tables<'a>>,
}

#[derive(Clone, Copy)]
struct Tables<'a> {
    config_name: &'a str,
    static_glob: &'a LibraryGlob,
    dynamic_glob: &'a LibraryGlob,
}

/// Resolves library specs against a prebuilt library tree.
///
/// The resolver holds only its lookup tables; every pass reads the
/// filesystem and metadata fresh and returns a new [`ResolutionResult`].
#[derive(Debug, Clone, Default)]
pub struct LibraryResolver {
    configurations: ConfigurationNameMap,
    extensions: PlatformExtensionMap,
}

impl LibraryResolver {
    /// Create a resolver with the built-in tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a resolver with explicit tables.
    pub fn with_tables(configurations: ConfigurationNameMap, extensions: PlatformExtensionMap) -> Self {
        LibraryResolver {
            configurations,
            extensions,
        }
    }

    pub fn configurations(&self) -> &ConfigurationNameMap {
        &self.configurations
    }

    pub fn extensions(&self) -> &PlatformExtensionMap {
        &self.extensions
    }

    /// Install directory name for a configuration.
    pub fn configuration_name(&self, configuration: Configuration) -> Result<&str, ResolveError> {
        Ok(self.configurations.get(configuration)?)
    }

    /// Run one resolution pass.
    ///
    /// Any error aborts the whole pass; nothing gathered for earlier specs
    /// is returned.
    pub fn resolve<S: AsRef<str>>(
        &self,
        specs: &[S],
        ctx: &BuildContext,
    ) -> Result<ResolutionResult, ResolveError> {
        let mut pass = self.begin(ctx)?;

        let mut result = ResolutionResult::new();
        for raw in specs {
            let spec = LibrarySpec::parse(raw.as_ref())?;
            pass.resolve_library(&spec, &mut result)?;
        }

        tracing::info!(
            "Resolved {} libraries for {} {}: {} include paths, {} static libraries, {} runtime files, {} definitions",
            specs.len(),
            ctx.platform,
            ctx.configuration,
            result.include_paths.len(),
            result.static_libraries.len(),
            result.runtime_dependencies.len(),
            result.definitions.len()
        );

        Ok(result)
    }

    /// Run one resolution pass and hand the result to `sink`.
    ///
    /// The sink is only touched once the whole pass has succeeded.
    pub fn resolve_into<S: AsRef<str>>(
        &self,
        specs: &[S],
        ctx: &BuildContext,
        sink: &mut dyn BuildSink,
    ) -> Result<(), ResolveError> {
        let result = self.resolve(specs, ctx)?;
        result.apply(sink);
        Ok(())
    }

    fn begin(&self, ctx: &BuildContext) -> Result<Pass<'_>, ResolveError> {
        let layout = RootLayout::new(&ctx.root);
        let metadata_path = layout.metadata_path();
        let metadata = BuildMetadata::load(&metadata_path).map_err(|source| {
            ResolveError::MetadataLoad {
                path: metadata_path.clone(),
                source,
            }
        })?;
        tracing::debug!(
            "Loaded {} library entries from {}",
            metadata.libraries.len(),
            metadata_path.display()
        );

        Ok(Pass {
            layout,
            platform: ctx.platform,
            configuration: ctx.configuration,
            metadata,
            resolver: self,
            tables: None,
        })
    }
}

impl<'a> Pass<'a> {
    fn tables(&mut self) -> Result<Tables<'a>, ResolveError> {
        if let Some(tables) = self.tables {
            return Ok(tables);
        }

        let resolver = self.resolver;
        let tables = Tables {
            config_name: resolver.configurations.get(self.configuration)?,
            static_glob: resolver.extensions.static_glob(self.platform)?,
            dynamic_glob: resolver.extensions.dynamic_glob(self.platform)?,
        };
        self.tables = Some(tables);
        Ok(tables)
    }

    fn resolve_library(
        &mut self,
        spec: &LibrarySpec,
        result: &mut ResolutionResult,
    ) -> Result<(), ResolveError> {
        let tables = self.tables()?;

        let header_dir = self.layout.headers_dir(spec);
        if header_dir.is_dir() {
            result.add_include_path(&header_dir);
        } else {
            tracing::debug!("{}: no headers at {}", spec, header_dir.display());
        }

        let install_dir = self
            .layout
            .install_dir(spec, self.platform, tables.config_name);

        for lib in list_dir(&install_dir.join(LIB_DIR), tables.static_glob, spec)? {
            result.add_static_library(&lib);
        }

        for bin in list_dir(&install_dir.join(BIN_DIR), tables.dynamic_glob, spec)? {
            result.add_runtime_dependency(&bin);
        }

        match self.metadata.definitions(spec.name(), spec.version()) {
            Some(definitions) => {
                for definition in definitions {
                    result.add_definition(definition);
                }
            }
            None => tracing::debug!("{}: no metadata entry", spec),
        }

        Ok(())
    }
}

/// Files matching `glob` in `dir`, or nothing if `dir` is absent.
fn list_dir(dir: &Path, glob: &LibraryGlob, spec: &LibrarySpec) -> Result<Vec<PathBuf>, ResolveError> {
    if !dir.is_dir() {
        tracing::debug!("{}: no directory at {}", spec, dir.display());
        return Ok(Vec::new());
    }

    matching_files(dir, glob).map_err(|source| ResolveError::ListDirectory {
        path: dir.to_path_buf(),
        source,
    })
}
