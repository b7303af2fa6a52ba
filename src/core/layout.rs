//! On-disk layout of a prebuilt library root and the lookup tables that
//! turn a platform/configuration pair into directory names and file globs.
//!
//! ```text
//! <root>/BuildMetadata.xml
//! <root>/Headers/<name>-<version>/...
//! <root>/Installs/<name>-<version>/<platform>/<configName>/lib/*.<staticExt>
//! <root>/Installs/<name>-<version>/<platform>/<configName>/bin/*.<dynamicExt>
//! ```
//!
//! The tables are total over what they contain and fail hard on anything
//! else: a configuration or platform without an entry is a configuration
//! error, never a silent default.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use miette::Diagnostic as MietteDiagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::platform::{Configuration, Platform};
use crate::core::spec::LibrarySpec;

/// Name of the metadata document at the root.
pub const METADATA_FILE: &str = "BuildMetadata.xml";
pub const HEADERS_DIR: &str = "Headers";
pub const INSTALLS_DIR: &str = "Installs";
/// Source trees consumed by the external build step.
pub const EXTERNAL_DIR: &str = "External";
pub const LIB_DIR: &str = "lib";
pub const BIN_DIR: &str = "bin";

/// Kind of native library artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryKind {
    Static,
    Dynamic,
}

impl fmt::Display for LibraryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryKind::Static => write!(f, "static"),
            LibraryKind::Dynamic => write!(f, "dynamic"),
        }
    }
}

/// Lookup and validation failures for the layout tables.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum LayoutError {
    #[error("no install directory name is mapped for configuration `{configuration}`")]
    #[diagnostic(
        code(prebuilt::layout::unmapped_configuration),
        help("Add an entry for it under [configurations] in .prebuilt/config.toml")
    )]
    UnmappedConfiguration { configuration: Configuration },

    #[error("no {kind} library pattern is mapped for platform `{platform}`")]
    #[diagnostic(
        code(prebuilt::layout::unmapped_platform),
        help("Add an entry for it under [platforms] in .prebuilt/config.toml")
    )]
    UnmappedPlatform { platform: Platform, kind: LibraryKind },

    #[error("unknown configuration `{name}` in configuration overrides")]
    #[diagnostic(code(prebuilt::layout::unknown_configuration))]
    UnknownConfiguration { name: String },

    #[error("unknown platform `{name}` in platform overrides")]
    #[diagnostic(code(prebuilt::layout::unknown_platform))]
    UnknownPlatform { name: String },

    #[error("configuration `{configuration}` maps to an empty directory name")]
    #[diagnostic(code(prebuilt::layout::empty_name))]
    EmptyConfigurationName { configuration: Configuration },

    #[error("invalid {kind} library pattern `{pattern}` for platform `{platform}`: {message}")]
    #[diagnostic(code(prebuilt::layout::invalid_pattern))]
    InvalidPattern {
        platform: Platform,
        kind: LibraryKind,
        pattern: String,
        message: String,
    },
}

/// Maps build configurations to the directory token used under `Installs/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationNameMap {
    entries: BTreeMap<Configuration, String>,
}

impl ConfigurationNameMap {
    /// Built-in table. Every configuration except `Unknown` installs into
    /// `Release`.
    pub fn defaults() -> Self {
        let entries = [
            (Configuration::Shipping, "Release"),
            (Configuration::Development, "Release"),
            (Configuration::Test, "Release"),
            (Configuration::Debug, "Release"),
            (Configuration::DebugGame, "Release"),
        ]
        .into_iter()
        .map(|(config, name)| (config, name.to_string()))
        .collect();

        ConfigurationNameMap { entries }
    }

    /// Build a table from explicit entries, rejecting empty names.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (Configuration, String)>,
    ) -> Result<Self, LayoutError> {
        let mut map = ConfigurationNameMap {
            entries: BTreeMap::new(),
        };
        for (configuration, name) in entries {
            map.insert(configuration, name)?;
        }
        Ok(map)
    }

    /// Apply overrides keyed by configuration name (case-insensitive).
    pub fn with_overrides(mut self, overrides: &BTreeMap<String, String>) -> Result<Self, LayoutError> {
        for (key, name) in overrides {
            let configuration = key
                .parse::<Configuration>()
                .map_err(|_| LayoutError::UnknownConfiguration { name: key.clone() })?;
            self.insert(configuration, name.clone())?;
        }
        Ok(self)
    }

    fn insert(&mut self, configuration: Configuration, name: String) -> Result<(), LayoutError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(LayoutError::EmptyConfigurationName { configuration });
        }
        self.entries.insert(configuration, name);
        Ok(())
    }

    /// Directory token for a configuration.
    pub fn get(&self, configuration: Configuration) -> Result<&str, LayoutError> {
        self.entries
            .get(&configuration)
            .map(String::as_str)
            .ok_or(LayoutError::UnmappedConfiguration { configuration })
    }

    /// Iterate over the mapped entries.
    pub fn iter(&self) -> impl Iterator<Item = (Configuration, &str)> {
        self.entries.iter().map(|(c, n)| (*c, n.as_str()))
    }
}

impl Default for ConfigurationNameMap {
    fn default() -> Self {
        Self::defaults()
    }
}

/// A file-name glob such as `*.lib`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryGlob {
    pattern: Pattern,
}

impl LibraryGlob {
    pub fn new(pattern: &str) -> Result<Self, glob::PatternError> {
        Ok(LibraryGlob {
            pattern: Pattern::new(pattern)?,
        })
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// Match a bare file name. Case folding follows the host filesystem.
    pub fn matches(&self, file_name: &str) -> bool {
        let options = MatchOptions {
            case_sensitive: !cfg!(windows),
            require_literal_separator: true,
            require_literal_leading_dot: false,
        };
        self.pattern.matches_with(file_name, options)
    }
}

impl fmt::Display for LibraryGlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-platform override of the library patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionOverride {
    /// Static library pattern, e.g. `*.a`
    #[serde(rename = "static")]
    pub static_glob: Option<String>,

    /// Dynamic library pattern, e.g. `*.so`
    #[serde(rename = "dynamic")]
    pub dynamic_glob: Option<String>,
}

/// Maps platforms to their static and dynamic library file globs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformExtensionMap {
    static_globs: BTreeMap<Platform, LibraryGlob>,
    dynamic_globs: BTreeMap<Platform, LibraryGlob>,
}

impl PlatformExtensionMap {
    /// Built-in table covering Win64, Linux, Mac, IOS and Android.
    pub fn defaults() -> Self {
        let mut map = PlatformExtensionMap {
            static_globs: BTreeMap::new(),
            dynamic_globs: BTreeMap::new(),
        };

        let table = [
            (Platform::Win64, "*.lib", "*.dll"),
            (Platform::Linux, "*.a", "*.so"),
            (Platform::Mac, "*.a", "*.dylib"),
            (Platform::Ios, "*.a", "*.dylib"),
            (Platform::Android, "*.a", "*.so"),
        ];

        for (platform, static_glob, dynamic_glob) in table {
            // The literals above are valid patterns.
            if let (Ok(s), Ok(d)) = (LibraryGlob::new(static_glob), LibraryGlob::new(dynamic_glob)) {
                map.static_globs.insert(platform, s);
                map.dynamic_globs.insert(platform, d);
            }
        }

        map
    }

    /// Apply overrides keyed by platform name (case-insensitive).
    pub fn with_overrides(
        mut self,
        overrides: &BTreeMap<String, ExtensionOverride>,
    ) -> Result<Self, LayoutError> {
        for (key, entry) in overrides {
            let platform = key
                .parse::<Platform>()
                .map_err(|_| LayoutError::UnknownPlatform { name: key.clone() })?;

            if let Some(pattern) = &entry.static_glob {
                self.insert(platform, LibraryKind::Static, pattern)?;
            }
            if let Some(pattern) = &entry.dynamic_glob {
                self.insert(platform, LibraryKind::Dynamic, pattern)?;
            }
        }
        Ok(self)
    }

    fn insert(&mut self, platform: Platform, kind: LibraryKind, pattern: &str) -> Result<(), LayoutError> {
        let invalid = |message: String| LayoutError::InvalidPattern {
            platform,
            kind,
            pattern: pattern.to_string(),
            message,
        };

        if pattern.trim().is_empty() {
            return Err(invalid("pattern is empty".to_string()));
        }
        if pattern.contains('/') || pattern.contains('\\') {
            return Err(invalid("pattern must match a file name, not a path".to_string()));
        }
        let glob = LibraryGlob::new(pattern).map_err(|e| invalid(e.to_string()))?;

        match kind {
            LibraryKind::Static => self.static_globs.insert(platform, glob),
            LibraryKind::Dynamic => self.dynamic_globs.insert(platform, glob),
        };
        Ok(())
    }

    /// Pattern for the given platform and library kind.
    pub fn get(&self, platform: Platform, kind: LibraryKind) -> Result<&LibraryGlob, LayoutError> {
        let table = match kind {
            LibraryKind::Static => &self.static_globs,
            LibraryKind::Dynamic => &self.dynamic_globs,
        };
        table
            .get(&platform)
            .ok_or(LayoutError::UnmappedPlatform { platform, kind })
    }

    pub fn static_glob(&self, platform: Platform) -> Result<&LibraryGlob, LayoutError> {
        self.get(platform, LibraryKind::Static)
    }

    pub fn dynamic_glob(&self, platform: Platform) -> Result<&LibraryGlob, LayoutError> {
        self.get(platform, LibraryKind::Dynamic)
    }
}

impl Default for PlatformExtensionMap {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Path helpers for a prebuilt library root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootLayout {
    root: PathBuf,
}

impl RootLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        RootLayout { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/BuildMetadata.xml`
    pub fn metadata_path(&self) -> PathBuf {
        self.root.join(METADATA_FILE)
    }

    /// `<root>/Headers/<spec>`
    pub fn headers_dir(&self, spec: &LibrarySpec) -> PathBuf {
        self.root.join(HEADERS_DIR).join(spec.as_str())
    }

    /// `<root>/Installs/<spec>/<platform>/<config_name>`
    pub fn install_dir(&self, spec: &LibrarySpec, platform: Platform, config_name: &str) -> PathBuf {
        self.root
            .join(INSTALLS_DIR)
            .join(spec.as_str())
            .join(platform.as_str())
            .join(config_name)
    }

    /// `<root>/External/<name>/<version>`
    pub fn external_source_dir(&self, name: &str, version: &str) -> PathBuf {
        self.root.join(EXTERNAL_DIR).join(name).join(version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration_names() {
        let map = ConfigurationNameMap::defaults();
        for configuration in Configuration::ALL {
            if configuration == Configuration::Unknown {
                continue;
            }
            let name = map.get(configuration).unwrap();
            assert_eq!(name, "Release");
        }
    }

    #[test]
    fn test_unknown_configuration_is_unmapped() {
        let map = ConfigurationNameMap::defaults();
        assert_eq!(
            map.get(Configuration::Unknown),
            Err(LayoutError::UnmappedConfiguration {
                configuration: Configuration::Unknown
            })
        );
    }

    #[test]
    fn test_configuration_overrides() {
        let mut overrides = BTreeMap::new();
        overrides.insert("debug".to_string(), "Debug".to_string());
        overrides.insert("Test".to_string(), " RelWithDebInfo ".to_string());

        let map = ConfigurationNameMap::defaults()
            .with_overrides(&overrides)
            .unwrap();
        assert_eq!(map.get(Configuration::Debug).unwrap(), "Debug");
        assert_eq!(map.get(Configuration::Test).unwrap(), "RelWithDebInfo");
        assert_eq!(map.get(Configuration::Shipping).unwrap(), "Release");
    }

    #[test]
    fn test_configuration_overrides_reject_bad_entries() {
        let mut overrides = BTreeMap::new();
        overrides.insert("Profile".to_string(), "Release".to_string());
        let err = ConfigurationNameMap::defaults()
            .with_overrides(&overrides)
            .unwrap_err();
        assert!(matches!(err, LayoutError::UnknownConfiguration { .. }));

        let mut overrides = BTreeMap::new();
        overrides.insert("Shipping".to_string(), "  ".to_string());
        let err = ConfigurationNameMap::defaults()
            .with_overrides(&overrides)
            .unwrap_err();
        assert_eq!(
            err,
            LayoutError::EmptyConfigurationName {
                configuration: Configuration::Shipping
            }
        );
    }

    #[test]
    fn test_default_extensions() {
        let map = PlatformExtensionMap::defaults();
        assert_eq!(map.static_glob(Platform::Win64).unwrap().as_str(), "*.lib");
        assert_eq!(map.dynamic_glob(Platform::Win64).unwrap().as_str(), "*.dll");
        assert_eq!(map.static_glob(Platform::Linux).unwrap().as_str(), "*.a");
        assert_eq!(map.dynamic_glob(Platform::Linux).unwrap().as_str(), "*.so");
        assert_eq!(map.dynamic_glob(Platform::Mac).unwrap().as_str(), "*.dylib");
        assert_eq!(map.dynamic_glob(Platform::Ios).unwrap().as_str(), "*.dylib");
        assert_eq!(map.dynamic_glob(Platform::Android).unwrap().as_str(), "*.so");
    }

    #[test]
    fn test_unmapped_platform() {
        let map = PlatformExtensionMap::defaults();
        assert_eq!(
            map.static_glob(Platform::LinuxArm64),
            Err(LayoutError::UnmappedPlatform {
                platform: Platform::LinuxArm64,
                kind: LibraryKind::Static
            })
        );
    }

    #[test]
    fn test_platform_overrides() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "LinuxArm64".to_string(),
            ExtensionOverride {
                static_glob: Some("*.a".to_string()),
                dynamic_glob: None,
            },
        );

        let map = PlatformExtensionMap::defaults()
            .with_overrides(&overrides)
            .unwrap();
        assert_eq!(map.static_glob(Platform::LinuxArm64).unwrap().as_str(), "*.a");
        assert!(map.dynamic_glob(Platform::LinuxArm64).is_err());
    }

    #[test]
    fn test_platform_overrides_reject_paths() {
        let mut overrides = BTreeMap::new();
        overrides.insert(
            "Linux".to_string(),
            ExtensionOverride {
                static_glob: Some("lib/*.a".to_string()),
                dynamic_glob: None,
            },
        );

        let err = PlatformExtensionMap::defaults()
            .with_overrides(&overrides)
            .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidPattern { .. }));
    }

    #[test]
    fn test_glob_matches_file_names() {
        let glob = LibraryGlob::new("*.lib").unwrap();
        assert!(glob.matches("zlib.lib"));
        assert!(!glob.matches("zlib.dll"));
        assert!(!glob.matches("zlib.lib.bak"));
    }

    #[test]
    fn test_root_layout_paths() {
        let layout = RootLayout::new("/plugins/ext");
        let spec = LibrarySpec::parse("zlib-1.2").unwrap();

        assert_eq!(layout.metadata_path(), Path::new("/plugins/ext/BuildMetadata.xml"));
        assert_eq!(layout.headers_dir(&spec), Path::new("/plugins/ext/Headers/zlib-1.2"));
        assert_eq!(
            layout.install_dir(&spec, Platform::Win64, "Release"),
            Path::new("/plugins/ext/Installs/zlib-1.2/Win64/Release")
        );
    }
}
