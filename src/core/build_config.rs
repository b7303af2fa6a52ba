//! Build configuration consumed by the external library build step.
//!
//! ```toml
//! [general]
//! cmake_version = "3.21"
//!
//! [zlib."1.2"]
//! type = "static"
//! public_definitions = ["ZLIB_STATIC"]
//! ```
//!
//! Every top-level table other than `general` is a library, keyed by
//! version. Only the parts the metadata document needs are modelled here;
//! other keys (CMake flags, include folders) are accepted and ignored.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// How a library version is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryType {
    /// Headers are synced, nothing is compiled
    #[default]
    Header,
    Static,
    Dynamic,
}

impl FromStr for LibraryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "header" => Ok(LibraryType::Header),
            "static" => Ok(LibraryType::Static),
            "dynamic" => Ok(LibraryType::Dynamic),
            _ => Err(format!(
                "invalid library type '{}'; expected 'header', 'static', or 'dynamic'",
                s
            )),
        }
    }
}

impl fmt::Display for LibraryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LibraryType::Header => write!(f, "header"),
            LibraryType::Static => write!(f, "static"),
            LibraryType::Dynamic => write!(f, "dynamic"),
        }
    }
}

/// The `[general]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Minimum CMake version for the build step
    pub cmake_version: Option<String>,
}

/// One `[<library>."<version>"]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionConfig {
    /// Raw `type` value; validated by [`VersionConfig::library_type`].
    #[serde(rename = "type")]
    pub kind: Option<String>,

    /// Definitions every consumer of this version must compile with
    pub public_definitions: Vec<String>,
}

impl VersionConfig {
    /// The declared library type, `header` when absent.
    pub fn library_type(&self) -> Result<LibraryType, String> {
        match &self.kind {
            Some(kind) => kind.parse(),
            None => Ok(LibraryType::default()),
        }
    }
}

/// A parsed build configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuildConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    /// Library name -> version -> settings
    #[serde(flatten)]
    pub libraries: BTreeMap<String, BTreeMap<String, VersionConfig>>,
}

impl BuildConfig {
    /// Load a build configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read build config: {}", path.display()))?;

        Self::parse(&contents)
            .with_context(|| format!("failed to parse build config: {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::SAMPLE_BUILD_CONFIG;

    #[test]
    fn test_parse_sample() {
        let config = BuildConfig::parse(SAMPLE_BUILD_CONFIG).unwrap();

        assert_eq!(config.general.cmake_version.as_deref(), Some("3.21"));
        assert!(!config.libraries.contains_key("general"));
        assert_eq!(
            config.libraries.keys().collect::<Vec<_>>(),
            vec!["fmt", "sdl", "zlib"]
        );

        let zlib = &config.libraries["zlib"]["1.2"];
        assert_eq!(zlib.library_type(), Ok(LibraryType::Static));
        assert_eq!(zlib.public_definitions, vec!["ZLIB_STATIC"]);

        let fmt = &config.libraries["fmt"]["10.1"];
        assert_eq!(fmt.library_type(), Ok(LibraryType::Header));
    }

    #[test]
    fn test_invalid_type_is_reported_not_rejected() {
        let config = BuildConfig::parse(SAMPLE_BUILD_CONFIG).unwrap();
        let err = config.libraries["fmt"]["9.0"].library_type().unwrap_err();
        assert!(err.contains("invalid library type 'shared'"));
    }

    #[test]
    fn test_ignores_build_only_keys() {
        let config = BuildConfig::parse(
            r#"
[glm."1.0"]
include_source_folder = "glm"
cmake_flags = { GLM_BUILD_TESTS = "OFF" }
"#,
        )
        .unwrap();
        assert!(config.libraries["glm"]["1.0"].public_definitions.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = BuildConfig::load(&tmp.path().join("BuildConfig.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read build config"));
    }
}
