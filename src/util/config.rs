//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.prebuilt/config.toml` - User-wide defaults
//! - Project: `.prebuilt/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config. A relative
//! `resolve.root` is anchored at the directory that holds `.prebuilt/`.
//!
//! ```toml
//! [resolve]
//! root = "Plugins/BlackExternal"
//! libraries = ["zlib-1.2"]
//!
//! [configurations]
//! Debug = "Debug"
//!
//! [platforms.LinuxArm64]
//! static = "*.a"
//! dynamic = "*.so"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::layout::{ConfigurationNameMap, ExtensionOverride, LayoutError, PlatformExtensionMap};
use crate::resolver::LibraryResolver;

/// Name of the per-user and per-project configuration directory.
pub const CONFIG_DIR: &str = ".prebuilt";
pub const CONFIG_FILE: &str = "config.toml";

/// Prebuilt configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Resolution defaults
    pub resolve: ResolveConfig,

    /// Configuration name -> install directory name overrides
    pub configurations: BTreeMap<String, String>,

    /// Platform name -> library pattern overrides
    pub platforms: BTreeMap<String, ExtensionOverride>,
}

/// Resolution defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Root of the prebuilt library tree
    pub root: Option<PathBuf>,

    /// Libraries resolved when none are given on the command line
    pub libraries: Vec<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))?;

        // `<owner>/.prebuilt/config.toml` -> `<owner>`
        if let Some(owner) = path.parent().and_then(Path::parent) {
            if let Some(root) = config.resolve.root.as_mut() {
                if root.is_relative() {
                    *root = owner.join(&*root);
                }
            }
        }

        Ok(config)
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.resolve.root.is_some() {
            self.resolve.root = other.resolve.root;
        }
        if !other.resolve.libraries.is_empty() {
            self.resolve.libraries = other.resolve.libraries;
        }

        for (key, name) in other.configurations {
            self.configurations.retain(|k, _| !k.eq_ignore_ascii_case(&key));
            self.configurations.insert(key, name);
        }

        for (key, entry) in other.platforms {
            let existing = self
                .platforms
                .keys()
                .find(|k| k.eq_ignore_ascii_case(&key))
                .cloned();
            let mut merged = existing
                .and_then(|k| self.platforms.remove(&k))
                .unwrap_or_default();

            if entry.static_glob.is_some() {
                merged.static_glob = entry.static_glob;
            }
            if entry.dynamic_glob.is_some() {
                merged.dynamic_glob = entry.dynamic_glob;
            }
            self.platforms.insert(key, merged);
        }
    }

    /// Build the configuration-name table, defaults plus overrides.
    pub fn configuration_names(&self) -> Result<ConfigurationNameMap, LayoutError> {
        ConfigurationNameMap::defaults().with_overrides(&self.configurations)
    }

    /// Build the library pattern table, defaults plus overrides.
    pub fn platform_extensions(&self) -> Result<PlatformExtensionMap, LayoutError> {
        PlatformExtensionMap::defaults().with_overrides(&self.platforms)
    }

    /// A resolver using this configuration's tables.
    pub fn resolver(&self) -> Result<LibraryResolver, LayoutError> {
        Ok(LibraryResolver::with_tables(
            self.configuration_names()?,
            self.platform_extensions()?,
        ))
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.prebuilt/config.toml)
/// 2. Global config (~/.prebuilt/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global config directory (~/.prebuilt).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR))
}

/// Get the project config path (.prebuilt/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join(CONFIG_FILE)
}
