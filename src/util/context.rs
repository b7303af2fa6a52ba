//! Global context for prebuilt operations.
//!
//! Provides centralized access to configuration and paths.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::util::config::{load_config, project_config_path, Config, CONFIG_DIR, CONFIG_FILE};
use crate::util::diagnostic::suggestions;

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global settings (~/.prebuilt/)
    home: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        let home = crate::util::config::global_config_dir()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR));

        Ok(GlobalContext { cwd, home })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Override the global settings directory.
    pub fn with_home(mut self, home: PathBuf) -> Self {
        self.home = home;
        self
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join(CONFIG_FILE)
    }

    /// Get the project configuration file path.
    pub fn project_config_path(&self) -> PathBuf {
        project_config_path(&self.cwd)
    }

    /// Load the merged global and project configuration.
    pub fn load_config(&self) -> Config {
        load_config(&self.config_path(), &self.project_config_path())
    }

    /// Pick the library root: an explicit path wins over `resolve.root`.
    ///
    /// Relative explicit paths are taken from the working directory.
    pub fn root_dir(&self, explicit: Option<&Path>, config: &Config) -> Result<PathBuf> {
        if let Some(path) = explicit {
            return Ok(self.cwd.join(path));
        }
        if let Some(path) = &config.resolve.root {
            return Ok(path.clone());
        }
        bail!("no library root configured\n{}", suggestions::NO_ROOT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_context_paths() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf())
            .unwrap()
            .with_home(tmp.path().join("home"));

        assert_eq!(ctx.config_path(), tmp.path().join("home/config.toml"));
        assert_eq!(
            ctx.project_config_path(),
            tmp.path().join(".prebuilt/config.toml")
        );
    }

    #[test]
    fn test_root_dir_precedence() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).unwrap();

        let mut config = Config::default();
        assert!(ctx.root_dir(None, &config).is_err());

        config.resolve.root = Some(PathBuf::from("/configured"));
        assert_eq!(ctx.root_dir(None, &config).unwrap(), PathBuf::from("/configured"));

        assert_eq!(
            ctx.root_dir(Some(Path::new("ext")), &config).unwrap(),
            tmp.path().join("ext")
        );
    }

    #[test]
    fn test_load_project_config() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf())
            .unwrap()
            .with_home(tmp.path().join("home"));

        std::fs::create_dir_all(tmp.path().join(".prebuilt")).unwrap();
        std::fs::write(
            ctx.project_config_path(),
            "[resolve]\nroot = \"Plugins/BlackExternal\"\n",
        )
        .unwrap();

        let config = ctx.load_config();
        assert_eq!(
            config.resolve.root,
            Some(tmp.path().join("Plugins/BlackExternal"))
        );
    }
}
