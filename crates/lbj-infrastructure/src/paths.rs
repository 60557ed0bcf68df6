//! Path management for LBJ configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/lbj/               # Config directory
//! ├── config.toml              # Provider selection and model settings
//! ├── secret.json              # API keys
//! └── logs/                    # Application logs
//!     └── lbj.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

const APP_DIR: &str = "lbj";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Files managed under the config directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    Config,
    Secret,
    Logs,
}

/// Resolves LBJ paths, optionally rooted somewhere other than the user's
/// config directory (tests use a temp dir).
#[derive(Debug, Clone, Default)]
pub struct LbjPaths {
    base_path: Option<PathBuf>,
}

impl LbjPaths {
    pub fn new(base_path: Option<&Path>) -> Self {
        Self {
            base_path: base_path.map(Path::to_path_buf),
        }
    }

    /// Returns the LBJ configuration directory (e.g. `~/.config/lbj/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        if let Some(base) = &self.base_path {
            return Ok(base.clone());
        }
        dirs::home_dir()
            .map(|home| home.join(".config").join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path for a managed file or directory.
    pub fn get_path(&self, service: ServiceType) -> Result<PathBuf, PathError> {
        let dir = self.config_dir()?;
        Ok(match service {
            ServiceType::Config => dir.join("config.toml"),
            ServiceType::Secret => dir.join("secret.json"),
            ServiceType::Logs => dir.join("logs"),
        })
    }

    /// Shorthand for the default `secret.json` path.
    pub fn secret_file() -> Result<PathBuf, PathError> {
        Self::default().get_path(ServiceType::Secret)
    }

    /// Shorthand for the default log directory.
    pub fn log_dir() -> Result<PathBuf, PathError> {
        Self::default().get_path(ServiceType::Logs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_under_custom_base() {
        let base = PathBuf::from("/tmp/lbj-test");
        let paths = LbjPaths::new(Some(&base));

        assert_eq!(paths.get_path(ServiceType::Config).unwrap(), base.join("config.toml"));
        assert_eq!(paths.get_path(ServiceType::Secret).unwrap(), base.join("secret.json"));
        assert_eq!(paths.get_path(ServiceType::Logs).unwrap(), base.join("logs"));
    }

    #[test]
    fn test_default_paths_end_with_app_dir() {
        if let Ok(dir) = LbjPaths::default().config_dir() {
            assert!(dir.ends_with(".config/lbj"));
        }
    }
}
