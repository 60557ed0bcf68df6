//! Configuration service implementation.
//!
//! Loads `config.toml` and layers environment overrides on top.

use crate::paths::{LbjPaths, ServiceType};
use crate::storage::ConfigStorage;
use lbj_core::{AppConfig, LbjError, ProviderKind, Result};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Environment variable that selects the provider binding.
pub const PROVIDER_ENV_VAR: &str = "LBJ_PROVIDER";

/// Configuration service that loads and caches `AppConfig`.
#[derive(Clone)]
pub struct ConfigService {
    config: Arc<RwLock<Option<AppConfig>>>,
    storage: Arc<ConfigStorage>,
}

impl ConfigService {
    /// Creates a service for the default `config.toml`.
    pub fn new() -> Result<Self> {
        let path = LbjPaths::default()
            .get_path(ServiceType::Config)
            .map_err(|e| LbjError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a service for a specific file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config: Arc::new(RwLock::new(None)),
            storage: Arc::new(ConfigStorage::new(path)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    ///
    /// Environment overrides are applied on every fresh load.
    pub fn get_config(&self) -> Result<AppConfig> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|_| LbjError::config("Config cache lock poisoned"))?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let from_file = self.storage.load().map_err(|e| {
            LbjError::config(format!(
                "Failed to load {}: {}",
                self.storage.path().display(),
                e
            ))
        })?;
        let loaded = apply_env_overrides(from_file, |name| std::env::var(name).ok())?;

        tracing::info!(
            "[ConfigService] Loaded configuration (provider: {}, status reset: {}s)",
            loaded.provider,
            loaded.status_reset_secs
        );

        let mut write_lock = self
            .config
            .write()
            .map_err(|_| LbjError::config("Config cache lock poisoned"))?;
        *write_lock = Some(loaded.clone());

        Ok(loaded)
    }
}

/// Applies `LBJ_PROVIDER` if set. An unrecognised value is a config error
/// rather than a silent fallback.
pub fn apply_env_overrides<F>(mut config: AppConfig, lookup: F) -> Result<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(PROVIDER_ENV_VAR).filter(|v| !v.trim().is_empty()) {
        config.provider = value.trim().parse::<ProviderKind>().map_err(|_| {
            LbjError::config(format!(
                "{PROVIDER_ENV_VAR} must be 'gemini' or 'openai', got '{value}'"
            ))
        })?;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_env_override_selects_provider() {
        let config = apply_env_overrides(AppConfig::default(), |name| {
            (name == PROVIDER_ENV_VAR).then(|| "openai".to_string())
        })
        .unwrap();
        assert_eq!(config.provider, ProviderKind::OpenAI);
    }

    #[test]
    fn test_env_override_rejects_unknown_provider() {
        let err = apply_env_overrides(AppConfig::default(), |_| Some("claude".to_string()))
            .unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_no_env_keeps_file_value() {
        let file = AppConfig {
            provider: ProviderKind::OpenAI,
            ..AppConfig::default()
        };
        let config = apply_env_overrides(file.clone(), |_| None).unwrap();
        assert_eq!(config, file);
    }

    #[test]
    fn test_get_config_reads_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "status_reset_secs = 9\n[gemini]\nmodel_name = \"gemini-2.5-pro\"\n")
            .unwrap();

        let service = ConfigService::with_path(path);
        let config = service.get_config().unwrap();
        assert_eq!(config.status_reset_secs, 9);
        assert_eq!(config.gemini.model_name.as_deref(), Some("gemini-2.5-pro"));
    }

    #[test]
    fn test_get_config_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "status_reset_secs = \"soon\"").unwrap();

        let err = ConfigService::with_path(path).get_config().unwrap_err();
        assert!(err.is_config_error());
    }
}
