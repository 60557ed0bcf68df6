//! Secret service implementation.
//!
//! Loads API keys from `secret.json`, falling back to environment variables
//! for any provider the file does not configure.

use crate::storage::{SecretStorage, SecretStorageError};
use lbj_core::config::{GeminiConfig, OpenAIConfig};
use lbj_core::secret::SecretService;
use lbj_core::{LbjError, Result, SecretConfig};
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// Gemini key variables, in lookup order.
pub const GEMINI_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];
pub const OPENAI_KEY_VAR: &str = "OPENAI_API_KEY";
pub const OPENAI_MODEL_VAR: &str = "OPENAI_MODEL_NAME";
pub const OPENAI_BASE_URL_VAR: &str = "OPENAI_BASE_URL";

/// Service for loading secret configuration.
///
/// The merged result is cached after the first load.
///
/// # Example
///
/// ```ignore
/// use lbj_infrastructure::SecretServiceImpl;
/// use lbj_core::secret::SecretService;
///
/// let service = SecretServiceImpl::new()?;
/// let secrets = service.load_secrets().await?;
/// ```
#[derive(Clone)]
pub struct SecretServiceImpl {
    /// Cached secret config.
    secrets: Arc<RwLock<Option<SecretConfig>>>,
    storage: Arc<SecretStorage>,
    use_env: bool,
}

impl SecretServiceImpl {
    /// Creates a service reading the default `secret.json` with env fallback.
    pub fn new() -> Result<Self> {
        let storage = SecretStorage::new().map_err(|e| LbjError::config(e.to_string()))?;
        Ok(Self::from_storage(storage, true))
    }

    /// Creates a service reading a specific file.
    pub fn with_path(path: PathBuf, use_env: bool) -> Self {
        Self::from_storage(SecretStorage::with_path(path), use_env)
    }

    fn from_storage(storage: SecretStorage, use_env: bool) -> Self {
        Self {
            secrets: Arc::new(RwLock::new(None)),
            storage: Arc::new(storage),
            use_env,
        }
    }

    fn load_secrets_internal(&self) -> Result<SecretConfig> {
        {
            let read_lock = self
                .secrets
                .read()
                .map_err(|_| LbjError::config("Secret cache lock poisoned"))?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let from_file = match self.storage.load() {
            Ok(config) => config,
            Err(SecretStorageError::NotFound(path)) => {
                tracing::debug!("[SecretService] No secret file at {}", path.display());
                SecretConfig::default()
            }
            Err(e) => return Err(LbjError::config(e.to_string())),
        };

        let loaded = if self.use_env {
            apply_env_fallback(from_file, |name| std::env::var(name).ok())
        } else {
            from_file
        };

        tracing::info!(
            "[SecretService] Credentials available: gemini={}, openai={}",
            loaded.gemini.is_some(),
            loaded.openai.is_some()
        );

        let mut write_lock = self
            .secrets
            .write()
            .map_err(|_| LbjError::config("Secret cache lock poisoned"))?;
        *write_lock = Some(loaded.clone());

        Ok(loaded)
    }
}

/// Fills providers missing from the file using `lookup` (normally `env::var`).
pub fn apply_env_fallback<F>(mut config: SecretConfig, lookup: F) -> SecretConfig
where
    F: Fn(&str) -> Option<String>,
{
    let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if config.gemini.is_none()
        && let Some(api_key) = GEMINI_KEY_VARS.iter().find_map(|name| non_blank(*name))
    {
        config.gemini = Some(GeminiConfig {
            api_key,
            model_name: None,
        });
    }

    if config.openai.is_none()
        && let Some(api_key) = non_blank(OPENAI_KEY_VAR)
    {
        config.openai = Some(OpenAIConfig {
            api_key,
            model_name: non_blank(OPENAI_MODEL_VAR),
            base_url: non_blank(OPENAI_BASE_URL_VAR),
        });
    }

    config
}

#[async_trait::async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        self.load_secrets_internal()
    }

    async fn secret_file_exists(&self) -> bool {
        self.storage.exists()
    }
}
