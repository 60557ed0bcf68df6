//! Provider selection.
//!
//! The binding is chosen from `AppConfig::provider`; credentials come from
//! `SecretConfig`. A missing key fails here, before any network call.

use std::sync::Arc;

use lbj_core::{AppConfig, LbjError, OrchestrationProvider, ProviderKind, Result, SecretConfig};

use crate::gemini_api_agent::{DEFAULT_GEMINI_MODEL, GeminiApiAgent};
use crate::openai_api_agent::{DEFAULT_OPENAI_MODEL, OpenAIApiAgent};

/// Builds the configured provider binding.
///
/// Model precedence: `config.toml` > `secret.json` > built-in default.
/// Base URL precedence: `config.toml` > `secret.json` (OpenAI only) > default.
pub fn build_provider(
    config: &AppConfig,
    secrets: &SecretConfig,
) -> Result<Arc<dyn OrchestrationProvider>> {
    let provider = config.provider;
    let api_key = secrets
        .api_key_for(provider)
        .ok_or_else(|| LbjError::missing_credential(provider))?;
    let settings = config.settings_for(provider);

    let agent: Arc<dyn OrchestrationProvider> = match provider {
        ProviderKind::Gemini => {
            let model = settings
                .model_name
                .clone()
                .or_else(|| secrets.gemini.as_ref().and_then(|g| g.model_name.clone()))
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

            let mut agent = GeminiApiAgent::new(api_key, model)?;
            if let Some(base_url) = &settings.base_url {
                agent = agent.with_base_url(base_url);
            }
            Arc::new(agent)
        }
        ProviderKind::OpenAI => {
            let openai = secrets.openai.as_ref();
            let model = settings
                .model_name
                .clone()
                .or_else(|| openai.and_then(|o| o.model_name.clone()))
                .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string());

            let mut agent = OpenAIApiAgent::new(api_key, model)?;
            if let Some(base_url) = settings
                .base_url
                .clone()
                .or_else(|| openai.and_then(|o| o.base_url.clone()))
            {
                agent = agent.with_base_url(base_url);
            }
            Arc::new(agent)
        }
    };

    tracing::info!(
        "[ProviderFactory] Using {} provider (model: {})",
        agent.kind(),
        agent.model()
    );

    Ok(agent)
}
