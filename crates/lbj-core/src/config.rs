//! Configuration records shared across crates.
//!
//! `SecretConfig` mirrors `secret.json` (API keys), `AppConfig` mirrors
//! `config.toml` (provider selection, model overrides, status reset delay).

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Default delay before the specialist grid returns to idle.
pub const DEFAULT_STATUS_RESET_SECS: u64 = 5;

/// Model provider binding used for orchestration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum ProviderKind {
    /// Google Gemini `generateContent` API
    #[default]
    #[strum(serialize = "gemini")]
    Gemini,
    /// OpenAI-compatible Chat Completions API
    #[strum(serialize = "openai")]
    OpenAI,
}

/// Gemini API credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

/// OpenAI API credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenAIConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Root structure of `secret.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub gemini: Option<GeminiConfig>,
    #[serde(default)]
    pub openai: Option<OpenAIConfig>,
}

impl SecretConfig {
    /// Returns the API key configured for `provider`, ignoring blank keys.
    pub fn api_key_for(&self, provider: ProviderKind) -> Option<&str> {
        let key = match provider {
            ProviderKind::Gemini => self.gemini.as_ref().map(|c| c.api_key.as_str()),
            ProviderKind::OpenAI => self.openai.as_ref().map(|c| c.api_key.as_str()),
        };
        key.filter(|k| !k.trim().is_empty())
    }
}

/// Per-provider model settings from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Root structure of `config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderKind,
    #[serde(default = "default_status_reset_secs")]
    pub status_reset_secs: u64,
    #[serde(default)]
    pub gemini: ProviderSettings,
    #[serde(default)]
    pub openai: ProviderSettings,
}

fn default_status_reset_secs() -> u64 {
    DEFAULT_STATUS_RESET_SECS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            status_reset_secs: DEFAULT_STATUS_RESET_SECS,
            gemini: ProviderSettings::default(),
            openai: ProviderSettings::default(),
        }
    }
}

impl AppConfig {
    /// Settings block for the given provider.
    pub fn settings_for(&self, provider: ProviderKind) -> &ProviderSettings {
        match provider {
            ProviderKind::Gemini => &self.gemini,
            ProviderKind::OpenAI => &self.openai,
        }
    }

    /// Mutable settings block for the given provider.
    pub fn settings_for_mut(&mut self, provider: ProviderKind) -> &mut ProviderSettings {
        match provider {
            ProviderKind::Gemini => &mut self.gemini,
            ProviderKind::OpenAI => &mut self.openai,
        }
    }
}
