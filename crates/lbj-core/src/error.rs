//! Error types for the LBJ orchestrator.

use std::time::Duration;

use thiserror::Error;

use crate::config::ProviderKind;

/// Text shown to the user for any failed orchestration round trip.
///
/// Every provider failure collapses into this single message; the detailed
/// error only goes to the log.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "ORCHESTRATOR ERROR: Failed to route request. Check connection and file format.";

/// A shared error type for the entire LBJ workspace.
#[derive(Error, Debug, Clone)]
pub enum LbjError {
    /// No API key is configured for the selected provider binding
    #[error("Missing API credential for {provider}")]
    MissingCredential { provider: ProviderKind },

    /// The prompt was empty or whitespace only
    #[error("Prompt must not be empty")]
    EmptyPrompt,

    /// A request is already in flight for this session
    #[error("A request is already in progress")]
    Busy,

    /// The model returned no text
    #[error("Empty response from {provider}")]
    EmptyResponse { provider: ProviderKind },

    /// The model text did not parse into an orchestration result
    #[error("Malformed response from {provider}: {message}")]
    MalformedResponse {
        provider: ProviderKind,
        message: String,
    },

    /// The provider answered with a non-success HTTP status
    #[error("{provider} API error: {message}")]
    Provider {
        provider: ProviderKind,
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
        retry_after: Option<Duration>,
    },

    /// Network-level failure talking to the provider
    #[error("{provider} transport error: {message}")]
    Transport {
        provider: ProviderKind,
        message: String,
    },

    /// The attachment could not be read or encoded
    #[error("Attachment error: {0}")]
    Attachment(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },
}

impl LbjError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a MissingCredential error
    pub fn missing_credential(provider: ProviderKind) -> Self {
        Self::MissingCredential { provider }
    }

    /// Creates a MalformedResponse error
    pub fn malformed(provider: ProviderKind, message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            provider,
            message: message.into(),
        }
    }

    /// Creates a Transport error
    pub fn transport(provider: ProviderKind, message: impl Into<String>) -> Self {
        Self::Transport {
            provider,
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Attachment error
    pub fn attachment(message: impl Into<String>) -> Self {
        Self::Attachment(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a MissingCredential error
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, Self::MissingCredential { .. })
    }

    /// Check if this is a MalformedResponse error
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse { .. })
    }

    /// Check if this is an EmptyResponse error
    pub fn is_empty_response(&self) -> bool {
        matches!(self, Self::EmptyResponse { .. })
    }

    /// Check if this is a Config error
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Returns true for failures that happened while talking to a provider.
    ///
    /// These are the failures that get collapsed into
    /// [`GENERIC_FAILURE_MESSAGE`] at the session boundary.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential { .. }
                | Self::EmptyResponse { .. }
                | Self::MalformedResponse { .. }
                | Self::Provider { .. }
                | Self::Transport { .. }
        )
    }

    /// The message shown to an end user for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyPrompt | Self::Busy => self.to_string(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for LbjError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for LbjError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for LbjError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, LbjError>`.
pub type Result<T> = std::result::Result<T, LbjError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_failures_collapse_to_generic_message() {
        let errors = [
            LbjError::missing_credential(ProviderKind::Gemini),
            LbjError::EmptyResponse {
                provider: ProviderKind::OpenAI,
            },
            LbjError::malformed(ProviderKind::Gemini, "expected value at line 1"),
            LbjError::transport(ProviderKind::OpenAI, "connection refused"),
        ];

        for err in errors {
            assert!(err.is_provider_failure());
            assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
        }
    }

    #[test]
    fn test_input_errors_keep_their_message() {
        assert_eq!(LbjError::EmptyPrompt.user_message(), "Prompt must not be empty");
        assert!(!LbjError::Busy.is_provider_failure());
    }

    #[test]
    fn test_provider_error_display() {
        let err = LbjError::Provider {
            provider: ProviderKind::Gemini,
            status_code: Some(429),
            message: "HTTP 429: RESOURCE_EXHAUSTED: quota".into(),
            is_retryable: true,
            retry_after: None,
        };
        assert_eq!(
            err.to_string(),
            "gemini API error: HTTP 429: RESOURCE_EXHAUSTED: quota"
        );
    }

    #[test]
    fn test_from_serde_json_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err: LbjError = parse_err.into();
        assert!(matches!(err, LbjError::Serialization { ref format, .. } if format == "JSON"));
    }
}
