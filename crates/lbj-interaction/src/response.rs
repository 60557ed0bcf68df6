//! Strict parsing of model output into an orchestration result.

use lbj_core::{LbjError, OrchestrationResult, ProviderKind, Result};

/// Parses the model's text as an [`OrchestrationResult`].
///
/// Missing or blank text is `EmptyResponse`. Anything that is not exactly the
/// expected JSON document is `MalformedResponse`; the raw text is logged so the
/// failure can be diagnosed.
pub fn parse_orchestration_result(
    provider: ProviderKind,
    text: Option<&str>,
) -> Result<OrchestrationResult> {
    let raw = match text {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Err(LbjError::EmptyResponse { provider }),
    };

    serde_json::from_str::<OrchestrationResult>(raw.trim()).map_err(|err| {
        tracing::error!(
            "[{}] JSON parse failed: {} | raw response: {}",
            provider,
            err,
            raw
        );
        LbjError::malformed(provider, err.to_string())
    })
}
