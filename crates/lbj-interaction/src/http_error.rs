//! HTTP failure mapping shared by the provider bindings.

use std::time::Duration;

use lbj_core::{LbjError, ProviderKind};
use reqwest::StatusCode;
use reqwest::header::HeaderValue;
use serde::Deserialize;

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

/// Error body shape used by both Gemini (`status`) and OpenAI (`type`).
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Builds a `Provider` error from a non-success response.
pub(crate) fn map_http_error(
    provider: ProviderKind,
    status: StatusCode,
    body: String,
    retry_after: Option<Duration>,
) -> LbjError {
    let detail = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    LbjError::Provider {
        provider,
        status_code: Some(status.as_u16()),
        message: format!("HTTP {}: {}", status.as_u16(), detail),
        is_retryable,
        retry_after,
    }
}

/// Maps a reqwest failure (connect, timeout, body) to `Transport`.
pub(crate) fn map_transport_error(provider: ProviderKind, err: reqwest::Error) -> LbjError {
    LbjError::transport(provider, format!("{provider} API request failed: {err}"))
}

pub(crate) fn parse_retry_after(header: Option<&HeaderValue>) -> Option<Duration> {
    let value = header?.to_str().ok()?;
    // HTTP-date values are not handled
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gemini_error_body() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        let err = map_http_error(
            ProviderKind::Gemini,
            StatusCode::BAD_REQUEST,
            body.to_string(),
            None,
        );
        match err {
            LbjError::Provider {
                status_code,
                message,
                is_retryable,
                ..
            } => {
                assert_eq!(status_code, Some(400));
                assert_eq!(message, "HTTP 400: INVALID_ARGUMENT: API key not valid.");
                assert!(!is_retryable);
            }
            other => panic!("Expected Provider error, got {other:?}"),
        }
    }

    #[test]
    fn test_openai_error_body_and_retry_after() {
        let body = r#"{"error":{"message":"Rate limit reached","type":"requests","code":null}}"#;
        let err = map_http_error(
            ProviderKind::OpenAI,
            StatusCode::TOO_MANY_REQUESTS,
            body.to_string(),
            parse_retry_after(Some(&HeaderValue::from_static("7"))),
        );
        match err {
            LbjError::Provider {
                message,
                is_retryable,
                retry_after,
                ..
            } => {
                assert_eq!(message, "HTTP 429: Rate limit reached");
                assert!(is_retryable);
                assert_eq!(retry_after, Some(Duration::from_secs(7)));
            }
            other => panic!("Expected Provider error, got {other:?}"),
        }
    }

    #[test]
    fn test_non_json_body_is_kept() {
        let err = map_http_error(
            ProviderKind::OpenAI,
            StatusCode::BAD_GATEWAY,
            "upstream down".to_string(),
            None,
        );
        assert!(err.to_string().ends_with("HTTP 502: upstream down"));
    }

    #[test]
    fn test_retry_after_http_date_is_ignored() {
        let header = HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT");
        assert_eq!(parse_retry_after(Some(&header)), None);
        assert_eq!(parse_retry_after(None), None);
    }
}
