//! GeminiApiAgent - Direct REST API binding for Google Gemini.
//!
//! Sends the orchestrator system instruction and a strict `responseSchema`
//! to `generateContent`, then parses the returned text as an orchestration
//! result.

use async_trait::async_trait;
use lbj_core::{
    Attachment, LbjError, OrchestrationProvider, OrchestrationRequest, OrchestrationResult,
    ProviderKind, Result,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::http_error::{map_http_error, map_transport_error, parse_retry_after};
use crate::prompt;
use crate::response::parse_orchestration_result;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-pro-preview";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Orchestration provider that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key and model.
    ///
    /// A blank key is rejected here so no request is ever sent without one.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LbjError::missing_credential(ProviderKind::Gemini));
        }
        Ok(Self {
            client: Client::new(),
            api_key,
            model: model.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
        })
    }

    /// Points the agent at a different API root (proxies, local stubs).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn build_request(
        request: &OrchestrationRequest,
        instruction: String,
    ) -> GenerateContentRequest {
        let mut parts = Vec::with_capacity(2);
        // Inline data goes first, followed by the prompt text.
        if let Some(attachment) = request.attachment() {
            parts.push(Self::attachment_to_part(attachment));
        }
        parts.push(Part::Text {
            text: request.prompt().to_string(),
        });

        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts,
            }],
            system_instruction: Some(Content {
                role: None,
                parts: vec![Part::Text { text: instruction }],
            }),
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: prompt::gemini_response_schema(),
            },
        }
    }

    fn attachment_to_part(attachment: &Attachment) -> Part {
        Part::InlineData {
            inline_data: InlineDataPayload {
                mime_type: attachment.mime_type.clone(),
                data: attachment.data.clone(),
            },
        }
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<Option<String>> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(|err| map_transport_error(ProviderKind::Gemini, err.without_url()))?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(
                ProviderKind::Gemini,
                status,
                body_text,
                retry_after,
            ));
        }

        let body_text = response
            .text()
            .await
            .map_err(|err| map_transport_error(ProviderKind::Gemini, err.without_url()))?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body_text).map_err(|err| {
            tracing::error!(
                "[GeminiApiAgent] Envelope parse failed: {} | raw response: {}",
                err,
                body_text
            );
            LbjError::malformed(
                ProviderKind::Gemini,
                format!("Failed to parse Gemini response envelope: {err}"),
            )
        })?;

        Ok(extract_text_response(parsed))
    }
}

#[async_trait]
impl OrchestrationProvider for GeminiApiAgent {
    async fn orchestrate(&self, request: &OrchestrationRequest) -> Result<OrchestrationResult> {
        let body = Self::build_request(request, prompt::system_instruction()?);

        tracing::info!(
            "[GeminiApiAgent] Sending orchestration request (model: {}, attachment: {})",
            self.model,
            request
                .attachment()
                .map(|a| a.mime_type.as_str())
                .unwrap_or("none")
        );

        let text = self.send_request(&body).await?;
        parse_orchestration_result(ProviderKind::Gemini, text.as_deref())
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataPayload {
    mime_type: String,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
    /// Set on thinking-summary parts, which are not part of the answer.
    #[serde(default)]
    thought: bool,
}

/// Concatenates the answer text of the first candidate.
fn extract_text_response(response: GenerateContentResponse) -> Option<String> {
    let content = response
        .candidates?
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)?;

    let text: String = content
        .parts
        .into_iter()
        .filter(|part| !part.thought)
        .filter_map(|part| part.text)
        .collect();

    if text.is_empty() { None } else { Some(text) }
}
