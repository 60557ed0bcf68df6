//! OpenAIApiAgent - Chat Completions binding for OpenAI-compatible APIs.
//!
//! Uses `response_format` with a strict JSON schema so the model returns the
//! orchestration document directly.

use async_trait::async_trait;
use lbj_core::{
    Attachment, LbjError, OrchestrationProvider, OrchestrationRequest, OrchestrationResult,
    ProviderKind, Result,
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::http_error::{map_http_error, map_transport_error, parse_retry_after};
use crate::prompt;
use crate::response::parse_orchestration_result;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

const RESPONSE_SCHEMA_NAME: &str = "orchestration_result";

/// Orchestration provider that talks to an OpenAI-compatible HTTP API.
#[derive(Clone)]
pub struct OpenAIApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAIApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LbjError::missing_credential(ProviderKind::OpenAI));
        }
        Ok(Self {
            client: Client::new(),
            api_key,
            model: model.into(),
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
        })
    }

    /// Points the agent at a different API root, e.g. a compatible gateway.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn build_request(
        &self,
        request: &OrchestrationRequest,
        instruction: String,
    ) -> Result<ChatCompletionRequest> {
        let mut content_parts = Vec::with_capacity(2);
        if let Some(attachment) = request.attachment() {
            content_parts.push(Self::attachment_to_content(attachment)?);
        }
        content_parts.push(MessageContent::Text {
            text: request.prompt().to_string(),
        });

        Ok(ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: ChatContent::Text(instruction),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: ChatContent::Parts(content_parts),
                },
            ],
            response_format: json!({
                "type": "json_schema",
                "json_schema": {
                    "name": RESPONSE_SCHEMA_NAME,
                    "strict": true,
                    "schema": prompt::json_response_schema(),
                }
            }),
        })
    }

    /// Images go as data URLs, readable text is inlined, anything else is
    /// sent as a file part.
    fn attachment_to_content(attachment: &Attachment) -> Result<MessageContent> {
        if attachment.is_image() {
            return Ok(MessageContent::ImageUrl {
                image_url: ImageUrl {
                    url: attachment.data_url(),
                },
            });
        }

        if attachment.is_textual() {
            let bytes = attachment.decode()?;
            return Ok(MessageContent::Text {
                text: format!(
                    "Attached file \"{}\" ({}):\n{}",
                    attachment.file_name,
                    attachment.mime_type,
                    String::from_utf8_lossy(&bytes)
                ),
            });
        }

        Ok(MessageContent::File {
            file: FilePayload {
                filename: attachment.file_name.clone(),
                file_data: attachment.data_url(),
            },
        })
    }

    async fn send_request(&self, body: &ChatCompletionRequest) -> Result<Option<String>> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| map_transport_error(ProviderKind::OpenAI, err))?;

        if !response.status().is_success() {
            let status = response.status();
            let retry_after = parse_retry_after(response.headers().get("retry-after"));
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read OpenAI error body".to_string());
            return Err(map_http_error(
                ProviderKind::OpenAI,
                status,
                body_text,
                retry_after,
            ));
        }

        let body_text = response
            .text()
            .await
            .map_err(|err| map_transport_error(ProviderKind::OpenAI, err))?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&body_text).map_err(|err| {
            tracing::error!(
                "[OpenAIApiAgent] Envelope parse failed: {} | raw response: {}",
                err,
                body_text
            );
            LbjError::malformed(
                ProviderKind::OpenAI,
                format!("Failed to parse OpenAI response envelope: {err}"),
            )
        })?;

        Ok(extract_text_response(parsed))
    }
}

#[async_trait]
impl OrchestrationProvider for OpenAIApiAgent {
    async fn orchestrate(&self, request: &OrchestrationRequest) -> Result<OrchestrationResult> {
        let body = self.build_request(request, prompt::system_instruction()?)?;

        tracing::info!(
            "[OpenAIApiAgent] Sending orchestration request (model: {}, attachment: {})",
            self.model,
            request
                .attachment()
                .map(|a| a.mime_type.as_str())
                .unwrap_or("none")
        );

        let text = self.send_request(&body).await?;
        parse_orchestration_result(ProviderKind::OpenAI, text.as_deref())
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAI
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    response_format: Value,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: ChatContent,
}

#[derive(Serialize)]
#[serde(untagged)]
enum ChatContent {
    Text(String),
    Parts(Vec<MessageContent>),
}

enum MessageContent {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
    File { file: FilePayload },
}

// Content parts are tagged by a sibling "type" field.
impl Serialize for MessageContent {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(2))?;

        match self {
            MessageContent::Text { text } => {
                map.serialize_entry("type", "text")?;
                map.serialize_entry("text", text)?;
            }
            MessageContent::ImageUrl { image_url } => {
                map.serialize_entry("type", "image_url")?;
                map.serialize_entry("image_url", image_url)?;
            }
            MessageContent::File { file } => {
                map.serialize_entry("type", "file")?;
                map.serialize_entry("file", file)?;
            }
        }

        map.end()
    }
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Serialize)]
struct FilePayload {
    filename: String,
    file_data: String,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

fn extract_text_response(response: ChatCompletionResponse) -> Option<String> {
    let message = response.choices.into_iter().next()?.message;
    if let Some(refusal) = message.refusal.as_deref() {
        tracing::warn!("[OpenAIApiAgent] Model refused the request: {}", refusal);
    }
    message.content
}
