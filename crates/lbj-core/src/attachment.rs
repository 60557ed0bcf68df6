//! File attachments sent alongside a prompt.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{LbjError, Result};

/// Media type used when nothing better is known.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// A single attached file, already base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Original file name, used for display only.
    pub file_name: String,
    /// Media type tag sent to the provider (e.g. `text/plain`).
    pub mime_type: String,
    /// Standard base64 (padded) encoding of the file contents.
    pub data: String,
}

impl Attachment {
    /// Encodes raw bytes into an attachment.
    pub fn from_bytes(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: &[u8],
    ) -> Self {
        let mime_type = mime_type.into();
        Self {
            file_name: file_name.into(),
            mime_type: if mime_type.trim().is_empty() {
                FALLBACK_MIME_TYPE.to_string()
            } else {
                mime_type
            },
            data: BASE64_STANDARD.encode(bytes),
        }
    }

    /// Decodes the payload back to bytes.
    pub fn decode(&self) -> Result<Vec<u8>> {
        BASE64_STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| LbjError::attachment(format!("Invalid base64 payload: {e}")))
    }

    /// `data:` URL form, as accepted by OpenAI-compatible APIs.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }

    /// True for media types whose bytes are readable text.
    pub fn is_textual(&self) -> bool {
        let mime = self.mime_type.as_str();
        mime.starts_with("text/")
            || matches!(
                mime,
                "application/json" | "application/xml" | "application/csv" | "application/x-yaml"
            )
    }
}
