//! Orchestration request passed to a provider.

use crate::attachment::Attachment;
use crate::error::{LbjError, Result};

/// A prompt plus an optional attachment.
///
/// The prompt is stored verbatim; attaching a file never alters it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestrationRequest {
    prompt: String,
    attachment: Option<Attachment>,
}

impl OrchestrationRequest {
    /// Creates a request, rejecting empty or whitespace-only prompts.
    pub fn new(prompt: impl Into<String>) -> Result<Self> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(LbjError::EmptyPrompt);
        }
        Ok(Self {
            prompt,
            attachment: None,
        })
    }

    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    pub fn with_optional_attachment(mut self, attachment: Option<Attachment>) -> Self {
        self.attachment = attachment;
        self
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_prompt_rejected() {
        assert!(matches!(OrchestrationRequest::new(""), Err(LbjError::EmptyPrompt)));
        assert!(matches!(
            OrchestrationRequest::new(" \n\t "),
            Err(LbjError::EmptyPrompt)
        ));
    }

    #[test]
    fn test_attachment_does_not_touch_prompt() {
        let prompt = "  Summarize this file  ";
        let request = OrchestrationRequest::new(prompt)
            .unwrap()
            .with_attachment(Attachment::from_bytes("a.txt", "text/plain", b"data"));

        assert_eq!(request.prompt(), prompt);
        assert_eq!(request.attachment().unwrap().file_name, "a.txt");
    }
}
