//! Conversation message types.
//!
//! Messages live only for the lifetime of a session; they are created once
//! and never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::brief::{OrchestrationResult, OrchestratorBrief, UsageGuide};

/// Represents the author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// Message typed by the user.
    User,
    /// Message produced by the orchestrator (a routed result or an error).
    Orchestrator,
}

/// A single turn in the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub role: MessageRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brief: Option<OrchestratorBrief>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_guide: Option<UsageGuide>,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    fn base(role: MessageRole) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text: None,
            file_name: None,
            brief: None,
            usage_guide: None,
            timestamp: Utc::now(),
        }
    }

    /// A user turn with optional attachment name.
    pub fn user(text: impl Into<String>, file_name: Option<String>) -> Self {
        Self {
            text: Some(text.into()),
            file_name,
            ..Self::base(MessageRole::User)
        }
    }

    /// An orchestrator turn carrying a routed result.
    pub fn routed(result: OrchestrationResult) -> Self {
        Self {
            brief: Some(result.brief),
            usage_guide: Some(result.usage_guide),
            ..Self::base(MessageRole::Orchestrator)
        }
    }

    /// An orchestrator turn carrying plain text (used for failures).
    pub fn orchestrator_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::base(MessageRole::Orchestrator)
        }
    }

    pub fn has_result(&self) -> bool {
        self.brief.is_some() && self.usage_guide.is_some()
    }
}
