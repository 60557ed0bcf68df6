//! Structured output produced by the orchestrator model.

use serde::{Deserialize, Serialize};

use crate::specialist::SpecialistId;

/// Summary of the user's intent and the routing decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestratorBrief {
    pub user_intent: String,
    pub key_context: String,
    /// Raw identifiers as returned by the model. May contain values outside
    /// the known specialist set.
    pub recommended_systems: Vec<String>,
    pub reason_for_routing: String,
}

impl OrchestratorBrief {
    /// Recommended identifiers that are not known specialists.
    pub fn unknown_recommendations(&self) -> Vec<&str> {
        self.recommended_systems
            .iter()
            .map(String::as_str)
            .filter(|raw| SpecialistId::parse(raw).is_none())
            .collect()
    }
}

/// Instructions on which specialist to open next and how to use it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageGuide {
    pub system_to_open: String,
    pub what_to_paste_or_upload: String,
    pub what_this_system_will_do: String,
    pub what_youll_get_at_the_end: String,
}

/// A complete orchestration result. Both parts are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrchestrationResult {
    pub brief: OrchestratorBrief,
    pub usage_guide: UsageGuide,
}
