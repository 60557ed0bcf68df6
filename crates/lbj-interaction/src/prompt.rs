//! System instruction and output schema shared by every provider binding.

use lbj_core::specialist::SpecialistId;
use lbj_core::{LbjError, Result};
use minijinja::{Environment, context};
use serde::Serialize;
use serde_json::{Value, json};

const SYSTEM_INSTRUCTION_TEMPLATE: &str = r#"You are LBJ-Orchestrator-AI, the master intake and coordination system for the LBJ AI Operating System.
Your role is to guide users, interpret intent from text or files, route requests, and teach users exactly how to use the specialist systems.

AVAILABLE SYSTEMS:
{% for s in specialists -%}
- {{ s.id }}: {{ s.description | lower }}
{% endfor %}
ROUTING LOGIC:
{% for s in specialists -%}
- {{ s.routing_topics }} -> {{ s.id }}
{% endfor %}
CORE RULES:
- Never solve the business problem yourself.
- Never skip the specialist system.
- If a file is provided, summarize it and explain its context in the 'keyContext' field.

Your response MUST be a JSON object following this schema:
{
  "brief": {
    "userIntent": "Summary of user's core request",
    "keyContext": "Crucial details extracted from text or file",
    "recommendedSystems": ["{{ specialists[0].id }}", ...],
    "reasonForRouting": "Why these systems are needed"
  },
  "usageGuide": {
    "systemToOpen": "Specific system(s) the user should access",
    "whatToPasteOrUpload": "Instructions on what data to provide to the specialist",
    "whatThisSystemWillDo": "The specialist's core processing task",
    "whatYoullGetAtTheEnd": "The final deliverable from that system"
  }
}"#;

#[derive(Serialize)]
struct SpecialistEntry {
    id: String,
    description: &'static str,
    routing_topics: &'static str,
}

/// Renders the fixed orchestrator system instruction.
pub fn system_instruction() -> Result<String> {
    let specialists: Vec<SpecialistEntry> = SpecialistId::all()
        .map(|id| {
            let profile = id.profile();
            SpecialistEntry {
                id: id.to_string(),
                description: profile.description,
                routing_topics: profile.routing_topics,
            }
        })
        .collect();

    Environment::new()
        .render_str(SYSTEM_INSTRUCTION_TEMPLATE, context! { specialists })
        .map_err(|e| LbjError::config(format!("Failed to render system instruction: {e}")))
}

const BRIEF_FIELDS: [&str; 4] = [
    "userIntent",
    "keyContext",
    "recommendedSystems",
    "reasonForRouting",
];

const GUIDE_FIELDS: [&str; 4] = [
    "systemToOpen",
    "whatToPasteOrUpload",
    "whatThisSystemWillDo",
    "whatYoullGetAtTheEnd",
];

/// Output schema in the OpenAPI subset Gemini's `responseSchema` accepts.
pub fn gemini_response_schema() -> Value {
    let string = || json!({ "type": "STRING" });
    json!({
        "type": "OBJECT",
        "properties": {
            "brief": {
                "type": "OBJECT",
                "properties": {
                    "userIntent": string(),
                    "keyContext": string(),
                    "recommendedSystems": { "type": "ARRAY", "items": string() },
                    "reasonForRouting": string(),
                },
                "required": BRIEF_FIELDS,
            },
            "usageGuide": {
                "type": "OBJECT",
                "properties": {
                    "systemToOpen": string(),
                    "whatToPasteOrUpload": string(),
                    "whatThisSystemWillDo": string(),
                    "whatYoullGetAtTheEnd": string(),
                },
                "required": GUIDE_FIELDS,
            }
        },
        "required": ["brief", "usageGuide"],
    })
}

/// Output schema as strict JSON Schema, for OpenAI `response_format`.
///
/// Strict mode requires every property to be listed as required and
/// `additionalProperties` to be false at every object level.
pub fn json_response_schema() -> Value {
    let string = || json!({ "type": "string" });
    json!({
        "type": "object",
        "properties": {
            "brief": {
                "type": "object",
                "properties": {
                    "userIntent": string(),
                    "keyContext": string(),
                    "recommendedSystems": { "type": "array", "items": string() },
                    "reasonForRouting": string(),
                },
                "required": BRIEF_FIELDS,
                "additionalProperties": false,
            },
            "usageGuide": {
                "type": "object",
                "properties": {
                    "systemToOpen": string(),
                    "whatToPasteOrUpload": string(),
                    "whatThisSystemWillDo": string(),
                    "whatYoullGetAtTheEnd": string(),
                },
                "required": GUIDE_FIELDS,
                "additionalProperties": false,
            }
        },
        "required": ["brief", "usageGuide"],
        "additionalProperties": false,
    })
}
