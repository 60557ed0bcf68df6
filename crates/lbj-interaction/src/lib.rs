//! Model provider bindings for the LBJ orchestrator.
//!
//! Two interchangeable implementations of
//! [`OrchestrationProvider`](lbj_core::OrchestrationProvider):
//! [`GeminiApiAgent`] and [`OpenAIApiAgent`]. Which one a session uses is
//! decided by configuration through [`build_provider`].

pub mod factory;
pub mod gemini_api_agent;
mod http_error;
pub mod openai_api_agent;
pub mod prompt;
pub mod response;

pub use factory::build_provider;
pub use gemini_api_agent::GeminiApiAgent;
pub use openai_api_agent::OpenAIApiAgent;
