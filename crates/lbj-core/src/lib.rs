pub mod attachment;
pub mod brief;
pub mod config;
pub mod error;
pub mod message;
pub mod provider;
pub mod request;
pub mod secret;
pub mod specialist;
pub mod status;

// Re-export common types
pub use attachment::Attachment;
pub use brief::{OrchestrationResult, OrchestratorBrief, UsageGuide};
pub use config::{AppConfig, ProviderKind, SecretConfig};
pub use error::{GENERIC_FAILURE_MESSAGE, LbjError, Result};
pub use message::{Message, MessageRole};
pub use provider::OrchestrationProvider;
pub use request::OrchestrationRequest;
pub use specialist::SpecialistId;
pub use status::{StatusBoard, StatusState, SystemStatus};
