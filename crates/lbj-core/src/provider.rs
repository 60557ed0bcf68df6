//! The orchestration provider seam.

use async_trait::async_trait;

use crate::brief::OrchestrationResult;
use crate::config::ProviderKind;
use crate::error::Result;
use crate::request::OrchestrationRequest;

/// Produces a structured orchestration result from a prompt and an optional
/// attachment.
///
/// Each model provider binding is one implementation; the session owns a
/// single instance chosen by configuration.
#[async_trait]
pub trait OrchestrationProvider: Send + Sync {
    /// Performs one request/response round trip with the model.
    ///
    /// Implementations must not retry and must never return a partially
    /// populated result.
    async fn orchestrate(&self, request: &OrchestrationRequest) -> Result<OrchestrationResult>;

    /// Which binding this is.
    fn kind(&self) -> ProviderKind;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;
}
