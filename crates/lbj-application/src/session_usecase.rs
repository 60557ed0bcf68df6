//! Session use case implementation.
//!
//! `OrchestratorSession` owns one conversation: it validates input, enforces
//! a single in-flight request, calls the injected provider binding, records
//! messages and drives the specialist status grid.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use lbj_core::config::DEFAULT_STATUS_RESET_SECS;
use lbj_core::{
    AppConfig, Attachment, LbjError, Message, OrchestrationProvider, OrchestrationRequest,
    ProviderKind, Result, SpecialistId, StatusBoard, SystemStatus,
};
use tokio::sync::RwLock;

use crate::status_scheduler::StatusResetScheduler;

/// Session tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// How long indicators stay active after a routed response.
    pub status_reset_delay: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            status_reset_delay: Duration::from_secs(DEFAULT_STATUS_RESET_SECS),
        }
    }
}

impl From<&AppConfig> for SessionConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            status_reset_delay: Duration::from_secs(config.status_reset_secs),
        }
    }
}

/// Result of a submission that reached the provider.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// The provider returned a complete brief and usage guide.
    Routed {
        message: Message,
        activated: Vec<SpecialistId>,
    },
    /// The provider call failed; `message` carries the user-facing text.
    Failed { message: Message, error: LbjError },
}

impl SubmitOutcome {
    pub fn message(&self) -> &Message {
        match self {
            Self::Routed { message, .. } | Self::Failed { message, .. } => message,
        }
    }

    pub fn is_routed(&self) -> bool {
        matches!(self, Self::Routed { .. })
    }
}

/// Clears the busy flag when the submission ends, whichever way it ends.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// One orchestrator conversation.
///
/// # Thread Safety
///
/// The message log and status board sit behind `tokio::sync::RwLock` in
/// `Arc`s shared with the reset task. At most one submission runs at a time.
pub struct OrchestratorSession {
    provider: Arc<dyn OrchestrationProvider>,
    config: SessionConfig,
    messages: Arc<RwLock<Vec<Message>>>,
    board: Arc<RwLock<StatusBoard>>,
    scheduler: StatusResetScheduler,
    busy: AtomicBool,
}

impl OrchestratorSession {
    pub fn new(provider: Arc<dyn OrchestrationProvider>, config: SessionConfig) -> Self {
        let board = Arc::new(RwLock::new(StatusBoard::new()));
        Self {
            provider,
            config,
            messages: Arc::new(RwLock::new(Vec::new())),
            scheduler: StatusResetScheduler::new(Arc::clone(&board)),
            board,
            busy: AtomicBool::new(false),
        }
    }

    /// Submits a prompt with an optional attachment.
    ///
    /// Returns `Err` only for input that never reaches the provider
    /// (`EmptyPrompt`, `Busy`). Provider failures are reported as
    /// [`SubmitOutcome::Failed`] with the generic user-facing message.
    pub async fn submit(
        &self,
        prompt: &str,
        attachment: Option<Attachment>,
    ) -> Result<SubmitOutcome> {
        let request = OrchestrationRequest::new(prompt)?.with_optional_attachment(attachment);

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("[OrchestratorSession] Rejected submission while a request is in flight");
            return Err(LbjError::Busy);
        }
        let _busy = BusyGuard(&self.busy);

        let user_message = Message::user(
            request.prompt(),
            request.attachment().map(|a| a.file_name.clone()),
        );
        let request_id = user_message.id.clone();
        self.messages.write().await.push(user_message);

        tracing::info!(
            "[OrchestratorSession] Routing request {} via {} ({})",
            request_id,
            self.provider.kind(),
            self.provider.model()
        );

        let outcome = match self.provider.orchestrate(&request).await {
            Ok(result) => {
                let unknown = result.brief.unknown_recommendations();
                if !unknown.is_empty() {
                    tracing::warn!(
                        "[OrchestratorSession] Ignoring unknown recommended systems: {:?}",
                        unknown
                    );
                }

                let activated = {
                    let mut board = self.board.write().await;
                    self.scheduler.cancel();
                    board.activate(result.brief.recommended_systems.as_slice())
                };
                self.scheduler
                    .schedule(request_id.clone(), self.config.status_reset_delay);

                tracing::info!(
                    "[OrchestratorSession] Request {} routed to {:?}",
                    request_id,
                    activated
                );

                SubmitOutcome::Routed {
                    message: Message::routed(result),
                    activated,
                }
            }
            Err(error) => {
                tracing::error!(
                    "[OrchestratorSession] Request {} failed: {}",
                    request_id,
                    error
                );
                SubmitOutcome::Failed {
                    message: Message::orchestrator_text(error.user_message()),
                    error,
                }
            }
        };

        self.messages.write().await.push(outcome.message().clone());
        Ok(outcome)
    }

    /// Conversation so far, oldest first.
    pub async fn messages(&self) -> Vec<Message> {
        self.messages.read().await.clone()
    }

    /// Specialist grid in board order.
    pub async fn statuses(&self) -> Vec<SystemStatus> {
        self.board.read().await.snapshot()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    pub fn provider_kind(&self) -> ProviderKind {
        self.provider.kind()
    }

    pub fn provider_model(&self) -> &str {
        self.provider.model()
    }
}
