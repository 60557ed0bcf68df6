//! Session behavior with a substituted provider binding.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use lbj_application::{OrchestratorSession, SessionConfig, SubmitOutcome};
use lbj_core::{
    Attachment, GENERIC_FAILURE_MESSAGE, LbjError, MessageRole, OrchestrationProvider,
    OrchestrationRequest, OrchestrationResult, OrchestratorBrief, ProviderKind, Result,
    SpecialistId, StatusState, UsageGuide,
};
use tokio::sync::{Mutex, Notify};

fn result_for(systems: &[&str], key_context: &str) -> OrchestrationResult {
    OrchestrationResult {
        brief: OrchestratorBrief {
            user_intent: "Route the request".into(),
            key_context: key_context.into(),
            recommended_systems: systems.iter().map(|s| s.to_string()).collect(),
            reason_for_routing: "Best fit".into(),
        },
        usage_guide: UsageGuide {
            system_to_open: systems.first().copied().unwrap_or_default().into(),
            what_to_paste_or_upload: "Your notes".into(),
            what_this_system_will_do: "Handle it".into(),
            what_youll_get_at_the_end: "A plan".into(),
        },
    }
}

/// Provider that replays scripted results and records what it was sent.
struct ScriptedProvider {
    replies: Mutex<Vec<Result<OrchestrationResult>>>,
    seen: Mutex<Vec<OrchestrationRequest>>,
    calls: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl ScriptedProvider {
    fn new(replies: Vec<Result<OrchestrationResult>>) -> Self {
        Self {
            replies: Mutex::new(replies),
            seen: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    fn gated(replies: Vec<Result<OrchestrationResult>>, gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(replies)
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl OrchestrationProvider for ScriptedProvider {
    async fn orchestrate(&self, request: &OrchestrationRequest) -> Result<OrchestrationResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().await.push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let mut replies = self.replies.lock().await;
        assert!(!replies.is_empty(), "provider called more often than scripted");
        replies.remove(0)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Gemini
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

fn session_with(provider: Arc<ScriptedProvider>, reset_secs: u64) -> OrchestratorSession {
    OrchestratorSession::new(
        provider,
        SessionConfig {
            status_reset_delay: Duration::from_secs(reset_secs),
        },
    )
}

fn status_of(statuses: &[lbj_core::SystemStatus], id: SpecialistId) -> StatusState {
    statuses
        .iter()
        .find(|s| s.id == id)
        .map(|s| s.status)
        .unwrap()
}

#[tokio::test(start_paused = true)]
async fn lead_prompt_routes_to_sales_and_resets_after_delay() {
    let provider = Arc::new(ScriptedProvider::new(vec![Ok(result_for(
        &["LBJ-Sales-AI"],
        "Inbound leads",
    ))]));
    let session = session_with(Arc::clone(&provider), 5);

    let outcome = session
        .submit("Process these leads and draft qualification steps", None)
        .await
        .unwrap();

    match &outcome {
        SubmitOutcome::Routed { message, activated } => {
            assert_eq!(activated, &vec![SpecialistId::Sales]);
            assert!(message.has_result());
            assert_eq!(message.role, MessageRole::Orchestrator);
        }
        other => panic!("Expected routed outcome, got {other:?}"),
    }

    let statuses = session.statuses().await;
    assert_eq!(status_of(&statuses, SpecialistId::Sales), StatusState::Active);
    assert_eq!(status_of(&statuses, SpecialistId::Design), StatusState::Idle);

    tokio::time::sleep(Duration::from_secs(6)).await;
    assert!(
        session
            .statuses()
            .await
            .iter()
            .all(|s| s.status == StatusState::Idle)
    );
}

#[tokio::test]
async fn empty_prompt_makes_no_call_and_records_nothing() {
    let provider = Arc::new(ScriptedProvider::new(vec![]));
    let session = session_with(Arc::clone(&provider), 5);

    let err = session.submit("   \n", None).await.unwrap_err();
    assert!(matches!(err, LbjError::EmptyPrompt));
    assert_eq!(provider.calls(), 0);
    assert!(session.messages().await.is_empty());
    assert!(!session.is_busy());
}

#[tokio::test]
async fn attachment_is_forwarded_without_touching_prompt() {
    let provider = Arc::new(ScriptedProvider::new(vec![Ok(result_for(
        &["LBJ-Ops-AI"],
        "File summary: crew schedule",
    ))]));
    let session = session_with(Arc::clone(&provider), 5);
    let attachment = Attachment::from_bytes("schedule.txt", "text/plain", b"Crew A: Mon");

    session
        .submit("Who owns this?", Some(attachment.clone()))
        .await
        .unwrap();

    let seen = provider.seen.lock().await;
    assert_eq!(seen[0].prompt(), "Who owns this?");
    assert_eq!(seen[0].attachment(), Some(&attachment));

    let messages = session.messages().await;
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, MessageRole::User);
    assert_eq!(messages[0].file_name.as_deref(), Some("schedule.txt"));
    assert_eq!(
        messages[1].brief.as_ref().unwrap().key_context,
        "File summary: crew schedule"
    );
}

#[tokio::test]
async fn unknown_recommendations_are_ignored() {
    let provider = Arc::new(ScriptedProvider::new(vec![Ok(result_for(
        &["LBJ-Unknown-AI", "LBJ-Growth-AI"],
        "Campaign",
    ))]));
    let session = session_with(provider, 5);

    let outcome = session.submit("Plan a launch campaign", None).await.unwrap();
    match outcome {
        SubmitOutcome::Routed { activated, .. } => {
            assert_eq!(activated, vec![SpecialistId::Growth]);
        }
        other => panic!("Expected routed outcome, got {other:?}"),
    }
}

#[tokio::test]
async fn provider_failure_records_generic_message_only() {
    let provider = Arc::new(ScriptedProvider::new(vec![Err(LbjError::malformed(
        ProviderKind::Gemini,
        "missing field `usageGuide`",
    ))]));
    let session = session_with(provider, 5);

    let outcome = session.submit("hello", None).await.unwrap();
    match &outcome {
        SubmitOutcome::Failed { message, error } => {
            assert!(error.is_malformed());
            assert_eq!(message.text.as_deref(), Some(GENERIC_FAILURE_MESSAGE));
            assert!(!message.has_result());
        }
        other => panic!("Expected failed outcome, got {other:?}"),
    }

    let messages = session.messages().await;
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|m| m.brief.is_none()));
    assert!(
        session
            .statuses()
            .await
            .iter()
            .all(|s| s.status == StatusState::Idle)
    );
    assert!(!session.is_busy());
}

#[tokio::test]
async fn concurrent_submit_is_rejected_while_busy() {
    let gate = Arc::new(Notify::new());
    let provider = Arc::new(ScriptedProvider::gated(
        vec![Ok(result_for(&["LBJ-Design-AI"], "Moodboard"))],
        Arc::clone(&gate),
    ));
    let session = Arc::new(session_with(Arc::clone(&provider), 5));

    let first = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.submit("Design a logo", None).await })
    };

    while provider.calls() == 0 {
        tokio::task::yield_now().await;
    }
    assert!(session.is_busy());

    let err = session.submit("Another one", None).await.unwrap_err();
    assert!(matches!(err, LbjError::Busy));

    gate.notify_one();
    let outcome = first.await.unwrap().unwrap();
    assert!(outcome.is_routed());
    assert!(!session.is_busy());
    assert_eq!(provider.calls(), 1);
    // The rejected submission left no trace in the log
    assert_eq!(session.messages().await.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn newer_submission_cancels_older_reset() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        Ok(result_for(&["LBJ-Sales-AI"], "Leads")),
        Ok(result_for(&["LBJ-Design-AI"], "Brand")),
    ]));
    let session = session_with(provider, 5);

    session.submit("Process these leads", None).await.unwrap();
    tokio::time::sleep(Duration::from_secs(3)).await;
    session.submit("Refresh our brand", None).await.unwrap();

    // The first reset would have fired at t=5
    tokio::time::sleep(Duration::from_secs(3)).await;
    let statuses = session.statuses().await;
    assert_eq!(status_of(&statuses, SpecialistId::Design), StatusState::Active);
    assert_eq!(status_of(&statuses, SpecialistId::Sales), StatusState::Idle);

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(
        session
            .statuses()
            .await
            .iter()
            .all(|s| s.status == StatusState::Idle)
    );
}
