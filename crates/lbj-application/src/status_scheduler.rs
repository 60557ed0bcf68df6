//! Delayed reset of the specialist status grid.
//!
//! Each successful orchestration schedules one reset. Scheduling again, or
//! calling [`StatusResetScheduler::cancel`], supersedes the pending reset so an
//! older timer can never clear indicators set by a newer response.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use lbj_core::StatusBoard;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

struct PendingReset {
    request_id: String,
    token: CancellationToken,
}

/// Schedules the return of the status grid to idle.
pub struct StatusResetScheduler {
    board: Arc<RwLock<StatusBoard>>,
    generation: Arc<AtomicU64>,
    pending: Mutex<Option<PendingReset>>,
}

impl StatusResetScheduler {
    pub fn new(board: Arc<RwLock<StatusBoard>>) -> Self {
        Self {
            board,
            generation: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
        }
    }

    /// Schedules a reset after `delay`, replacing any pending one.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule(&self, request_id: impl Into<String>, delay: Duration) {
        let request_id = request_id.into();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let token = CancellationToken::new();

        if let Some(previous) = self.swap_pending(Some(PendingReset {
            request_id: request_id.clone(),
            token: token.clone(),
        })) {
            tracing::debug!(
                "[StatusReset] Superseding pending reset for request {}",
                previous.request_id
            );
            previous.token.cancel();
        }

        let board = Arc::clone(&self.board);
        let current = Arc::clone(&self.generation);

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::debug!("[StatusReset] Reset for request {} cancelled", request_id);
                }
                _ = tokio::time::sleep(delay) => {
                    // Check under the board lock; callers bump the generation
                    // while holding it, so a newer activation always wins.
                    let mut board = board.write().await;
                    if current.load(Ordering::SeqCst) != generation {
                        return;
                    }
                    board.reset();
                    tracing::debug!("[StatusReset] Status grid reset after request {}", request_id);
                }
            }
        });
    }

    /// Drops the pending reset, if any.
    ///
    /// Call this while holding the board write lock when the board is about
    /// to be reactivated, so a timer already past its sleep cannot reset it.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(previous) = self.swap_pending(None) {
            previous.token.cancel();
        }
    }

    /// Request id of the pending reset, if one is scheduled.
    pub fn pending_request_id(&self) -> Option<String> {
        self.lock_pending()
            .as_ref()
            .filter(|pending| !pending.token.is_cancelled())
            .map(|pending| pending.request_id.clone())
    }

    fn swap_pending(&self, next: Option<PendingReset>) -> Option<PendingReset> {
        std::mem::replace(&mut *self.lock_pending(), next)
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<PendingReset>> {
        // The guarded value is a plain handle; a poisoned lock still holds a usable one.
        self.pending
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for StatusResetScheduler {
    fn drop(&mut self) {
        if let Some(pending) = self.swap_pending(None) {
            pending.token.cancel();
        }
    }
}
