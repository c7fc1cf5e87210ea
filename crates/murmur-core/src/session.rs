//! An owned conversation session: store, scheduler, and the outstanding reply.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::{Notify, broadcast};
use uuid::Uuid;

use crate::conversation::{ConversationStore, SEED_MESSAGE};
use crate::error::{Error, Result};
use crate::events::SessionEvent;
use crate::responses::ResponseSource;
use crate::scheduler::{DelayRange, ReplyHandle, ReplyTarget, TurnScheduler};
use crate::turn::Transcript;

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Text of the assistant turn the transcript starts with
    pub seed_message: String,
    /// Range the reply delay is drawn from
    pub reply_delay: DelayRange,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed_message: SEED_MESSAGE.to_string(),
            reply_delay: DelayRange::default(),
        }
    }
}

/// One conversation. Each session owns its own store; nothing is global.
///
/// Dropping the session (or calling [`ChatSession::shutdown`]) cancels any
/// reply that has not fired yet.
pub struct ChatSession {
    id: Uuid,
    store: Arc<Mutex<ConversationStore>>,
    scheduler: TurnScheduler,
    pending: Mutex<Option<ReplyHandle>>,
    event_tx: broadcast::Sender<SessionEvent>,
    idle_notify: Arc<Notify>,
}

impl ChatSession {
    /// Create a session with random replies
    pub fn new(config: SessionConfig) -> Self {
        Self::with_responses(config, ResponseSource::new())
    }

    /// Create a session with a specific reply source
    pub fn with_responses(config: SessionConfig, responses: ResponseSource) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        let id = Uuid::new_v4();
        tracing::info!(session = %id, "Session started");
        Self {
            id,
            store: Arc::new(Mutex::new(ConversationStore::with_seed(config.seed_message))),
            scheduler: TurnScheduler::new(responses, config.reply_delay),
            pending: Mutex::new(None),
            event_tx,
            idle_notify: Arc::new(Notify::new()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Subscribe to transcript change events
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    /// Submit user text and schedule the reply.
    ///
    /// Fails with `InvalidInput` for blank text or while a reply is pending,
    /// and with `InvariantViolation` when called outside a tokio runtime. The
    /// transcript is unchanged in every failure case.
    pub fn submit_user_turn(&self, text: &str) -> Result<Transcript> {
        let runtime = Handle::try_current().map_err(|e| {
            Error::InvariantViolation(format!("cannot schedule a reply: {}", e))
        })?;

        let transcript = self.store.lock().submit_user_turn(text)?;

        if let Some(turn) = transcript.last() {
            let _ = self.event_tx.send(SessionEvent::TurnAppended { turn: turn.clone() });
        }

        let target = ReplyTarget {
            store: Arc::clone(&self.store),
            events: self.event_tx.clone(),
            idle_notify: Arc::clone(&self.idle_notify),
        };
        let handle = self.scheduler.schedule(&runtime, target, text.to_string());
        tracing::debug!(
            session = %self.id,
            delay_ms = handle.delay().as_millis() as u64,
            "Awaiting reply"
        );
        *self.pending.lock() = Some(handle);

        Ok(transcript)
    }

    /// Current transcript snapshot. Side-effect free.
    pub fn transcript(&self) -> Transcript {
        self.store.lock().transcript()
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.store.lock().is_awaiting_reply()
    }

    /// Wait until no reply is pending.
    pub async fn wait_for_reply(&self) {
        let notified = self.idle_notify.notified();
        if !self.is_awaiting_reply() {
            return;
        }
        notified.await;
    }

    /// Wait until no reply is pending, with a timeout.
    /// Returns `true` if idle was reached, `false` on timeout.
    pub async fn wait_for_reply_timeout(&self, timeout: Duration) -> bool {
        if !self.is_awaiting_reply() {
            return true;
        }
        tokio::time::timeout(timeout, self.wait_for_reply())
            .await
            .is_ok()
    }

    /// End the session, cancelling any reply that has not fired.
    pub fn shutdown(self) {
        // Drop does the work
    }

    fn cancel_pending(&self) {
        if let Some(handle) = self.pending.lock().take() {
            if !handle.is_finished() {
                tracing::debug!(session = %self.id, "Cancelling outstanding reply");
            }
            // Hold the store so a reply whose timer already fired cannot
            // resolve between this cancel and its own check.
            let _store = self.store.lock();
            handle.cancel();
        }
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.cancel_pending();
        tracing::info!(session = %self.id, "Session ended");
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.id)
            .field("awaiting_reply", &self.is_awaiting_reply())
            .finish_non_exhaustive()
    }
}
