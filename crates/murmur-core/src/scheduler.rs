//! Delayed reply scheduling.
//!
//! A scheduled reply sleeps for a random delay, then asks the
//! [`ResponseSource`] for text and resolves it into the store. The returned
//! [`ReplyHandle`] cancels the task; a cancelled task never touches the store.

use parking_lot::Mutex;
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::{Notify, broadcast};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::conversation::ConversationStore;
use crate::events::SessionEvent;
use crate::responses::ResponseSource;

/// Half-open range `[min, max)` a reply delay is drawn from, in whole milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    pub min: Duration,
    pub max: Duration,
}

impl Default for DelayRange {
    fn default() -> Self {
        Self {
            min: Duration::from_millis(1500),
            max: Duration::from_millis(3000),
        }
    }
}

impl DelayRange {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))
    }

    /// Draw a delay uniformly. A degenerate range yields `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let min_ms = self.min.as_millis() as u64;
        let max_ms = self.max.as_millis() as u64;
        if max_ms <= min_ms {
            return Duration::from_millis(min_ms);
        }
        Duration::from_millis(rng.gen_range(min_ms..max_ms))
    }
}

/// Where a resolved reply goes
#[derive(Clone)]
pub(crate) struct ReplyTarget {
    pub(crate) store: Arc<Mutex<ConversationStore>>,
    pub(crate) events: broadcast::Sender<SessionEvent>,
    pub(crate) idle_notify: Arc<Notify>,
}

/// Drives the `Pending -> Idle` transition after a randomized delay
#[derive(Debug, Clone, Default)]
pub struct TurnScheduler {
    responses: ResponseSource,
    delay: DelayRange,
}

impl TurnScheduler {
    pub fn new(responses: ResponseSource, delay: DelayRange) -> Self {
        Self { responses, delay }
    }

    /// Spawn the reply task for `user_text` on `runtime`.
    pub(crate) fn schedule(
        &self,
        runtime: &Handle,
        target: ReplyTarget,
        user_text: String,
    ) -> ReplyHandle {
        let delay = self.delay.sample(&mut rand::thread_rng());
        let cancel = CancellationToken::new();
        let responses = self.responses.clone();

        let delay_ms = delay.as_millis() as u64;
        let _ = target.events.send(SessionEvent::ReplyPending { delay_ms });
        tracing::debug!(delay_ms, "Reply scheduled");

        let token = cancel.clone();
        let span = tracing::debug_span!("reply", delay_ms);
        let task = runtime.spawn(
            async move {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        tracing::debug!("Scheduled reply cancelled before firing");
                        let _ = target.events.send(SessionEvent::ReplyCancelled);
                        target.idle_notify.notify_waiters();
                        return;
                    }
                    _ = tokio::time::sleep(delay) => {}
                }

                let reply = responses.generate(&user_text);
                let resolved = {
                    let mut store = target.store.lock();
                    // Cancellation happens with the store lock held, so this
                    // check cannot interleave with teardown.
                    if token.is_cancelled() {
                        return;
                    }
                    store.resolve_pending_reply(reply)
                };

                match resolved {
                    Ok(turn) => {
                        let _ = target.events.send(SessionEvent::ReplyResolved { turn });
                    }
                    Err(e) => tracing::error!("Failed to resolve reply: {}", e),
                }
                target.idle_notify.notify_waiters();
            }
            .instrument(span),
        );

        ReplyHandle {
            cancel,
            task,
            delay,
        }
    }
}

/// Handle to one outstanding scheduled reply
#[derive(Debug)]
pub struct ReplyHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
    delay: Duration,
}

impl ReplyHandle {
    /// Cancel the reply. No-op if it already fired.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    #[cfg(test)]
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Whether the task has run to completion (resolved or cancelled)
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// The sampled delay for this reply
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait for the task to finish
    #[cfg(test)]
    pub(crate) async fn join(self) {
        if let Err(e) = self.task.await {
            tracing::warn!("Reply task ended abnormally: {}", e);
        }
    }
}
