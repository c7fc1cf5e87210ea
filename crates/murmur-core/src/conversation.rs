//! Conversation state: the append-only transcript and the pending-reply flag.

use crate::error::{Error, InvalidInput, Result};
use crate::turn::{Author, Transcript, Turn, TurnId};

/// Text of the assistant turn every new conversation starts with
pub const SEED_MESSAGE: &str = "Hello! I'm your AI assistant. How can I help you today?";

/// Ordered transcript plus the single in-flight reply flag.
///
/// Two transitions exist: `Idle --submit--> Pending` and
/// `Pending --resolve--> Idle`. `awaiting_reply` is the only guard, so at
/// most one reply is ever outstanding.
#[derive(Debug)]
pub struct ConversationStore {
    turns: Vec<Turn>,
    awaiting_reply: bool,
    next_id: u64,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationStore {
    /// Create a store seeded with the default assistant greeting
    pub fn new() -> Self {
        Self::with_seed(SEED_MESSAGE)
    }

    /// Create a store seeded with a custom assistant greeting
    pub fn with_seed(seed: impl Into<String>) -> Self {
        let mut store = Self {
            turns: Vec::new(),
            awaiting_reply: false,
            next_id: 1,
        };
        store.append(Author::Assistant, seed.into());
        store
    }

    /// Append a user turn and enter the pending state.
    ///
    /// The text is stored as given; trimming only decides whether it is empty.
    /// Scheduling the reply is the caller's job (see `ChatSession`).
    pub fn submit_user_turn(&mut self, text: &str) -> Result<Transcript> {
        if text.trim().is_empty() {
            tracing::warn!("Rejected empty submission");
            return Err(InvalidInput::EmptyText.into());
        }
        if self.awaiting_reply {
            tracing::warn!("Rejected submission while a reply is pending");
            return Err(InvalidInput::ReplyPending.into());
        }

        let id = self.append(Author::User, text.to_string()).id();
        self.awaiting_reply = true;
        tracing::debug!(turn_id = %id, "User turn appended, awaiting reply");
        Ok(self.transcript())
    }

    /// Append the assistant reply and leave the pending state.
    pub(crate) fn resolve_pending_reply(&mut self, text: impl Into<String>) -> Result<Turn> {
        if !self.awaiting_reply {
            return Err(Error::InvariantViolation(
                "no pending reply to resolve".to_string(),
            ));
        }

        let turn = self.append(Author::Assistant, text.into()).clone();
        self.awaiting_reply = false;
        tracing::debug!(turn_id = %turn.id(), "Pending reply resolved");
        Ok(turn)
    }

    /// Snapshot of the turns and the pending flag
    pub fn transcript(&self) -> Transcript {
        Transcript::new(self.turns.clone(), self.awaiting_reply)
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    fn append(&mut self, author: Author, text: String) -> &Turn {
        let id = TurnId(self.next_id);
        self.next_id += 1;
        self.turns.push(Turn::new(id, author, text));
        &self.turns[self.turns.len() - 1]
    }
}
