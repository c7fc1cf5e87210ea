//! Transcript entries and read-only transcript snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who wrote a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Author {
    User,
    Assistant,
}

impl Author {
    pub fn label(&self) -> &'static str {
        match self {
            Author::User => "You",
            Author::Assistant => "AI",
        }
    }
}

/// Per-session turn identifier. Strictly increasing in append order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnId(pub u64);

impl std::fmt::Display for TurnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One message in the transcript. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    id: TurnId,
    author: Author,
    text: String,
    created_at: DateTime<Utc>,
}

impl Turn {
    pub(crate) fn new(id: TurnId, author: Author, text: impl Into<String>) -> Self {
        Self {
            id,
            author,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> TurnId {
        self.id
    }

    pub fn author(&self) -> Author {
        self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Snapshot of a conversation: the ordered turns plus the pending-reply flag.
///
/// While `is_awaiting_reply()` is true the presentation layer shows a
/// distinct typing placeholder after the last turn; no `Turn` exists for it
/// until the reply resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
    awaiting_reply: bool,
}

impl Transcript {
    pub(crate) fn new(turns: Vec<Turn>, awaiting_reply: bool) -> Self {
        Self {
            turns,
            awaiting_reply,
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }
}
