//! Session event types

use serde::{Deserialize, Serialize};

use crate::turn::Turn;

/// Events emitted as a session's transcript changes.
///
/// Each one follows a store mutation; subscribers re-read the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A user turn was appended
    TurnAppended { turn: Turn },

    /// A reply was scheduled and will resolve after `delay_ms`
    ReplyPending { delay_ms: u64 },

    /// The pending reply was appended
    ReplyResolved { turn: Turn },

    /// The pending reply was cancelled before it fired
    ReplyCancelled,
}

impl SessionEvent {
    /// Check if this event ends a pending window
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SessionEvent::ReplyResolved { .. } | SessionEvent::ReplyCancelled
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_tag() {
        let json = serde_json::to_value(SessionEvent::ReplyPending { delay_ms: 1500 }).unwrap();
        assert_eq!(json["type"], "reply_pending");
        assert_eq!(json["delay_ms"], 1500);
    }

    #[test]
    fn test_terminal_events() {
        assert!(SessionEvent::ReplyCancelled.is_terminal());
        assert!(!SessionEvent::ReplyPending { delay_ms: 0 }.is_terminal());
    }
}
