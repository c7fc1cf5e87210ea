//! Error types for murmur-core

use thiserror::Error;

/// Result type alias using murmur-core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Why a user submission was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidInput {
    /// The text was empty or whitespace-only
    EmptyText,
    /// A reply to the previous submission is still pending
    ReplyPending,
}

impl std::fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidInput::EmptyText => write!(f, "message is empty"),
            InvalidInput::ReplyPending => write!(f, "a reply is still pending"),
        }
    }
}

/// Errors that can occur while driving a conversation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The submission was rejected; the caller can correct it
    #[error("Invalid input: {0}")]
    InvalidInput(InvalidInput),

    /// A call sequence broke the turn lifecycle contract
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl Error {
    /// Check if this error is an input rejection
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }

    /// Whether the user can fix this by changing what or when they submit
    pub fn is_user_correctable(&self) -> bool {
        self.is_invalid_input()
    }
}

impl From<InvalidInput> for Error {
    fn from(reason: InvalidInput) -> Self {
        Error::InvalidInput(reason)
    }
}
