//! murmur-core: conversation turn lifecycle
//!
//! This crate holds the transcript, the single pending-reply flag, and the
//! delayed canned reply that resolves it. Rendering lives elsewhere.

pub mod conversation;
pub mod error;
pub mod events;
pub mod responses;
pub mod scheduler;
pub mod session;
pub mod turn;

pub use conversation::{ConversationStore, SEED_MESSAGE};
pub use error::{Error, InvalidInput, Result};
pub use events::SessionEvent;
pub use responses::{ResponseSource, TEMPLATES, Template};
pub use scheduler::{DelayRange, ReplyHandle, TurnScheduler};
pub use session::{ChatSession, SessionConfig};
pub use turn::{Author, Transcript, Turn, TurnId};
