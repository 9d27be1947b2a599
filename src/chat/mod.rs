//! Conversation session management.
mod core;
mod models;

pub use self::core::{ConversationSession, FALLBACK_REPLY, SessionConfig};
pub use models::Transcript;
