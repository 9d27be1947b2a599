use tokio::sync::Mutex;

use crate::chat::ConversationSession;
use crate::core::AppConfig;

/// Shared state for the API server. The session sits behind an async
/// mutex: a submit cycle assumes the last transcript entry is the user
/// turn it appended, so concurrent chat requests must be serialized.
pub struct AppState {
    pub session: Mutex<ConversationSession>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(session: ConversationSession, config: AppConfig) -> Self {
        Self {
            session: Mutex::new(session),
            config,
        }
    }
}
