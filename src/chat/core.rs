use crate::ollama::{ChatError, ChatOptions, Message, OllamaClient, Role};

use super::models::Transcript;

/// Substituted for the assistant turn when the backend answers with a
/// well-formed response that has no reply content. Reachable-but-empty
/// is handled softly; hard failures roll back instead.
pub const FALLBACK_REPLY: &str = "Sorry, I could not generate a response.";

/// Per-request settings for a chat cycle. Supplied by the caller, not
/// owned by the transcript.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub model: String,
    pub system_prompt: String,
    pub temperature: f64,
    pub history_window: usize,
}

impl SessionConfig {
    pub fn new(model: &str, system_prompt: &str, temperature: f64, history_window: usize) -> Self {
        Self {
            model: model.to_string(),
            system_prompt: system_prompt.to_string(),
            temperature: temperature.clamp(0.0, 1.0),
            history_window,
        }
    }
}

/// The core abstraction for a stateful conversation with an inference
/// backend.
///
/// A submit cycle appends the user turn before the request goes out so
/// a rendering layer can show it immediately, then either appends the
/// assistant reply or removes the user turn again when the request
/// fails. Between cycles the transcript never ends in an unanswered
/// user turn.
///
/// `submit` takes `&mut self`, so only one cycle can be in flight per
/// session; owners that share a session across tasks must put it
/// behind a mutex.
pub struct ConversationSession {
    client: OllamaClient,
    transcript: Transcript,
    connected: bool,
    available_models: Vec<String>,
}

impl ConversationSession {
    pub fn new(client: OllamaClient) -> Self {
        Self {
            client,
            transcript: Transcript::new(),
            connected: false,
            available_models: Vec::new(),
        }
    }

    pub fn with_transcript(client: OllamaClient, messages: Vec<Message>) -> Self {
        Self {
            client,
            transcript: Transcript::new_with_messages(messages),
            connected: false,
            available_models: Vec::new(),
        }
    }

    pub fn transcript(&self) -> Vec<Message> {
        self.transcript.messages()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Model names advertised by the backend at the last successful
    /// connection check.
    pub fn available_models(&self) -> &[String] {
        &self.available_models
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Probe the backend and record whether it is reachable. Also
    /// refreshes the cached model list.
    pub async fn check_connection(&mut self) -> bool {
        match self.client.list_models().await {
            Ok(models) => {
                self.available_models = models;
                self.connected = true;
            }
            Err(err) => {
                tracing::debug!("connection check failed: {}", err);
                self.available_models.clear();
                self.connected = false;
            }
        }
        self.connected
    }

    /// One leading system turn followed by a sliding window over the
    /// most recent transcript turns.
    fn outbound_messages(&self, config: &SessionConfig) -> Vec<Message> {
        let mut messages = vec![Message::new(Role::System, &config.system_prompt)];
        messages.extend_from_slice(self.transcript.recent(config.history_window));
        messages
    }

    /// Run one request/response cycle: validate the input, append the
    /// user turn, call the backend, and append the reply or roll the
    /// user turn back on failure. Returns the appended assistant turn.
    pub async fn submit(
        &mut self,
        user_text: &str,
        config: &SessionConfig,
    ) -> Result<Message, ChatError> {
        let text = user_text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyInput);
        }
        if !self.connected {
            return Err(ChatError::BackendUnavailable);
        }

        self.transcript.push(Message::new(Role::User, text));

        let messages = self.outbound_messages(config);
        let options = ChatOptions {
            temperature: config.temperature,
            ..ChatOptions::default()
        };

        match self.client.chat(&config.model, &messages, &options).await {
            Ok(reply) => {
                let content = reply.unwrap_or_else(|| FALLBACK_REPLY.to_string());
                let turn = Message::new(Role::Assistant, &content);
                self.transcript.push(turn.clone());
                Ok(turn)
            }
            Err(err) => {
                tracing::warn!("chat cycle failed, rolling back user turn: {}", err);
                self.transcript.pop_if_user();
                Err(err)
            }
        }
    }

    /// Empty the transcript. The next cycle starts a fresh
    /// conversation against the same backend.
    pub fn clear(&mut self) {
        self.transcript.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SessionConfig {
        SessionConfig::new("test-model", "You are a helpful assistant.", 0.7, 20)
    }

    async fn connected_session(server: &mockito::Server) -> ConversationSession {
        let client = OllamaClient::new(&server.url());
        let mut session = ConversationSession::new(client);
        assert!(session.check_connection().await);
        session
    }

    fn mock_tags(server: &mut mockito::Server) -> mockito::Mock {
        server
            .mock("GET", "/api/tags")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"models":[{"name":"test-model"}]}"#)
            .create()
    }

    #[test]
    fn test_session_config_clamps_temperature() {
        let config = SessionConfig::new("m", "s", 1.8, 20);
        assert_eq!(config.temperature, 1.0);

        let config = SessionConfig::new("m", "s", -0.3, 20);
        assert_eq!(config.temperature, 0.0);
    }

    #[test]
    fn test_outbound_messages_bounded_by_window() {
        let client = OllamaClient::new("http://localhost:11434");
        let mut turns = Vec::new();
        for i in 0..50 {
            let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
            turns.push(Message::new(role, &format!("turn {}", i)));
        }
        let session = ConversationSession::with_transcript(client, turns);

        let outbound = session.outbound_messages(&config());

        // System turn plus at most `history_window` transcript turns
        assert_eq!(outbound.len(), 21);
        assert_eq!(outbound[0].role, Role::System);
        assert_eq!(outbound[0].content, "You are a helpful assistant.");
        assert_eq!(outbound[1].content, "turn 30");
        assert_eq!(outbound[20].content, "turn 49");
    }

    #[tokio::test]
    async fn test_submit_appends_user_and_assistant_turns() {
        let mut server = mockito::Server::new_async().await;
        let _tags = mock_tags(&mut server);
        let chat_mock = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":{"role":"assistant","content":"hi"}}"#)
            .create();

        let mut session = connected_session(&server).await;
        let turn = session.submit("hello", &config()).await.unwrap();

        chat_mock.assert();
        assert_eq!(turn.content, "hi");
        assert_eq!(
            session.transcript(),
            vec![
                Message::new(Role::User, "hello"),
                Message::new(Role::Assistant, "hi"),
            ]
        );
    }

    #[tokio::test]
    async fn test_submit_trims_whitespace_from_user_turn() {
        let mut server = mockito::Server::new_async().await;
        let _tags = mock_tags(&mut server);
        let _chat = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":{"role":"assistant","content":"hi"}}"#)
            .create();

        let mut session = connected_session(&server).await;
        session.submit("  hello  ", &config()).await.unwrap();

        assert_eq!(session.transcript()[0].content, "hello");
    }

    #[tokio::test]
    async fn test_empty_input_never_mutates() {
        let mut server = mockito::Server::new_async().await;
        let _tags = mock_tags(&mut server);

        let mut session = connected_session(&server).await;

        let err = session.submit("", &config()).await.unwrap_err();
        assert!(matches!(err, ChatError::EmptyInput));

        let err = session.submit("   ", &config()).await.unwrap_err();
        assert!(matches!(err, ChatError::EmptyInput));

        assert!(session.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_unverified_backend_never_mutates() {
        let client = OllamaClient::new("http://localhost:11434");
        let mut session = ConversationSession::new(client);

        let err = session.submit("hello", &config()).await.unwrap_err();

        assert!(matches!(err, ChatError::BackendUnavailable));
        assert!(session.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_bad_status_rolls_back_user_turn() {
        let mut server = mockito::Server::new_async().await;
        let _tags = mock_tags(&mut server);
        let _chat = server
            .mock("POST", "/api/chat")
            .with_status(500)
            .with_body("internal error")
            .create();

        let mut session = connected_session(&server).await;
        let err = session.submit("hello", &config()).await.unwrap_err();

        assert!(matches!(err, ChatError::BadStatus { status: 500, .. }));
        assert!(session.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_failure_restores_prior_transcript() {
        let mut server = mockito::Server::new_async().await;
        let _tags = mock_tags(&mut server);
        let _chat = server
            .mock("POST", "/api/chat")
            .with_status(503)
            .with_body("loading")
            .create();

        let prior = vec![
            Message::new(Role::User, "first"),
            Message::new(Role::Assistant, "reply"),
        ];
        let client = OllamaClient::new(&server.url());
        let mut session = ConversationSession::with_transcript(client, prior.clone());
        session.check_connection().await;

        let result = session.submit("second", &config()).await;

        assert!(result.is_err());
        assert_eq!(session.transcript(), prior);
    }

    #[tokio::test]
    async fn test_missing_reply_content_uses_fallback() {
        let mut server = mockito::Server::new_async().await;
        let _tags = mock_tags(&mut server);
        let _chat = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":{"role":"assistant"}}"#)
            .create();

        let mut session = connected_session(&server).await;
        let turn = session.submit("hello", &config()).await.unwrap();

        // Soft failure: reachable backend with an unusable reply still
        // completes the cycle
        assert_eq!(turn.content, FALLBACK_REPLY);
        assert_eq!(session.transcript().len(), 2);
    }

    #[tokio::test]
    async fn test_unparseable_reply_rolls_back() {
        let mut server = mockito::Server::new_async().await;
        let _tags = mock_tags(&mut server);
        let _chat = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create();

        let mut session = connected_session(&server).await;
        let err = session.submit("hello", &config()).await.unwrap_err();

        assert!(matches!(err, ChatError::Unknown(_)));
        assert!(session.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_clear_empties_the_transcript() {
        let mut server = mockito::Server::new_async().await;
        let _tags = mock_tags(&mut server);
        let _chat = server
            .mock("POST", "/api/chat")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":{"role":"assistant","content":"hi"}}"#)
            .create();

        let mut session = connected_session(&server).await;
        session.submit("hello", &config()).await.unwrap();
        assert_eq!(session.transcript().len(), 2);

        session.clear();
        assert!(session.transcript().is_empty());
    }

    #[tokio::test]
    async fn test_check_connection_caches_models() {
        let mut server = mockito::Server::new_async().await;
        let _tags = mock_tags(&mut server);

        let mut session = connected_session(&server).await;
        assert_eq!(session.available_models(), ["test-model"]);
    }

    #[tokio::test]
    async fn test_check_connection_unreachable_backend() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = OllamaClient::new(&format!("http://{}", addr));
        let mut session = ConversationSession::new(client);

        assert!(!session.check_connection().await);
        assert!(session.available_models().is_empty());
        assert!(!session.is_connected());
    }
}
