use std::time::Duration;

use serde::{Deserialize, Serialize};

// The backend may need to load a model into memory before it can
// answer, so the chat budget is much larger than the probe budget.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const CHAT_TIMEOUT: Duration = Duration::from_secs(60);
const TAGS_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

/// A single conversation turn. Ordering in a transcript is
/// chronological and significant.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

/// Sampling options passed through to the backend. Only the
/// temperature is user-configurable; the rest are fixed defaults.
#[derive(Clone, Serialize, Debug)]
pub struct ChatOptions {
    pub temperature: f64,
    pub num_predict: u32,
    pub top_k: u32,
    pub top_p: f64,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            num_predict: 2048,
            top_k: 40,
            top_p: 0.9,
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    options: &'a ChatOptions,
    stream: bool,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    message: Option<ReplyMessage>,
}

#[derive(Deserialize)]
struct ReplyMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelEntry>,
}

#[derive(Deserialize)]
struct ModelEntry {
    name: String,
}

/// Everything that can go wrong in one chat cycle. All variants are
/// recoverable at the caller; none are fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message is empty")]
    EmptyInput,
    #[error("inference backend is not reachable")]
    BackendUnavailable,
    #[error("request timed out; the model may still be loading")]
    Timeout,
    #[error("could not connect to the inference backend")]
    ConnectionRefused,
    #[error("backend returned HTTP {status}: {body}")]
    BadStatus { status: u16, body: String },
    #[error("unexpected error: {0}")]
    Unknown(String),
}

impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ChatError::Timeout
        } else if err.is_connect() {
            ChatError::ConnectionRefused
        } else {
            ChatError::Unknown(err.to_string())
        }
    }
}

/// Client for the backend's REST endpoints.
pub struct OllamaClient {
    base_url: String,
    http: reqwest::Client,
}

impl OllamaClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, CHAT_TIMEOUT)
    }

    /// Build a client with a custom overall request timeout.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::builder()
                .connect_timeout(CONNECT_TIMEOUT)
                .timeout(timeout)
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List the model names the backend advertises. Doubles as the
    /// reachability probe: any transport error or non-2xx status means
    /// the backend is unreachable.
    pub async fn list_models(&self) -> Result<Vec<String>, ChatError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self.http.get(&url).timeout(TAGS_TIMEOUT).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = body.chars().take(200).collect::<String>();
            return Err(ChatError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        let tags: TagsResponse = response.json().await?;
        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    /// Request the next assistant reply for a message list. The backend
    /// is invoked in non-streaming mode so the reply arrives atomically
    /// or not at all. Returns `None` when a well-formed response has no
    /// `message.content`; the session resolves that case with a
    /// fallback reply instead of an error.
    pub async fn chat(
        &self,
        model: &str,
        messages: &[Message],
        options: &ChatOptions,
    ) -> Result<Option<String>, ChatError> {
        let url = format!("{}/api/chat", self.base_url);
        let payload = ChatRequest {
            model,
            messages,
            options,
            stream: false,
        };

        tracing::debug!(model = %model, turns = messages.len(), "chat request");

        let response = self.http.post(&url).json(&payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = body.chars().take(200).collect::<String>();
            return Err(ChatError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatReply = response.json().await?;
        Ok(reply.message.and_then(|m| m.content))
    }
}
