//! The core models for managing a stateful chat with an LLM.
use crate::ollama::{Message, Role};

/// Ordered list of conversation turns. Append-only between clears;
/// turns are immutable once appended.
#[derive(Default)]
pub struct Transcript(Vec<Message>);

impl Transcript {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn new_with_messages(messages: Vec<Message>) -> Self {
        Self(messages)
    }

    pub fn messages(&self) -> Vec<Message> {
        self.0.clone()
    }

    pub fn push(&mut self, msg: Message) {
        self.0.push(msg)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    /// The last `n` turns in chronological order. Bounds the outbound
    /// payload; the stored transcript is never truncated.
    pub fn recent(&self, n: usize) -> &[Message] {
        &self.0[self.0.len().saturating_sub(n)..]
    }

    /// Remove the last turn if it is a user turn. Rolls back an
    /// optimistically appended user message after a failed cycle.
    pub fn pop_if_user(&mut self) -> Option<Message> {
        if self.0.last().map(|m| m.role) == Some(Role::User) {
            self.0.pop()
        } else {
            None
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.0.iter()
    }
}
