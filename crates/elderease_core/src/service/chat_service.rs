//! Conversation log use-cases.
//!
//! # Responsibility
//! - Append user and assistant messages with clock-derived ids.
//! - Reject blank outgoing text.
//!
//! # Invariants
//! - `id = max(now_ms, last_id + 1)`, so ids strictly increase.
//! - Messages are never edited or removed.

use crate::model::chat::{ChatMessage, ChatRole, MessageId};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Chat use-case errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatError {
    /// Outgoing text is empty after trimming.
    EmptyMessage,
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "message text must not be empty"),
        }
    }
}

impl Error for ChatError {}

/// Append-only message log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Wraps existing history. Ids must already be increasing.
    pub fn new(history: Vec<ChatMessage>) -> Self {
        Self { messages: history }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Appends a message stamped at `now_ms` and returns its id.
    pub fn append(
        &mut self,
        role: ChatRole,
        content: impl Into<String>,
        is_voice: bool,
        now_ms: i64,
    ) -> MessageId {
        let id = self.next_id(now_ms);
        let mut message = ChatMessage::new(id, role, content, now_ms);
        message.is_voice = is_voice;
        self.messages.push(message);
        id
    }

    fn next_id(&self, now_ms: i64) -> MessageId {
        match self.messages.last() {
            Some(last) if now_ms <= last.id => last.id + 1,
            _ => now_ms,
        }
    }
}

/// Accepts text with at least one non-whitespace character.
pub fn validate_outgoing(text: &str) -> Result<(), ChatError> {
    if text.trim().is_empty() {
        return Err(ChatError::EmptyMessage);
    }
    Ok(())
}
