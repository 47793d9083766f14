//! Chat message model.
//!
//! # Invariants
//! - `id` values strictly increase in append order.
//! - Messages are never mutated after creation.

use serde::{Deserialize, Serialize};

/// Clock-derived message identifier.
pub type MessageId = i64;

/// Author of one chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: ChatRole,
    pub content: String,
    /// Unix epoch milliseconds.
    pub timestamp_ms: i64,
    /// True when the message was produced by the voice input path.
    #[serde(default)]
    pub is_voice: bool,
}

impl ChatMessage {
    pub fn new(
        id: MessageId,
        role: ChatRole,
        content: impl Into<String>,
        timestamp_ms: i64,
    ) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            timestamp_ms,
            is_voice: false,
        }
    }

    pub fn voice(mut self) -> Self {
        self.is_voice = true;
        self
    }
}
