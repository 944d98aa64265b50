use chrono::Utc;
use serde::{ Serialize, Deserialize };

pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";

/// A single exchanged message. Immutable once appended to a conversation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
    pub timestamp: i64,
}

impl ChatMessage {
    pub fn new(role: &str, content: &str) -> Self {
        Self {
            role: role.to_string(),
            content: content.to_string(),
            timestamp: Utc::now().timestamp(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self::new(ROLE_USER, content)
    }

    pub fn is_from_user(&self) -> bool {
        self.role == ROLE_USER
    }
}

/// Ordered log of messages for one widget session.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub messages: Vec<ChatMessage>,
}
