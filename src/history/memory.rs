use async_trait::async_trait;
use std::collections::HashMap;
use std::error::Error;
use tokio::sync::RwLock;

use crate::history::ConversationStore;
use crate::models::chat::{ ChatMessage, Conversation };

/// In-process conversation log. Lives for the lifetime of the server and is
/// never persisted; volume is bounded by manual typing speed, so growth is
/// left unbounded.
pub struct InMemoryConversationStore {
    conversations: RwLock<HashMap<String, Vec<ChatMessage>>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self {
            conversations: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn append(
        &self,
        conversation_id: &str,
        role: &str,
        content: &str
    ) -> Result<ChatMessage, Box<dyn Error + Send + Sync>> {
        let message = ChatMessage::new(role, content);
        let mut conversations = self.conversations.write().await;
        conversations
            .entry(conversation_id.to_string())
            .or_default()
            .push(message.clone());
        Ok(message)
    }

    async fn conversation(
        &self,
        conversation_id: &str,
        limit: usize
    ) -> Result<Conversation, Box<dyn Error + Send + Sync>> {
        let conversations = self.conversations.read().await;
        let messages = match conversations.get(conversation_id) {
            Some(all) => {
                let skip = if limit > 0 && all.len() > limit { all.len() - limit } else { 0 };
                all[skip..].to_vec()
            }
            None => Vec::new(),
        };

        Ok(Conversation {
            id: conversation_id.to_string(),
            messages,
        })
    }

    async fn message_count(
        &self,
        conversation_id: &str
    ) -> Result<usize, Box<dyn Error + Send + Sync>> {
        let conversations = self.conversations.read().await;
        Ok(
            conversations
                .get(conversation_id)
                .map(|m| m.len())
                .unwrap_or(0)
        )
    }
}
