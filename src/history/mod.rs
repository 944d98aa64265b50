mod memory;
use async_trait::async_trait;
use log::info;
use std::error::Error;
use crate::cli::Args;
use std::sync::Arc;
use crate::models::chat::{ ChatMessage, Conversation };

pub use memory::InMemoryConversationStore;

/// Append-only per-session message log. Entries are never edited or removed;
/// insertion order is retrieval order.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn append(
        &self,
        conversation_id: &str,
        role: &str,
        content: &str
    ) -> Result<ChatMessage, Box<dyn Error + Send + Sync>>;

    /// Returns the most recent `limit` messages in chronological order.
    /// A limit of 0 returns the whole conversation.
    async fn conversation(
        &self,
        conversation_id: &str,
        limit: usize
    ) -> Result<Conversation, Box<dyn Error + Send + Sync>>;

    async fn message_count(
        &self,
        conversation_id: &str
    ) -> Result<usize, Box<dyn Error + Send + Sync>>;
}

pub fn create_conversation_store(
    args: &Args
) -> Result<Arc<dyn ConversationStore>, Box<dyn Error + Send + Sync>> {
    match args.history_type.to_lowercase().as_str() {
        "memory" => Ok(Arc::new(InMemoryConversationStore::new())),
        _ =>
            Err(
                Box::new(
                    std::io::Error::new(
                        std::io::ErrorKind::InvalidInput,
                        format!("Unsupported conversation store type: {}", args.history_type)
                    )
                )
            ),
    }
}

pub fn initialize_conversation_store(
    args: &Args
) -> Result<Arc<dyn ConversationStore>, Box<dyn Error + Send + Sync>> {
    info!("Conversation logs will be kept in: {}", args.history_type);
    create_conversation_store(args)
}
