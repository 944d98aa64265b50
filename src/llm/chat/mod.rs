pub mod placeholder;

use async_trait::async_trait;
use serde::{ Deserialize, Serialize };
use std::error::Error as StdError;
use std::sync::Arc;
use super::{ LlmConfig, LlmType };
use self::placeholder::PlaceholderChatClient;
use crate::models::chat::ChatMessage;

/// Completion result in the shape the widget's service contract uses:
/// a message, and an error string instead of a hard failure.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ChatResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatResponse {
    pub fn is_error(&self) -> bool {
        self.error.is_some() || self.message.is_empty()
    }
}

/// The single capability a completion backend needs: turn an ordered
/// conversation into a response-or-error. A server-side network-backed
/// implementation substitutes in here without changing callers.
#[async_trait]
pub trait ChatClient: Send + Sync {
    async fn complete(
        &self,
        messages: &[ChatMessage]
    ) -> Result<ChatResponse, Box<dyn StdError + Send + Sync>>;

    fn get_api_key(&self) -> String;
    fn get_model(&self) -> String;
    fn get_base_url(&self) -> Option<String>;
}

pub fn new_client(
    config: &LlmConfig
) -> Result<Arc<dyn ChatClient>, Box<dyn StdError + Send + Sync>> {
    let client: Arc<dyn ChatClient> = match config.llm_type {
        LlmType::Placeholder => {
            let specific_client = PlaceholderChatClient::from_config(config)?;
            Arc::new(specific_client)
        }
    };
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_builds_the_placeholder_client() {
        let client = new_client(&LlmConfig::default()).unwrap();
        assert_eq!(client.get_model(), "placeholder");
        assert!(client.get_base_url().is_none());
    }

    #[test]
    fn empty_message_counts_as_an_error_response() {
        let response = ChatResponse {
            message: "".to_string(),
            error: Some("down".to_string()),
        };
        assert!(response.is_error());

        let response = ChatResponse { message: "ok".to_string(), error: None };
        assert!(!response.is_error());
    }
}
