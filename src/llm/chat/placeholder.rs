use async_trait::async_trait;
use std::error::Error as StdError;
use log::{ debug, info, warn };

use super::{ ChatClient, ChatResponse };
use crate::llm::LlmConfig;
use crate::models::chat::ChatMessage;

pub const PLACEHOLDER_REPLY: &str =
    "This is a placeholder response. In a production environment, this would be handled via a secure backend function with the actual provider API integration.";

pub const SERVICE_ERROR: &str =
    "Failed to communicate with the chat service. Please try again later.";

/// Stand-in for a real completion provider. Performs no outbound call and
/// unconditionally returns the fixed placeholder reply; any internal failure
/// is converted into a `ChatResponse` carrying the static error string.
pub struct PlaceholderChatClient {
    api_key: String,
    model: String,
    base_url: Option<String>,
}

impl PlaceholderChatClient {
    pub fn new(api_key: String, model: Option<String>, base_url: Option<String>) -> Self {
        if !api_key.is_empty() {
            warn!(
                "A provider API key was supplied but the placeholder client never sends it; a real key belongs in the server-side provider integration only"
            );
        }

        Self {
            api_key,
            model: model.unwrap_or_else(|| "placeholder".to_string()),
            base_url,
        }
    }

    pub fn from_config(config: &LlmConfig) -> Result<Self, Box<dyn StdError + Send + Sync>> {
        let api_key = config.api_key.clone().unwrap_or_default();
        let model = config.completion_model.clone();
        let base_url = config.base_url.clone();

        Ok(Self::new(api_key, model, base_url))
    }

    fn build_response(&self, messages: &[ChatMessage]) -> Result<ChatResponse, Box<dyn StdError + Send + Sync>> {
        debug!(
            "PlaceholderChatClient::complete() → would send {} message(s) to model={}",
            messages.len(),
            self.model
        );

        Ok(ChatResponse {
            message: PLACEHOLDER_REPLY.to_string(),
            error: None,
        })
    }
}

#[async_trait]
impl ChatClient for PlaceholderChatClient {
    async fn complete(
        &self,
        messages: &[ChatMessage]
    ) -> Result<ChatResponse, Box<dyn StdError + Send + Sync>> {
        // The only failure path the stub defines: anything that goes wrong
        // internally becomes an empty message plus the static error string.
        match self.build_response(messages) {
            Ok(response) => Ok(response),
            Err(e) => {
                info!("Error in placeholder chat client: {}", e);
                Ok(ChatResponse {
                    message: String::new(),
                    error: Some(SERVICE_ERROR.to_string()),
                })
            }
        }
    }

    fn get_api_key(&self) -> String {
        self.api_key.clone()
    }

    fn get_model(&self) -> String {
        self.model.clone()
    }

    fn get_base_url(&self) -> Option<String> {
        self.base_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::ChatMessage;

    #[tokio::test]
    async fn always_returns_the_fixed_placeholder_reply() {
        let client = PlaceholderChatClient::new(String::new(), None, None);
        let messages = vec![ChatMessage::user("How do I sell my license?")];

        let response = client.complete(&messages).await.unwrap();
        assert_eq!(response.message, PLACEHOLDER_REPLY);
        assert!(response.error.is_none());
    }

    #[tokio::test]
    async fn empty_conversations_are_still_answered() {
        let client = PlaceholderChatClient::new(String::new(), None, None);
        let response = client.complete(&[]).await.unwrap();
        assert!(!response.is_error());
    }

    #[test]
    fn model_defaults_to_placeholder() {
        let client = PlaceholderChatClient::new("key".to_string(), None, None);
        assert_eq!(client.get_model(), "placeholder");
        assert_eq!(client.get_api_key(), "key");
    }
}
