use async_trait::async_trait;
use std::sync::Arc;
use log::warn;

use crate::llm::chat::ChatClient;
use crate::models::chat::{ ChatMessage, Conversation };
use crate::responder::{ Responder, ResponderError };

/// Remote-service strategy: hands the conversation to the chat-completion
/// client. An errored or empty completion degrades to the fallback string so
/// the widget always gets a reply.
pub struct RemoteResponder {
    client: Arc<dyn ChatClient>,
    fallback: String,
}

impl RemoteResponder {
    pub fn new(client: Arc<dyn ChatClient>, fallback: String) -> Self {
        Self { client, fallback }
    }
}

#[async_trait]
impl Responder for RemoteResponder {
    async fn respond(
        &self,
        conversation: &Conversation,
        input: &str
    ) -> Result<String, ResponderError> {
        let mut messages = conversation.messages.clone();
        let already_appended = messages
            .last()
            .map(|m| m.is_from_user() && m.content == input)
            .unwrap_or(false);
        if !already_appended {
            messages.push(ChatMessage::user(input));
        }

        let response = self.client
            .complete(&messages).await
            .map_err(|e| ResponderError::Remote(e.to_string()))?;

        if response.is_error() {
            warn!(
                "Chat completion returned an error, using fallback: {:?}",
                response.error
            );
            return Ok(self.fallback.clone());
        }

        Ok(response.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::chat::{ new_client, ChatResponse };
    use crate::llm::chat::placeholder::PLACEHOLDER_REPLY;
    use crate::llm::LlmConfig;
    use std::error::Error as StdError;

    struct FailingClient;

    #[async_trait]
    impl ChatClient for FailingClient {
        async fn complete(
            &self,
            _messages: &[ChatMessage]
        ) -> Result<ChatResponse, Box<dyn StdError + Send + Sync>> {
            Err("connection refused".into())
        }

        fn get_api_key(&self) -> String {
            String::new()
        }
        fn get_model(&self) -> String {
            "failing".to_string()
        }
        fn get_base_url(&self) -> Option<String> {
            None
        }
    }

    struct ErrorResponseClient;

    #[async_trait]
    impl ChatClient for ErrorResponseClient {
        async fn complete(
            &self,
            _messages: &[ChatMessage]
        ) -> Result<ChatResponse, Box<dyn StdError + Send + Sync>> {
            Ok(ChatResponse {
                message: String::new(),
                error: Some("upstream unavailable".to_string()),
            })
        }

        fn get_api_key(&self) -> String {
            String::new()
        }
        fn get_model(&self) -> String {
            "erroring".to_string()
        }
        fn get_base_url(&self) -> Option<String> {
            None
        }
    }

    fn empty_conversation() -> Conversation {
        Conversation { id: "test".to_string(), messages: vec![] }
    }

    #[tokio::test]
    async fn relays_the_placeholder_completion() {
        let client = new_client(&LlmConfig::default()).unwrap();
        let responder = RemoteResponder::new(client, "fallback".to_string());

        let reply = responder
            .respond(&empty_conversation(), "How do I sell my license?")
            .await
            .unwrap();
        assert_eq!(reply, PLACEHOLDER_REPLY);
    }

    #[tokio::test]
    async fn transport_failure_surfaces_as_a_responder_error() {
        let responder = RemoteResponder::new(Arc::new(FailingClient), "fallback".to_string());
        let err = responder.respond(&empty_conversation(), "hello").await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn error_responses_degrade_to_the_fallback() {
        let responder = RemoteResponder::new(Arc::new(ErrorResponseClient), "fallback".to_string());
        let reply = responder.respond(&empty_conversation(), "hello").await.unwrap();
        assert_eq!(reply, "fallback");
    }
}
