use crate::cli::Args;
use crate::config::faq::{ self, FaqConfig };
use crate::history::{ initialize_conversation_store, ConversationStore };
use crate::llm::{ parse_llm_type, LlmConfig };
use crate::llm::chat::{ ChatClient, new_client as new_chat_client };
use crate::models::chat::{ ChatMessage, ROLE_ASSISTANT, ROLE_USER };
use crate::responder::{ new_responder, Responder, ResponderKind };

use log::{ debug, error, info };
use std::error::Error;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// State container for the support chat: FAQ knowledge, matching strategy,
/// conversation logs, and the completion client. Shared by `Arc`; the FAQ and
/// responder sit behind a lock so a reload can swap them while connections
/// keep processing.
pub struct SupportAgent {
    chat_client: Arc<dyn ChatClient>,
    store: Arc<dyn ConversationStore>,
    faq: RwLock<Arc<FaqConfig>>,
    responder: RwLock<Arc<dyn Responder>>,
    responder_kind: ResponderKind,
    fuzzy_threshold: f64,
    reply_delay: Duration,
    history_limit: usize,
}

impl SupportAgent {
    pub fn new(args: &Args) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let chat_llm_type = parse_llm_type(&args.chat_llm_type)?;
        let chat_api_key = if !args.chat_api_key.is_empty() {
            Some(args.chat_api_key.clone())
        } else {
            None
        };
        let chat_config = LlmConfig {
            llm_type: chat_llm_type,
            base_url: args.chat_base_url.clone(),
            api_key: chat_api_key,
            completion_model: args.chat_model.clone(),
        };
        let chat_client = new_chat_client(&chat_config)?;
        info!(
            "Chat client configured: Type={}, Model={:?}, BaseURL={:?}",
            args.chat_llm_type,
            chat_config.completion_model.as_deref().unwrap_or("adapter default"),
            chat_config.base_url.as_deref().unwrap_or("adapter default")
        );

        let store = initialize_conversation_store(args)?;

        let faq_config = faq::load_faq_or_default(&args.faq_path)?;
        info!("FAQ ready: {} entries", faq_config.entries.len());

        let responder_kind = ResponderKind::from_str(&args.responder_type)?;
        let responder = new_responder(
            responder_kind,
            faq_config.clone(),
            chat_client.clone(),
            args.fuzzy_threshold
        );
        info!("Responder strategy: {}", args.responder_type);

        Ok(Self {
            chat_client,
            store,
            faq: RwLock::new(faq_config),
            responder: RwLock::new(responder),
            responder_kind,
            fuzzy_threshold: args.fuzzy_threshold,
            reply_delay: Duration::from_millis(args.reply_delay_ms),
            history_limit: args.history_limit,
        })
    }

    /// Seeds the welcome message the first time a session opens. Returns the
    /// seeded message, or None when the conversation already has history.
    pub async fn open_session(
        &self,
        conversation_id: &str
    ) -> Result<Option<ChatMessage>, Box<dyn Error + Send + Sync>> {
        if self.store.message_count(conversation_id).await? > 0 {
            return Ok(None);
        }

        let welcome = self.faq.read().await.welcome.clone();
        let message = self.store.append(conversation_id, ROLE_ASSISTANT, &welcome).await?;
        Ok(Some(message))
    }

    /// Appends the user message, waits the simulated reply latency, then
    /// appends and returns the responder's reply. The timer is fixed; there is
    /// no cancellation or retry.
    pub async fn process_message(
        &self,
        conversation_id: &str,
        content: &str
    ) -> Result<ChatMessage, Box<dyn Error + Send + Sync>> {
        self.store.append(conversation_id, ROLE_USER, content).await?;

        tokio::time::sleep(self.reply_delay).await;

        let conversation = self.store.conversation(conversation_id, self.history_limit).await?;
        let responder = self.responder.read().await.clone();
        let reply = match responder.respond(&conversation, content).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Responder error for {}: {}", conversation_id, e);
                self.faq.read().await.fallback.clone()
            }
        };

        let message = self.store.append(conversation_id, ROLE_ASSISTANT, &reply).await?;
        Ok(message)
    }

    pub async fn suggestions(&self) -> Vec<String> {
        self.faq.read().await.suggested_questions()
    }

    /// Re-reads the FAQ file when its mtime moved past the loaded snapshot and
    /// swaps in a responder built from the new entries.
    pub async fn reload_faq_if_changed(
        &self,
        args: &Args
    ) -> Result<bool, Box<dyn Error + Send + Sync>> {
        let current = self.faq.read().await.clone();
        match faq::reload_faq_if_changed(&args.faq_path, &current) {
            Ok(Some(new_config)) => {
                let responder = new_responder(
                    self.responder_kind,
                    new_config.clone(),
                    self.chat_client.clone(),
                    self.fuzzy_threshold
                );
                *self.faq.write().await = new_config;
                *self.responder.write().await = responder;
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(faq::FaqError::IoError(ref io_err)) if
                io_err.kind() == std::io::ErrorKind::NotFound
            => {
                debug!("FAQ file '{}' not present, nothing to reload", args.faq_path);
                Ok(false)
            }
            Err(e) => Err(Box::new(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::faq::FaqConfig;

    fn agent() -> SupportAgent {
        SupportAgent::new(&Args::for_test()).unwrap()
    }

    #[tokio::test]
    async fn first_activation_seeds_exactly_one_welcome_message() {
        let agent = agent();
        let faq = FaqConfig::default();

        let seeded = agent.open_session("c1").await.unwrap().unwrap();
        assert_eq!(seeded.content, faq.welcome);
        assert_eq!(seeded.role, ROLE_ASSISTANT);

        // A second open is a no-op.
        assert!(agent.open_session("c1").await.unwrap().is_none());

        let conversation = agent.store.conversation("c1", 0).await.unwrap();
        assert_eq!(conversation.messages.len(), 1);
    }

    #[tokio::test]
    async fn known_question_eventually_yields_its_canned_answer() {
        let agent = agent();
        let faq = FaqConfig::default();

        agent.open_session("c1").await.unwrap();
        let reply = agent.process_message("c1", "How do I sell my license?").await.unwrap();
        assert_eq!(reply.content, faq.entries[0].answer);

        let conversation = agent.store.conversation("c1", 0).await.unwrap();
        assert_eq!(conversation.messages.len(), 3);
        assert!(conversation.messages[1].is_from_user());
        assert_eq!(conversation.messages[2].content, faq.entries[0].answer);
    }

    #[tokio::test]
    async fn unknown_input_eventually_yields_the_fallback() {
        let agent = agent();
        let faq = FaqConfig::default();

        agent.open_session("c1").await.unwrap();
        let reply = agent.process_message("c1", "xyz").await.unwrap();
        assert_eq!(reply.content, faq.fallback);
    }

    #[tokio::test]
    async fn llm_strategy_replies_with_the_placeholder_completion() {
        let mut args = Args::for_test();
        args.responder_type = "llm".to_string();
        let agent = SupportAgent::new(&args).unwrap();

        let reply = agent.process_message("c1", "anything at all").await.unwrap();
        assert_eq!(reply.content, crate::llm::chat::placeholder::PLACEHOLDER_REPLY);
    }

    #[tokio::test]
    async fn suggestions_expose_the_question_set_in_order() {
        let agent = agent();
        let suggestions = agent.suggestions().await;
        assert_eq!(suggestions, FaqConfig::default().suggested_questions());
    }

    #[test]
    fn unknown_responder_kind_fails_construction() {
        let mut args = Args::for_test();
        args.responder_type = "ml".to_string();
        assert!(SupportAgent::new(&args).is_err());
    }

    #[tokio::test]
    async fn reload_without_a_faq_file_is_a_noop() {
        let agent = agent();
        let mut args = Args::for_test();
        args.faq_path = "/nonexistent/softsell-faq.json".to_string();
        assert!(!agent.reload_faq_if_changed(&args).await.unwrap());
    }
}
