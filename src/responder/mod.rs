pub mod keyword;
pub mod fuzzy;
pub mod remote;

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

use crate::config::faq::FaqConfig;
use crate::llm::chat::ChatClient;
use crate::models::chat::Conversation;

pub use self::keyword::KeywordResponder;
pub use self::fuzzy::FuzzyResponder;
pub use self::remote::RemoteResponder;

#[derive(Debug, Error)]
pub enum ResponderError {
    #[error("remote completion failed: {0}")]
    Remote(String),
}

/// Intent classification seam: maps raw input (plus the conversation so far,
/// for strategies that use it) to a reply string. The keyword and fuzzy
/// strategies are total; the remote strategy can fail and callers fall back.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(
        &self,
        conversation: &Conversation,
        input: &str
    ) -> Result<String, ResponderError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponderKind {
    Keyword,
    Fuzzy,
    Llm,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseResponderKindError {
    message: String,
}

impl fmt::Display for ParseResponderKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ParseResponderKindError {}
impl FromStr for ResponderKind {
    type Err = ParseResponderKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keyword" => Ok(ResponderKind::Keyword),
            "fuzzy" => Ok(ResponderKind::Fuzzy),
            "llm" => Ok(ResponderKind::Llm),
            _ =>
                Err(ParseResponderKindError {
                    message: format!("Invalid responder type: '{}'", s),
                }),
        }
    }
}

pub fn new_responder(
    kind: ResponderKind,
    faq: Arc<FaqConfig>,
    chat_client: Arc<dyn ChatClient>,
    fuzzy_threshold: f64
) -> Arc<dyn Responder> {
    match kind {
        ResponderKind::Keyword => Arc::new(KeywordResponder::new(faq)),
        ResponderKind::Fuzzy => Arc::new(FuzzyResponder::new(faq, fuzzy_threshold)),
        ResponderKind::Llm => Arc::new(RemoteResponder::new(chat_client, faq.fallback.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn responder_kinds_parse_case_insensitively() {
        assert_eq!(ResponderKind::from_str("Keyword").unwrap(), ResponderKind::Keyword);
        assert_eq!(ResponderKind::from_str("FUZZY").unwrap(), ResponderKind::Fuzzy);
        assert_eq!(ResponderKind::from_str("llm").unwrap(), ResponderKind::Llm);
    }

    #[test]
    fn unknown_responder_kind_is_rejected() {
        assert!(ResponderKind::from_str("ml-classifier").is_err());
    }
}
