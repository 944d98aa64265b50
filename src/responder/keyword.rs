use async_trait::async_trait;
use std::sync::Arc;

use crate::config::faq::{ FaqConfig, FaqEntry };
use crate::models::chat::Conversation;
use crate::responder::{ Responder, ResponderError };

/// Substring-containment matcher over the canned question set.
///
/// A question matches when the lowercased input contains the lowercased
/// question or vice versa; entries are tried in declaration order and the
/// first hit wins. Whitespace-only input never matches anything.
pub struct KeywordResponder {
    faq: Arc<FaqConfig>,
}

impl KeywordResponder {
    pub fn new(faq: Arc<FaqConfig>) -> Self {
        Self { faq }
    }

    fn match_entry(&self, input: &str) -> Option<&FaqEntry> {
        let input = input.trim().to_lowercase();
        if input.is_empty() {
            return None;
        }

        self.faq.entries.iter().find(|entry| {
            let question = entry.question.to_lowercase();
            input.contains(&question) || question.contains(&input)
        })
    }
}

#[async_trait]
impl Responder for KeywordResponder {
    async fn respond(
        &self,
        _conversation: &Conversation,
        input: &str
    ) -> Result<String, ResponderError> {
        let reply = match self.match_entry(input) {
            Some(entry) => entry.answer.clone(),
            None => self.faq.fallback.clone(),
        };
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::faq::FaqConfig;

    fn responder() -> KeywordResponder {
        KeywordResponder::new(Arc::new(FaqConfig::default()))
    }

    fn empty_conversation() -> Conversation {
        Conversation { id: "test".to_string(), messages: vec![] }
    }

    #[tokio::test]
    async fn every_known_question_returns_its_mapped_answer() {
        let faq = FaqConfig::default();
        let responder = responder();
        for entry in &faq.entries {
            let reply = responder.respond(&empty_conversation(), &entry.question).await.unwrap();
            assert_eq!(reply, entry.answer);
        }
    }

    #[tokio::test]
    async fn inputs_containing_a_question_match_regardless_of_case() {
        let responder = responder();
        let reply = responder
            .respond(&empty_conversation(), "Please tell me: HOW DO I SELL MY LICENSE? Thanks!")
            .await
            .unwrap();
        assert_eq!(reply, FaqConfig::default().entries[0].answer);
    }

    #[tokio::test]
    async fn partial_input_contained_in_a_question_matches() {
        let responder = responder();
        let reply = responder
            .respond(&empty_conversation(), "sell my license")
            .await
            .unwrap();
        assert_eq!(reply, FaqConfig::default().entries[0].answer);
    }

    #[tokio::test]
    async fn empty_and_whitespace_input_return_the_fallback() {
        let responder = responder();
        let fallback = FaqConfig::default().fallback;
        assert_eq!(responder.respond(&empty_conversation(), "").await.unwrap(), fallback);
        assert_eq!(responder.respond(&empty_conversation(), "   ").await.unwrap(), fallback);
    }

    #[tokio::test]
    async fn unrecognized_input_returns_the_fallback() {
        let responder = responder();
        let reply = responder.respond(&empty_conversation(), "asdkjh").await.unwrap();
        assert_eq!(reply, FaqConfig::default().fallback);
    }

    #[tokio::test]
    async fn first_declared_entry_wins_ambiguous_matches() {
        let faq = FaqConfig::default();
        let responder = responder();
        let both = format!(
            "{} Also, {}",
            faq.entries[0].question,
            faq.entries[2].question
        );
        let reply = responder.respond(&empty_conversation(), &both).await.unwrap();
        assert_eq!(reply, faq.entries[0].answer);
    }
}
