use async_trait::async_trait;
use std::sync::Arc;
use log::debug;

use crate::config::faq::{ FaqConfig, FaqEntry };
use crate::models::chat::Conversation;
use crate::responder::{ Responder, ResponderError };

/// Similarity matcher for inputs that almost hit a canned question (typos,
/// dropped words). Exact normalized equality is checked first, then the
/// best Jaro-Winkler score above the threshold.
pub struct FuzzyResponder {
    faq: Arc<FaqConfig>,
    threshold: f64,
}

fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

impl FuzzyResponder {
    pub fn new(faq: Arc<FaqConfig>, threshold: f64) -> Self {
        Self { faq, threshold }
    }

    fn match_entry(&self, input: &str) -> Option<&FaqEntry> {
        let norm_input = normalize(input);
        if norm_input.is_empty() {
            return None;
        }

        for entry in &self.faq.entries {
            if normalize(&entry.question) == norm_input {
                return Some(entry);
            }
        }

        let mut best: Option<&FaqEntry> = None;
        let mut best_score = 0.0;
        for entry in &self.faq.entries {
            let candidate = normalize(&entry.question);
            let score = strsim::jaro_winkler(&norm_input, &candidate);
            if score > best_score {
                best_score = score;
                best = Some(entry);
            }
        }

        if best_score >= self.threshold {
            debug!("Fuzzy match at {:.3}: {:?}", best_score, best.map(|e| &e.question));
            return best;
        }

        None
    }
}

#[async_trait]
impl Responder for FuzzyResponder {
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
